use bigdecimal::num_bigint::BigInt;
use serde::Deserialize;

use super::{wire, Connection, Transaction};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub address: String,
    #[serde(default)]
    pub contract: Option<Contract>,
    #[serde(default, deserialize_with = "wire::deserialize_bigint")]
    pub balance: BigInt,
    #[serde(default, deserialize_with = "wire::deserialize_bigint")]
    pub total_value: BigInt,
    #[serde(default, deserialize_with = "wire::deserialize_u64")]
    pub tx_count: u64,
    #[serde(default)]
    pub tx_list: Option<Connection<Transaction>>,
    #[serde(default)]
    pub staker: Option<Staker>,
    #[serde(default)]
    pub delegations: Option<Connection<Option<Delegation>>>,
}

impl Account {
    /// Delegations present in the response; `null` edges are skipped.
    pub fn delegations(&self) -> impl Iterator<Item = &Delegation> {
        self.delegations.iter().flat_map(|conn| conn.nodes()).flatten()
    }

    pub fn is_contract(&self) -> bool {
        self.contract.is_some()
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub address: String,
    #[serde(default)]
    pub deployed_by: Option<DeployTransaction>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub compiler: Option<String>,
    #[serde(default)]
    pub source_code: Option<String>,
    #[serde(default)]
    pub abi: Option<String>,
    /// Validation time, zero while the contract is unvalidated.
    #[serde(default, deserialize_with = "wire::deserialize_u64")]
    pub validated: u64,
    #[serde(default)]
    pub support_contact: Option<String>,
    #[serde(default, deserialize_with = "wire::deserialize_u64")]
    pub timestamp: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeployTransaction {
    pub hash: String,
    #[serde(default)]
    pub contract_address: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Staker {
    #[serde(deserialize_with = "wire::deserialize_u64")]
    pub id: u64,
    #[serde(default, deserialize_with = "wire::deserialize_u64")]
    pub created_time: u64,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Delegation {
    #[serde(default, deserialize_with = "wire::deserialize_u64")]
    pub to_staker_id: u64,
    #[serde(default, deserialize_with = "wire::deserialize_u64")]
    pub created_time: u64,
    #[serde(default, deserialize_with = "wire::deserialize_bigint")]
    pub amount: BigInt,
    #[serde(default, deserialize_with = "wire::deserialize_bigint")]
    pub claimed_reward: BigInt,
    #[serde(default)]
    pub pending_rewards: Option<PendingRewards>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PendingRewards {
    #[serde(default, deserialize_with = "wire::deserialize_bigint")]
    pub amount: BigInt,
}
