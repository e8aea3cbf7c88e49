use bigdecimal::num_bigint::BigInt;
use serde::Deserialize;

use super::wire;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(deserialize_with = "wire::deserialize_u64")]
    pub number: u64,
    pub hash: String,
    #[serde(default)]
    pub parent: Option<ParentBlock>,
    #[serde(default, deserialize_with = "wire::deserialize_u64")]
    pub timestamp: u64,
    #[serde(default, deserialize_with = "wire::deserialize_u64")]
    pub transaction_count: u64,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub tx_list: Vec<Transaction>,
}

impl Block {
    pub fn parent_hash(&self) -> Option<&str> {
        self.parent.as_ref().map(|parent| parent.hash.as_str())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ParentBlock {
    pub hash: String,
}

/// The block fields a transaction row needs.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct BlockRef {
    #[serde(deserialize_with = "wire::deserialize_u64")]
    pub number: u64,
    #[serde(default, deserialize_with = "wire::deserialize_u64")]
    pub timestamp: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub hash: String,
    pub from: String,
    /// `None` for contract creation.
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default, deserialize_with = "wire::deserialize_bigint")]
    pub value: BigInt,
    #[serde(default, deserialize_with = "wire::deserialize_u64")]
    pub gas_used: u64,
    /// `None` while pending.
    #[serde(default)]
    pub block: Option<BlockRef>,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub token_transactions: Vec<TokenTransaction>,
}

/// A token movement emitted inside a transaction.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TokenTransaction {
    #[serde(default, deserialize_with = "wire::deserialize_u64")]
    pub trx_index: u64,
    pub token_address: String,
    #[serde(default)]
    pub token_name: Option<String>,
    #[serde(default)]
    pub token_symbol: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default, deserialize_with = "wire::deserialize_bigint")]
    pub token_id: BigInt,
    #[serde(default, deserialize_with = "wire::deserialize_u64")]
    pub token_decimals: u64,
    /// Direction, e.g. `TRANSFER`, `MINT`, `APPROVAL`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub sender: String,
    pub recipient: String,
    #[serde(default, deserialize_with = "wire::deserialize_bigint")]
    pub amount: BigInt,
}
