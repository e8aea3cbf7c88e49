//! Folds raw API entities into the values a page displays.
//!
//! Everything here is a pure function of its input: the same snapshot always
//! yields the same summary, and nothing is rounded. Rounding happens only
//! when a value is rendered with [`crate::convert::fixed_precision`].

use bigdecimal::{num_bigint::BigInt, BigDecimal, Zero};
use serde::Serialize;

use crate::{
    client::price::RATE_DECIMALS,
    convert::{scale_native, scale_to_decimal},
    types::{Account, Block, Delegation, TokenStandard, TokenTransfer, Transaction},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DelegationTotals {
    pub delegated: BigDecimal,
    pub pending_rewards: BigDecimal,
    pub claimed_rewards: BigDecimal,
}

fn sum_native<'a>(amounts: impl Iterator<Item = &'a BigInt>) -> BigDecimal {
    amounts.map(scale_native).fold(BigDecimal::zero(), |total, amount| total + amount)
}

pub fn delegated_total<'a>(delegations: impl IntoIterator<Item = &'a Delegation>) -> BigDecimal {
    sum_native(delegations.into_iter().map(|d| &d.amount))
}

/// A delegation without a pending reward record contributes zero.
pub fn pending_reward_total<'a>(
    delegations: impl IntoIterator<Item = &'a Delegation>,
) -> BigDecimal {
    sum_native(
        delegations.into_iter().filter_map(|d| d.pending_rewards.as_ref()).map(|r| &r.amount),
    )
}

pub fn claimed_reward_total<'a>(
    delegations: impl IntoIterator<Item = &'a Delegation>,
) -> BigDecimal {
    sum_native(delegations.into_iter().map(|d| &d.claimed_reward))
}

pub fn delegation_totals<'a>(
    delegations: impl IntoIterator<Item = &'a Delegation> + Clone,
) -> DelegationTotals {
    DelegationTotals {
        delegated: delegated_total(delegations.clone()),
        pending_rewards: pending_reward_total(delegations.clone()),
        claimed_rewards: claimed_reward_total(delegations),
    }
}

/// Fiat value of a native balance: `rate / 10^8 × balance`.
pub fn fiat_value(rate: &BigInt, balance: &BigDecimal) -> BigDecimal {
    scale_to_decimal(rate, RATE_DECIMALS) * balance
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountSummary {
    pub address: String,
    pub balance: BigDecimal,
    /// `totalValue`, shown as "Available".
    pub available: BigDecimal,
    /// `None` while the price feed is unavailable.
    pub fiat_value: Option<BigDecimal>,
    pub tx_count: u64,
    pub delegations: DelegationTotals,
    pub is_staker: bool,
    pub is_contract: bool,
    pub contract_name: Option<String>,
}

pub fn summarize_account(account: &Account, rate: Option<&BigInt>) -> AccountSummary {
    let balance = scale_native(&account.balance);
    let delegations: Vec<&Delegation> = account.delegations().collect();
    AccountSummary {
        address: account.address.clone(),
        fiat_value: rate.map(|rate| fiat_value(rate, &balance)),
        balance,
        available: scale_native(&account.total_value),
        tx_count: account.tx_count,
        delegations: delegation_totals(delegations.iter().copied()),
        is_staker: account.staker.is_some(),
        is_contract: account.is_contract(),
        contract_name: account.contract.as_ref().and_then(|c| c.name.clone()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRow {
    pub hash: String,
    pub block_number: Option<u64>,
    pub timestamp: Option<u64>,
    pub from: String,
    pub to: Option<String>,
    pub value: BigDecimal,
    pub gas_used: u64,
}

pub fn transaction_row(tx: &Transaction) -> TransactionRow {
    TransactionRow {
        hash: tx.hash.clone(),
        block_number: tx.block.as_ref().map(|b| b.number),
        timestamp: tx.block.as_ref().map(|b| b.timestamp),
        from: tx.from.clone(),
        to: tx.to.clone(),
        value: scale_native(&tx.value),
        gas_used: tx.gas_used,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenTransferRow {
    pub hash: String,
    pub block_number: Option<u64>,
    pub timestamp: Option<u64>,
    pub token_address: String,
    pub token_symbol: Option<String>,
    pub token_id: Option<String>,
    pub sender: String,
    pub recipient: String,
    /// Amount scaled by the token's decimals; `None` for ERC-721.
    pub amount: Option<BigDecimal>,
}

pub fn token_transfer_row(transfer: &TokenTransfer, standard: TokenStandard) -> TokenTransferRow {
    let block = transfer.block();
    TokenTransferRow {
        hash: transfer.trx_hash.clone(),
        block_number: block.map(|b| b.number),
        timestamp: block.map(|b| b.timestamp),
        token_address: transfer.token_address.clone(),
        token_symbol: transfer.token.as_ref().and_then(|t| t.symbol.clone()),
        token_id: match standard {
            TokenStandard::Erc20 => None,
            TokenStandard::Erc721 | TokenStandard::Erc1155 => Some(transfer.token_id.to_string()),
        },
        sender: transfer.sender.clone(),
        recipient: transfer.recipient.clone(),
        amount: standard
            .is_fungible()
            .then(|| scale_to_decimal(&transfer.amount, transfer.decimals())),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockSummary {
    pub number: u64,
    pub hash: String,
    pub parent_hash: Option<String>,
    pub timestamp: u64,
    pub transaction_count: u64,
    /// `None` at genesis.
    pub previous: Option<u64>,
    pub next: u64,
    pub transactions: Vec<TransactionRow>,
}

pub fn summarize_block(block: &Block) -> BlockSummary {
    BlockSummary {
        number: block.number,
        hash: block.hash.clone(),
        parent_hash: block.parent_hash().map(str::to_owned),
        timestamp: block.timestamp,
        transaction_count: block.transaction_count,
        previous: block.number.checked_sub(1),
        next: block.number.saturating_add(1),
        transactions: block.tx_list.iter().map(transaction_row).collect(),
    }
}
