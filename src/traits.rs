use async_trait::async_trait;
use bigdecimal::num_bigint::BigInt;

use crate::{
    error::Result,
    types::{Account, Block, Connection, TokenStandard, TokenTransfer, Transaction},
};

#[async_trait]
pub trait AccountProvider: Send + Sync {
    // Get an account with one page of its transactions.
    async fn get_account(&self, address: &str, cursor: Option<&str>, count: u32)
        -> Result<Account>;
}

#[async_trait]
pub trait TokenTransferProvider: Send + Sync {
    // Get one page of an account's token transfers for the given standard.
    async fn get_token_transfers(
        &self,
        address: &str,
        standard: TokenStandard,
        cursor: Option<&str>,
        count: u32,
    ) -> Result<Connection<TokenTransfer>>;
}

#[async_trait]
pub trait BlockProvider: Send + Sync {
    // Get a block and its transactions by height.
    async fn get_block_by_number(&self, number: u64) -> Result<Block>;
}

#[async_trait]
pub trait TransactionProvider: Send + Sync {
    async fn get_transaction(&self, hash: &str) -> Result<Transaction>;
}

#[async_trait]
pub trait PriceProvider: Send + Sync {
    // Conversion rate scaled by 10^8, as reported by the price feed contract.
    async fn get_conversion_rate(&self, feed_address: &str) -> Result<BigInt>;
}
