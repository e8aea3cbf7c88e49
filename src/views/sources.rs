use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::Result,
    pagination::PageSource,
    traits::{AccountProvider, TokenTransferProvider},
    types::{Connection, TokenStandard, TokenTransfer, Transaction},
};

/// Next pages of an account's transaction list, re-queried through
/// `AccountByAddress` with the last cursor.
pub struct AccountTransactions {
    accounts: Arc<dyn AccountProvider>,
    address: String,
}

impl AccountTransactions {
    pub fn new(accounts: Arc<dyn AccountProvider>, address: impl Into<String>) -> Self {
        Self { accounts, address: address.into() }
    }
}

#[async_trait]
impl PageSource<Transaction> for AccountTransactions {
    async fn fetch_page(&self, cursor: Option<&str>, count: u32) -> Result<Connection<Transaction>> {
        let account = self.accounts.get_account(&self.address, cursor, count).await?;
        Ok(account.tx_list.unwrap_or_default())
    }
}

pub struct TokenTransfers {
    transfers: Arc<dyn TokenTransferProvider>,
    address: String,
    standard: TokenStandard,
}

impl TokenTransfers {
    pub fn new(
        transfers: Arc<dyn TokenTransferProvider>,
        address: impl Into<String>,
        standard: TokenStandard,
    ) -> Self {
        Self { transfers, address: address.into(), standard }
    }
}

#[async_trait]
impl PageSource<TokenTransfer> for TokenTransfers {
    async fn fetch_page(
        &self,
        cursor: Option<&str>,
        count: u32,
    ) -> Result<Connection<TokenTransfer>> {
        self.transfers.get_token_transfers(&self.address, self.standard, cursor, count).await
    }
}
