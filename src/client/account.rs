use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::{
    error::{ExplorerError, Result},
    traits::{AccountProvider, TokenTransferProvider},
    types::{Account, Connection, TokenStandard, TokenTransfer},
};

use super::{queries, Client};

#[derive(Deserialize)]
struct AccountData {
    account: Option<Account>,
}

#[derive(Deserialize)]
struct TokenTransferData {
    account: Option<TokenTransferList>,
}

#[derive(Deserialize)]
struct TokenTransferList {
    #[serde(default, alias = "erc20TxList", alias = "erc721TxList", alias = "erc1155TxList")]
    tx_list: Option<Connection<TokenTransfer>>,
}

#[async_trait]
impl AccountProvider for Client {
    /// Get an account with one page of its transaction list.
    ///
    /// # Arguments
    ///
    /// * `address` - The account address, sent as is.
    /// * `cursor` - Cursor of the last edge already held, `None` for the first page.
    /// * `count` - Page size.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Account`, or `NotFound` when the API knows no such account.
    async fn get_account(
        &self,
        address: &str,
        cursor: Option<&str>,
        count: u32,
    ) -> Result<Account> {
        let variables = json!({ "address": address, "cursor": cursor, "count": count });
        let data: AccountData =
            self.query("AccountByAddress", queries::ACCOUNT_BY_ADDRESS, variables).await?;
        data.account.ok_or_else(|| ExplorerError::NotFound(format!("account {address}")))
    }
}

#[async_trait]
impl TokenTransferProvider for Client {
    async fn get_token_transfers(
        &self,
        address: &str,
        standard: TokenStandard,
        cursor: Option<&str>,
        count: u32,
    ) -> Result<Connection<TokenTransfer>> {
        let (operation, document) = queries::token_transfers(standard);
        let variables = json!({ "address": address, "cursor": cursor, "count": count });
        let data: TokenTransferData = self.query(operation, document, variables).await?;

        let account =
            data.account.ok_or_else(|| ExplorerError::NotFound(format!("account {address}")))?;
        // an account without transfers may come back with a null list
        Ok(account.tx_list.unwrap_or_default())
    }
}
