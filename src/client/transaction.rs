use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::{
    error::{ExplorerError, Result},
    traits::TransactionProvider,
    types::Transaction,
};

use super::{queries, Client};

#[derive(Deserialize)]
struct TransactionData {
    transaction: Option<Transaction>,
}

#[async_trait]
impl TransactionProvider for Client {
    /// Get transaction details by hash.
    ///
    /// # Arguments
    ///
    /// * `hash` - The hash of the transaction to retrieve.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Transaction`, or `NotFound` for an unknown hash.
    async fn get_transaction(&self, hash: &str) -> Result<Transaction> {
        let variables = json!({ "hash": hash });
        let data: TransactionData =
            self.query("TransactionByHash", queries::TRANSACTION_BY_HASH, variables).await?;
        data.transaction.ok_or_else(|| ExplorerError::NotFound(format!("transaction {hash}")))
    }
}
