use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::{
    convert::integer_to_hex,
    error::{ExplorerError, Result},
    traits::BlockProvider,
    types::Block,
};

use super::{queries, Client};

#[derive(Deserialize)]
struct BlockData {
    block: Option<Block>,
}

#[async_trait]
impl BlockProvider for Client {
    // Get a block by height.
    // query BlockByNumber($number: Long), the height goes over the wire as hex
    async fn get_block_by_number(&self, number: u64) -> Result<Block> {
        let variables = json!({ "number": integer_to_hex(number) });
        let data: BlockData =
            self.query("BlockByNumber", queries::BLOCK_BY_NUMBER, variables).await?;
        data.block.ok_or_else(|| ExplorerError::NotFound(format!("block {number}")))
    }
}
