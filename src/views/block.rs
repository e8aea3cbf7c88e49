use std::sync::Arc;

use crate::{
    aggregator::{summarize_block, BlockSummary},
    links,
    traits::BlockProvider,
    types::Block,
};

use super::LoadState;

/// State of the block page.
pub struct BlockView {
    number: u64,
    blocks: Arc<dyn BlockProvider>,
    block: LoadState<Block>,
    summary: Option<BlockSummary>,
}

impl BlockView {
    pub fn new(number: u64, blocks: Arc<dyn BlockProvider>) -> Self {
        Self { number, blocks, block: LoadState::Idle, summary: None }
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn block(&self) -> &LoadState<Block> {
        &self.block
    }

    pub fn summary(&self) -> Option<&BlockSummary> {
        self.summary.as_ref()
    }

    pub fn path(&self) -> String {
        links::block_path(self.number)
    }

    pub async fn load(&mut self) {
        self.block = LoadState::Loading;
        self.summary = None;
        let block = self.blocks.get_block_by_number(self.number).await;
        self.block = LoadState::from_result(block, "block");
        self.summary = self.block.loaded().map(summarize_block);
    }

    /// Number of the preceding block; `None` at genesis.
    pub fn previous(&self) -> Option<u64> {
        self.number.checked_sub(1)
    }

    pub fn next(&self) -> u64 {
        self.number.saturating_add(1)
    }

    /// A fresh, unloaded view of the preceding block.
    pub fn previous_view(&self) -> Option<BlockView> {
        self.previous().map(|number| BlockView::new(number, self.blocks.clone()))
    }

    /// A fresh, unloaded view of the following block. Whether it exists is
    /// only known once it is loaded.
    pub fn next_view(&self) -> BlockView {
        BlockView::new(self.next(), self.blocks.clone())
    }
}
