//! In-memory providers and fixtures shared by the unit tests.

use std::{
    collections::{HashMap, VecDeque},
    sync::Mutex,
};

use async_trait::async_trait;
use bigdecimal::num_bigint::BigInt;

use crate::{
    error::{ExplorerError, Result},
    pagination::PageSource,
    traits::{AccountProvider, BlockProvider, PriceProvider, TokenTransferProvider},
    types::{
        Account, Block, BlockRef, Connection, Delegation, Edge, PageInfo, PendingRewards,
        TokenStandard, TokenTransfer, Transaction,
    },
};

pub const WEI: u64 = 1_000_000_000_000_000_000;

pub fn wei(whole: u64) -> BigInt {
    BigInt::from(whole) * BigInt::from(WEI)
}

/// A page of bare ids whose cursors are `c{id}`.
pub fn page(ids: &[u32], has_next: bool) -> Connection<u32> {
    Connection {
        page_info: PageInfo { has_next, ..PageInfo::default() },
        total_count: ids.len() as u64,
        edges: ids.iter().map(|id| Edge { cursor: format!("c{id}"), node: *id }).collect(),
    }
}

pub fn connection<T>(nodes: Vec<(String, T)>, has_next: bool, total_count: u64) -> Connection<T> {
    Connection {
        page_info: PageInfo { has_next, ..PageInfo::default() },
        total_count,
        edges: nodes.into_iter().map(|(cursor, node)| Edge { cursor, node }).collect(),
    }
}

pub fn transaction(n: u64) -> Transaction {
    Transaction {
        hash: format!("0x{n:064x}"),
        from: "0x00000000000000000000000000000000000000aa".to_owned(),
        to: Some("0x00000000000000000000000000000000000000bb".to_owned()),
        value: wei(n),
        gas_used: 21_000,
        block: Some(BlockRef { number: 100, timestamp: 1_700_000_000 }),
        token_transactions: Vec::new(),
    }
}

pub fn delegation(amount: u64, claimed: u64, pending: Option<u64>) -> Delegation {
    Delegation {
        to_staker_id: 1,
        created_time: 1_600_000_000,
        amount: wei(amount),
        claimed_reward: wei(claimed),
        pending_rewards: pending.map(|p| PendingRewards { amount: wei(p) }),
    }
}

pub fn account(address: &str, delegations: Vec<Delegation>, txs: Connection<Transaction>) -> Account {
    let delegations = connection(
        delegations.into_iter().enumerate().map(|(i, d)| (format!("d{i}"), Some(d))).collect(),
        false,
        0,
    );
    Account {
        address: address.to_owned(),
        contract: None,
        balance: wei(1_000),
        total_value: wei(1_200),
        tx_count: txs.total_count,
        tx_list: Some(txs),
        staker: None,
        delegations: Some(delegations),
    }
}

pub fn block(number: u64) -> Block {
    Block {
        number,
        hash: format!("0x{number:064x}"),
        parent: number.checked_sub(1).map(|parent| crate::types::ParentBlock {
            hash: format!("0x{parent:064x}"),
        }),
        timestamp: 1_700_000_000 + number,
        transaction_count: 1,
        tx_list: vec![transaction(number)],
    }
}

/// Replays queued pages in order and records the cursor of every request.
pub struct ScriptedSource<T> {
    pages: Mutex<VecDeque<Result<Connection<T>>>>,
    requests: Mutex<Vec<Option<String>>>,
}

impl<T> ScriptedSource<T> {
    pub fn new(pages: Vec<Result<Connection<T>>>) -> Self {
        Self { pages: Mutex::new(pages.into()), requests: Mutex::new(Vec::new()) }
    }

    pub fn requests(&self) -> Vec<Option<String>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl<T: Send + 'static> PageSource<T> for ScriptedSource<T> {
    async fn fetch_page(&self, cursor: Option<&str>, _count: u32) -> Result<Connection<T>> {
        self.requests.lock().unwrap().push(cursor.map(str::to_owned));
        // hand control back so callers can observe the request as pending
        tokio::task::yield_now().await;
        self.pages.lock().unwrap().pop_front().unwrap_or_else(|| Err(ExplorerError::EmptyResponse))
    }
}

/// Serves accounts keyed by `(address, cursor)`.
#[derive(Default)]
pub struct FakeAccounts {
    pub pages: HashMap<(String, Option<String>), Account>,
    pub transfers: HashMap<(TokenStandard, Option<String>), Connection<TokenTransfer>>,
    pub calls: Mutex<Vec<(String, Option<String>)>>,
}

#[async_trait]
impl AccountProvider for FakeAccounts {
    async fn get_account(&self, address: &str, cursor: Option<&str>, _count: u32) -> Result<Account> {
        self.calls.lock().unwrap().push((address.to_owned(), cursor.map(str::to_owned)));
        self.pages
            .get(&(address.to_owned(), cursor.map(str::to_owned)))
            .cloned()
            .ok_or_else(|| ExplorerError::NotFound(format!("account {address}")))
    }
}

#[async_trait]
impl TokenTransferProvider for FakeAccounts {
    async fn get_token_transfers(
        &self,
        _address: &str,
        standard: TokenStandard,
        cursor: Option<&str>,
        _count: u32,
    ) -> Result<Connection<TokenTransfer>> {
        Ok(self.transfers.get(&(standard, cursor.map(str::to_owned))).cloned().unwrap_or_default())
    }
}

pub struct FakeBlocks;

#[async_trait]
impl BlockProvider for FakeBlocks {
    async fn get_block_by_number(&self, number: u64) -> Result<Block> {
        if number > 1_000 {
            return Err(ExplorerError::NotFound(format!("block {number}")));
        }
        Ok(block(number))
    }
}

pub struct FixedPrice(pub Option<u64>);

#[async_trait]
impl PriceProvider for FixedPrice {
    async fn get_conversion_rate(&self, _feed_address: &str) -> Result<BigInt> {
        match self.0 {
            Some(rate) => Ok(BigInt::from(rate)),
            None => Err(ExplorerError::Rpc { code: -32000, message: "execution reverted".into() }),
        }
    }
}

/// Answers rate requests from a queue; `None` entries fail. Counts calls.
#[derive(Default)]
pub struct QueuedPrices {
    pub answers: Mutex<VecDeque<Option<u64>>>,
    pub calls: Mutex<usize>,
}

impl QueuedPrices {
    pub fn new(answers: Vec<Option<u64>>) -> Self {
        Self { answers: Mutex::new(answers.into()), calls: Mutex::new(0) }
    }
}

#[async_trait]
impl PriceProvider for QueuedPrices {
    async fn get_conversion_rate(&self, feed_address: &str) -> Result<BigInt> {
        *self.calls.lock().unwrap() += 1;
        let answer = self.answers.lock().unwrap().pop_front().flatten();
        FixedPrice(answer).get_conversion_rate(feed_address).await
    }
}

pub fn token_transfer(n: u64, standard: TokenStandard) -> TokenTransfer {
    TokenTransfer {
        trx_hash: format!("0x{n:064x}"),
        transaction: None,
        trx_index: 0,
        token_address: "0x04068da6c83afcfa0e13ba15a6696662335d5b75".to_owned(),
        token: None,
        token_type: Some(standard.label().replace('-', "")),
        kind: Some("TRANSFER".to_owned()),
        sender: "0xaa".to_owned(),
        recipient: "0xbb".to_owned(),
        token_id: BigInt::from(n),
        amount: BigInt::from(n),
    }
}
