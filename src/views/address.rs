use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use bigdecimal::num_bigint::BigInt;

use crate::{
    aggregator::{
        summarize_account, token_transfer_row, transaction_row, AccountSummary, TokenTransferRow,
        TransactionRow,
    },
    client::Client,
    config::Config,
    error::Result,
    links,
    pagination::{LoadOutcome, PaginationController},
    traits::{AccountProvider, PriceProvider, TokenTransferProvider},
    types::{Account, TokenStandard, TokenTransfer, Transaction},
};

use super::{
    sources::{AccountTransactions, TokenTransfers},
    LoadState, TabKind, TabList,
};

/// How long the "Copied!" hint stays up after copying the address.
pub const COPY_FEEDBACK: Duration = Duration::from_secs(1);

/// Providers an address view queries.
#[derive(Clone)]
pub struct AddressProviders {
    pub accounts: Arc<dyn AccountProvider>,
    pub transfers: Arc<dyn TokenTransferProvider>,
    pub prices: Arc<dyn PriceProvider>,
}

impl AddressProviders {
    pub fn from_client(client: Arc<Client>) -> Self {
        Self { accounts: client.clone(), transfers: client.clone(), prices: client }
    }
}

struct TabLists {
    transactions: PaginationController<Transaction>,
    erc20: PaginationController<TokenTransfer>,
    erc721: PaginationController<TokenTransfer>,
    erc1155: PaginationController<TokenTransfer>,
}

impl TabLists {
    fn new(providers: &AddressProviders, address: &str, page_size: u32) -> Self {
        let tokens = |standard| {
            PaginationController::new(
                Arc::new(TokenTransfers::new(providers.transfers.clone(), address, standard)),
                page_size,
            )
        };
        Self {
            transactions: PaginationController::new(
                Arc::new(AccountTransactions::new(providers.accounts.clone(), address)),
                page_size,
            ),
            erc20: tokens(TokenStandard::Erc20),
            erc721: tokens(TokenStandard::Erc721),
            erc1155: tokens(TokenStandard::Erc1155),
        }
    }

    fn get(&self, kind: TabKind) -> TabList<'_> {
        match kind {
            TabKind::Transactions => TabList::Transactions(&self.transactions),
            TabKind::Erc20 => TabList::Erc20(&self.erc20),
            TabKind::Erc721 => TabList::Erc721(&self.erc721),
            TabKind::Erc1155 => TabList::Erc1155(&self.erc1155),
        }
    }

    fn tokens(&self, standard: TokenStandard) -> &PaginationController<TokenTransfer> {
        match standard {
            TokenStandard::Erc20 => &self.erc20,
            TokenStandard::Erc721 => &self.erc721,
            TokenStandard::Erc1155 => &self.erc1155,
        }
    }

    fn reset(&self) {
        self.transactions.reset();
        self.erc20.reset();
        self.erc721.reset();
        self.erc1155.reset();
    }
}

/// State of the address page: the account snapshot, its summary, the fiat
/// price, the active tab with one list per tab, and the copy hint.
pub struct AddressView {
    address: String,
    price_feed: String,
    providers: AddressProviders,
    account: LoadState<Account>,
    rate: LoadState<BigInt>,
    summary: Option<AccountSummary>,
    active_tab: TabKind,
    lists: TabLists,
    copied_at: Option<Instant>,
}

impl AddressView {
    pub fn new(
        address: impl Into<String>,
        providers: AddressProviders,
        page_size: u32,
        price_feed: impl Into<String>,
    ) -> Self {
        let address = address.into();
        let lists = TabLists::new(&providers, &address, page_size);
        Self {
            address,
            price_feed: price_feed.into(),
            providers,
            account: LoadState::Idle,
            rate: LoadState::Idle,
            summary: None,
            active_tab: TabKind::default(),
            lists,
            copied_at: None,
        }
    }

    pub fn from_config(address: impl Into<String>, client: Arc<Client>, config: &Config) -> Self {
        Self::new(
            address,
            AddressProviders::from_client(client),
            config.page_size,
            config.price_feed_address.clone(),
        )
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn path(&self) -> String {
        links::address_path(&self.address)
    }

    pub fn account(&self) -> &LoadState<Account> {
        &self.account
    }

    pub fn rate(&self) -> &LoadState<BigInt> {
        &self.rate
    }

    pub fn summary(&self) -> Option<&AccountSummary> {
        self.summary.as_ref()
    }

    /// Queries the account with its first transaction page and the price
    /// feed side by side. The two fail independently: a missing price only
    /// leaves the fiat value empty.
    pub async fn load(&mut self) {
        self.account = LoadState::Loading;
        self.rate = LoadState::Loading;
        self.summary = None;
        self.lists.reset();

        let page_size = self.lists.transactions.page_size();
        let (account, rate) = futures::join!(
            self.providers.accounts.get_account(&self.address, None, page_size),
            self.providers.prices.get_conversion_rate(&self.price_feed),
        );

        self.rate = LoadState::from_result(rate, "price");
        self.account = LoadState::from_result(account, "account");
        if let LoadState::Loaded(account) = &self.account {
            if let Some(txs) = &account.tx_list {
                self.lists.transactions.seed(txs.clone());
            }
        }
        self.recompute();
    }

    /// Retries the price feed alone.
    pub async fn reload_price(&mut self) {
        let rate = self.providers.prices.get_conversion_rate(&self.price_feed).await;
        self.rate = LoadState::from_result(rate, "price");
        self.recompute();
    }

    /// Rebuilds the summary from the current snapshot.
    pub fn recompute(&mut self) {
        self.summary = self
            .account
            .loaded()
            .map(|account| summarize_account(account, self.rate.loaded()));
    }

    pub fn active_tab(&self) -> TabKind {
        self.active_tab
    }

    pub fn select_tab(&mut self, kind: TabKind) {
        self.active_tab = kind;
    }

    /// Switches tab, fetching the first page of a token tab on first visit.
    pub async fn open_tab(&mut self, kind: TabKind) -> Result<LoadOutcome> {
        self.select_tab(kind);
        self.lists.get(kind).ensure_loaded().await
    }

    pub fn list(&self, kind: TabKind) -> TabList<'_> {
        self.lists.get(kind)
    }

    pub fn active_list(&self) -> TabList<'_> {
        self.lists.get(self.active_tab)
    }

    /// Loads the next page of the active tab.
    pub async fn load_more(&self) -> Result<LoadOutcome> {
        self.active_list().load_more().await
    }

    /// Count shown on a tab header.
    pub fn tab_count(&self, kind: TabKind) -> u64 {
        match kind {
            TabKind::Transactions => {
                self.account.loaded().map(|account| account.tx_count).unwrap_or(0)
            }
            _ => self.lists.get(kind).total_count(),
        }
    }

    pub fn transaction_rows(&self) -> Vec<TransactionRow> {
        self.lists
            .transactions
            .with_edges(|edges| edges.iter().map(|edge| transaction_row(&edge.node)).collect())
    }

    pub fn token_rows(&self, standard: TokenStandard) -> Vec<TokenTransferRow> {
        self.lists.tokens(standard).with_edges(|edges| {
            edges.iter().map(|edge| token_transfer_row(&edge.node, standard)).collect()
        })
    }

    /// Records a copy of the address; returns the text to put on the clipboard.
    pub fn mark_copied(&mut self, now: Instant) -> &str {
        self.copied_at = Some(now);
        &self.address
    }

    pub fn is_copied(&self, now: Instant) -> bool {
        self.copied_at
            .map(|at| now.saturating_duration_since(at) < COPY_FEEDBACK)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        pagination::PaginationStatus,
        testing::{
            account, connection, delegation, token_transfer, transaction, FakeAccounts, FixedPrice,
            QueuedPrices,
        },
    };
    use bigdecimal::BigDecimal;
    use std::{collections::HashMap, str::FromStr};

    const ADDRESS: &str = "0x00000000000000000000000000000000000000aa";

    fn tx_page(ids: &[u64], has_next: bool) -> crate::types::Connection<Transaction> {
        connection(ids.iter().map(|&n| (format!("t{n}"), transaction(n))).collect(), has_next, 5)
    }

    fn fake_accounts() -> FakeAccounts {
        let mut pages = HashMap::new();
        let delegations = vec![delegation(100, 1, Some(2)), delegation(50, 0, None)];
        pages.insert(
            (ADDRESS.to_owned(), None),
            account(ADDRESS, delegations.clone(), tx_page(&[1, 2], true)),
        );
        pages.insert(
            (ADDRESS.to_owned(), Some("t2".to_owned())),
            account(ADDRESS, delegations.clone(), tx_page(&[3, 4], true)),
        );
        pages.insert(
            (ADDRESS.to_owned(), Some("t4".to_owned())),
            account(ADDRESS, delegations, tx_page(&[5], false)),
        );

        let mut transfers = HashMap::new();
        transfers.insert(
            (TokenStandard::Erc20, None),
            connection(
                vec![("e1".to_owned(), token_transfer(1, TokenStandard::Erc20))],
                false,
                1,
            ),
        );

        FakeAccounts { pages, transfers, ..FakeAccounts::default() }
    }

    fn view(accounts: FakeAccounts, rate: Option<u64>) -> (AddressView, Arc<FakeAccounts>) {
        let accounts = Arc::new(accounts);
        let providers = AddressProviders {
            accounts: accounts.clone(),
            transfers: accounts.clone(),
            prices: Arc::new(FixedPrice(rate)),
        };
        (AddressView::new(ADDRESS, providers, 2, "0xfeed"), accounts)
    }

    #[tokio::test]
    async fn test_load_builds_summary_and_first_page() {
        let (mut view, _) = view(fake_accounts(), Some(25_000_000));
        view.load().await;

        let summary = view.summary().expect("summary after load");
        assert_eq!(summary.delegations.delegated, BigDecimal::from(150));
        assert_eq!(summary.delegations.pending_rewards, BigDecimal::from(2));
        assert_eq!(summary.delegations.claimed_rewards, BigDecimal::from(1));
        assert_eq!(summary.fiat_value, Some(BigDecimal::from(250)));

        assert_eq!(view.list(TabKind::Transactions).len(), 2);
        assert!(view.list(TabKind::Transactions).has_more());
        assert_eq!(view.tab_count(TabKind::Transactions), 5);
        assert_eq!(view.path(), format!("/address/{ADDRESS}"));
    }

    #[tokio::test]
    async fn test_price_failure_does_not_block_account() {
        let (mut view, _) = view(fake_accounts(), None);
        view.load().await;

        assert!(view.rate().is_unavailable());
        assert!(view.account().loaded().is_some());
        let summary = view.summary().unwrap();
        assert_eq!(summary.fiat_value, None);
        assert_eq!(summary.balance, BigDecimal::from_str("1000").unwrap());
    }

    #[tokio::test]
    async fn test_reload_price_recovers_fiat_value_only() {
        let accounts = Arc::new(fake_accounts());
        let prices = Arc::new(QueuedPrices::new(vec![None, Some(25_000_000)]));
        let providers = AddressProviders {
            accounts: accounts.clone(),
            transfers: accounts.clone(),
            prices: prices.clone(),
        };
        let mut view = AddressView::new(ADDRESS, providers, 2, "0xfeed");
        view.load().await;

        assert!(view.rate().is_unavailable());
        assert_eq!(view.summary().unwrap().fiat_value, None);
        let account_before = view.account().loaded().cloned();
        let rows_before = view.transaction_rows();

        view.reload_price().await;

        assert_eq!(view.rate().loaded(), Some(&BigInt::from(25_000_000u64)));
        assert_eq!(view.summary().unwrap().fiat_value, Some(BigDecimal::from(250)));
        assert_eq!(*prices.calls.lock().unwrap(), 2);

        // the account and its list are left as they were
        assert_eq!(accounts.calls.lock().unwrap().len(), 1);
        assert_eq!(view.account().loaded().cloned(), account_before);
        assert_eq!(view.transaction_rows(), rows_before);
        assert_eq!(view.list(TabKind::Transactions).status(), PaginationStatus::Ready);
    }

    #[tokio::test]
    async fn test_account_failure_is_unavailable() {
        let (mut view, _) = view(FakeAccounts::default(), Some(1));
        view.load().await;

        assert!(view.account().is_unavailable());
        assert!(view.summary().is_none());
        assert!(view.rate().loaded().is_some());
        assert_eq!(view.list(TabKind::Transactions).status(), PaginationStatus::Empty);
    }

    #[tokio::test]
    async fn test_transactions_tab_pages_through_account_query() {
        let (mut view, accounts) = view(fake_accounts(), Some(1));
        view.load().await;

        assert_eq!(view.load_more().await.unwrap(), LoadOutcome::Appended(2));
        assert_eq!(view.load_more().await.unwrap(), LoadOutcome::Appended(1));
        assert_eq!(view.load_more().await.unwrap(), LoadOutcome::Exhausted);

        let hashes: Vec<String> = view.transaction_rows().into_iter().map(|row| row.hash).collect();
        let expected: Vec<String> = (1..=5).map(|n| transaction(n).hash).collect();
        assert_eq!(hashes, expected);

        let cursors: Vec<Option<String>> =
            accounts.calls.lock().unwrap().iter().map(|(_, cursor)| cursor.clone()).collect();
        assert_eq!(cursors, vec![None, Some("t2".to_owned()), Some("t4".to_owned())]);
    }

    #[tokio::test]
    async fn test_token_tabs_load_lazily_and_independently() {
        let (mut view, _) = view(fake_accounts(), Some(1));
        view.load().await;

        assert_eq!(view.list(TabKind::Erc20).status(), PaginationStatus::Empty);
        assert_eq!(view.open_tab(TabKind::Erc20).await.unwrap(), LoadOutcome::Appended(1));
        assert_eq!(view.active_tab(), TabKind::Erc20);
        assert_eq!(view.tab_count(TabKind::Erc20), 1);
        assert_eq!(view.token_rows(TokenStandard::Erc20).len(), 1);

        // reopening does not refetch
        assert_eq!(view.open_tab(TabKind::Erc20).await.unwrap(), LoadOutcome::Exhausted);

        // other tabs are untouched
        assert_eq!(view.list(TabKind::Erc721).status(), PaginationStatus::Empty);
        assert_eq!(view.list(TabKind::Transactions).len(), 2);

        // an empty ERC-1155 list
        view.open_tab(TabKind::Erc1155).await.unwrap();
        assert!(view.active_list().is_empty());
        assert_eq!(view.active_list().status(), PaginationStatus::Exhausted);
        assert_eq!(TabKind::from_index(view.active_tab().index()), Some(TabKind::Erc1155));
    }

    #[tokio::test]
    async fn test_stalled_tab_stops_offering_more() {
        let mut accounts = fake_accounts();
        accounts.transfers.insert((TokenStandard::Erc721, None), connection(vec![], true, 3));
        let (mut view, _) = view(accounts, Some(1));
        view.load().await;

        assert_eq!(view.open_tab(TabKind::Erc721).await.unwrap(), LoadOutcome::Stalled);
        let list = view.active_list();
        assert_eq!(list.status(), PaginationStatus::Stalled);
        assert!(!list.can_load_more());
        assert_eq!(view.load_more().await.unwrap(), LoadOutcome::Stalled);

        // the transactions tab is still open for more
        assert!(view.list(TabKind::Transactions).can_load_more());
    }

    #[tokio::test]
    async fn test_copy_feedback_expires() {
        let (mut view, _) = view(FakeAccounts::default(), None);
        let start = Instant::now();

        assert!(!view.is_copied(start));
        assert_eq!(view.mark_copied(start), ADDRESS);
        assert!(view.is_copied(start + Duration::from_millis(500)));
        assert!(!view.is_copied(start + COPY_FEEDBACK));
    }
}
