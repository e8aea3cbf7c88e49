//! Per-page view state.
//!
//! Each view owns its snapshot, its derived summary and its pagination
//! state; nothing is shared between views. Derived values are recomputed
//! explicitly right after a query resolves.

pub mod address;
pub mod block;
pub mod sources;

pub use address::*;
pub use block::*;

use std::fmt;

use crate::{
    error::Result,
    pagination::{LoadOutcome, PaginationController, PaginationStatus},
    types::{TokenStandard, TokenTransfer, Transaction},
};

/// Load state of one display region.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Loaded(T),
    /// The request failed; the region shows as unavailable until reloaded.
    Unavailable(String),
}

impl<T> LoadState<T> {
    pub(crate) fn from_result(result: Result<T>, region: &str) -> Self {
        match result {
            Ok(value) => LoadState::Loaded(value),
            Err(err) => {
                tracing::warn!(region, error = %err, "Request failed, region unavailable");
                LoadState::Unavailable(err.to_string())
            }
        }
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, LoadState::Unavailable(_))
    }
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Idle
    }
}

/// Tabs of the address page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TabKind {
    #[default]
    Transactions,
    Erc20,
    Erc721,
    Erc1155,
}

impl TabKind {
    pub const ALL: [TabKind; 4] =
        [TabKind::Transactions, TabKind::Erc20, TabKind::Erc721, TabKind::Erc1155];

    pub fn index(&self) -> usize {
        match self {
            TabKind::Transactions => 0,
            TabKind::Erc20 => 1,
            TabKind::Erc721 => 2,
            TabKind::Erc1155 => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn standard(&self) -> Option<TokenStandard> {
        match self {
            TabKind::Transactions => None,
            TabKind::Erc20 => Some(TokenStandard::Erc20),
            TabKind::Erc721 => Some(TokenStandard::Erc721),
            TabKind::Erc1155 => Some(TokenStandard::Erc1155),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TabKind::Transactions => "Transactions",
            TabKind::Erc20 => "ERC-20 Token Txns",
            TabKind::Erc721 => "ERC-721 Token Txns",
            TabKind::Erc1155 => "ERC-1155 Token Txns",
        }
    }
}

impl From<TokenStandard> for TabKind {
    fn from(standard: TokenStandard) -> Self {
        match standard {
            TokenStandard::Erc20 => TabKind::Erc20,
            TokenStandard::Erc721 => TabKind::Erc721,
            TokenStandard::Erc1155 => TabKind::Erc1155,
        }
    }
}

impl fmt::Display for TabKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The list behind one tab. Each variant wraps its own controller, so
/// paging one tab never touches another's state.
#[derive(Clone, Copy)]
pub enum TabList<'a> {
    Transactions(&'a PaginationController<Transaction>),
    Erc20(&'a PaginationController<TokenTransfer>),
    Erc721(&'a PaginationController<TokenTransfer>),
    Erc1155(&'a PaginationController<TokenTransfer>),
}

impl<'a> TabList<'a> {
    pub fn kind(&self) -> TabKind {
        match self {
            TabList::Transactions(_) => TabKind::Transactions,
            TabList::Erc20(_) => TabKind::Erc20,
            TabList::Erc721(_) => TabKind::Erc721,
            TabList::Erc1155(_) => TabKind::Erc1155,
        }
    }

    fn tokens(&self) -> Option<&'a PaginationController<TokenTransfer>> {
        match *self {
            TabList::Transactions(_) => None,
            TabList::Erc20(list) | TabList::Erc721(list) | TabList::Erc1155(list) => Some(list),
        }
    }

    pub async fn load_more(&self) -> Result<LoadOutcome> {
        match *self {
            TabList::Transactions(list) => list.load_more().await,
            TabList::Erc20(list) | TabList::Erc721(list) | TabList::Erc1155(list) => {
                list.load_more().await
            }
        }
    }

    /// Fetches the first page of a token tab that has never been loaded.
    pub(crate) async fn ensure_loaded(&self) -> Result<LoadOutcome> {
        match self.tokens() {
            Some(list) if list.status() == PaginationStatus::Empty => list.load_first().await,
            _ => Ok(LoadOutcome::Exhausted),
        }
    }

    pub fn status(&self) -> PaginationStatus {
        match *self {
            TabList::Transactions(list) => list.status(),
            TabList::Erc20(list) | TabList::Erc721(list) | TabList::Erc1155(list) => list.status(),
        }
    }

    pub fn has_more(&self) -> bool {
        match *self {
            TabList::Transactions(list) => list.has_more(),
            TabList::Erc20(list) | TabList::Erc721(list) | TabList::Erc1155(list) => {
                list.has_more()
            }
        }
    }

    pub fn can_load_more(&self) -> bool {
        match *self {
            TabList::Transactions(list) => list.can_load_more(),
            TabList::Erc20(list) | TabList::Erc721(list) | TabList::Erc1155(list) => {
                list.can_load_more()
            }
        }
    }

    pub fn len(&self) -> usize {
        match *self {
            TabList::Transactions(list) => list.len(),
            TabList::Erc20(list) | TabList::Erc721(list) | TabList::Erc1155(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn total_count(&self) -> u64 {
        match *self {
            TabList::Transactions(list) => list.total_count(),
            TabList::Erc20(list) | TabList::Erc721(list) | TabList::Erc1155(list) => {
                list.total_count()
            }
        }
    }
}
