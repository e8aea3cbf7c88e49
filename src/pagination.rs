//! "Load more" over a cursor-paginated connection.
//!
//! A [`PaginationController`] accumulates the edges of successive pages in
//! server order. The cursor of the last held edge is the only token used to
//! ask for the next page, and a page reporting `hasNext = false` ends the
//! list for good.
//!
//! At most one request is in flight per controller: a call made while one
//! is pending returns [`LoadOutcome::InFlight`] without touching the network.
//! [`PaginationController::reset`] bumps a generation counter so that a
//! response arriving for an earlier generation is dropped instead of merged.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::{
    error::Result,
    types::{Connection, Edge, PageInfo},
};

/// Fetches one page of a connection.
#[async_trait]
pub trait PageSource<T>: Send + Sync {
    async fn fetch_page(&self, cursor: Option<&str>, count: u32) -> Result<Connection<T>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationStatus {
    /// Nothing loaded yet.
    Empty,
    /// The last page said more are available.
    Ready,
    /// The server reported the last page.
    Exhausted,
    /// The server claimed more pages but sent an empty one.
    Stalled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was merged; carries the number of edges it added.
    Appended(usize),
    /// Another load is pending, nothing was requested.
    InFlight,
    /// No further page is available.
    Exhausted,
    /// Pagination stalled; the list will not request more pages.
    Stalled,
    /// The list was reset while the request was pending; the page was dropped.
    Stale,
}

struct PageState<T> {
    edges: Vec<Edge<T>>,
    page_info: PageInfo,
    total_count: u64,
    status: PaginationStatus,
    generation: u64,
    in_flight: Option<u64>,
}

impl<T> PageState<T> {
    fn new(generation: u64) -> Self {
        Self {
            edges: Vec::new(),
            page_info: PageInfo::default(),
            total_count: 0,
            status: PaginationStatus::Empty,
            generation,
            in_flight: None,
        }
    }

    fn append(&mut self, page: Connection<T>) -> LoadOutcome {
        self.total_count = page.total_count;
        if page.edges.is_empty() && page.page_info.has_next {
            tracing::warn!(
                held = self.edges.len(),
                "Server reported more pages but returned none, stopping pagination"
            );
            self.status = PaginationStatus::Stalled;
            return LoadOutcome::Stalled;
        }

        let received = page.edges.len();
        self.edges.extend(page.edges);
        self.status = if page.page_info.has_next {
            PaginationStatus::Ready
        } else {
            PaginationStatus::Exhausted
        };
        self.page_info = page.page_info;
        LoadOutcome::Appended(received)
    }

    fn replace(&mut self, page: Connection<T>) -> LoadOutcome {
        self.edges.clear();
        self.page_info = page.page_info.clone();
        self.append(page)
    }
}

fn lock<S>(mutex: &Mutex<S>) -> MutexGuard<'_, S> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Marks a request as in flight; releases the mark if the request future is
/// dropped before it completes.
struct InFlightGuard<'a, T> {
    state: &'a Mutex<PageState<T>>,
    generation: u64,
    done: bool,
}

impl<'a, T> InFlightGuard<'a, T> {
    fn complete(
        mut self,
        apply: impl FnOnce(&mut PageState<T>) -> Result<LoadOutcome>,
    ) -> Result<LoadOutcome> {
        self.done = true;
        let mut state = lock(self.state);
        if state.generation != self.generation {
            tracing::debug!(
                requested = self.generation,
                current = state.generation,
                "Dropping response for a reset list"
            );
            return Ok(LoadOutcome::Stale);
        }
        state.in_flight = None;
        apply(&mut *state)
    }
}

impl<T> Drop for InFlightGuard<'_, T> {
    fn drop(&mut self) {
        if self.done {
            return;
        }
        let mut state = lock(self.state);
        if state.in_flight == Some(self.generation) {
            state.in_flight = None;
        }
    }
}

pub struct PaginationController<T> {
    source: Arc<dyn PageSource<T>>,
    page_size: u32,
    state: Mutex<PageState<T>>,
}

impl<T: Send + 'static> PaginationController<T> {
    pub fn new(source: Arc<dyn PageSource<T>>, page_size: u32) -> Self {
        Self { source, page_size, state: Mutex::new(PageState::new(0)) }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Whether the latest page reported a next one.
    pub fn has_more(&self) -> bool {
        lock(&self.state).page_info.has_next
    }

    /// Whether another `load_more` would issue a request. Unlike
    /// [`Self::has_more`] this is false once the list has stalled.
    pub fn can_load_more(&self) -> bool {
        lock(&self.state).status == PaginationStatus::Ready
    }

    /// Cursor of the last held edge, `None` while the list is empty.
    pub fn next_cursor(&self) -> Option<String> {
        lock(&self.state).edges.last().map(|edge| edge.cursor.clone())
    }

    pub fn status(&self) -> PaginationStatus {
        lock(&self.state).status
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).in_flight.is_some()
    }

    pub fn page_info(&self) -> PageInfo {
        lock(&self.state).page_info.clone()
    }

    /// Total size of the list as reported by the latest page.
    pub fn total_count(&self) -> u64 {
        lock(&self.state).total_count
    }

    pub fn len(&self) -> usize {
        lock(&self.state).edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn with_edges<R>(&self, f: impl FnOnce(&[Edge<T>]) -> R) -> R {
        f(&lock(&self.state).edges)
    }

    /// Installs a first page fetched elsewhere, e.g. alongside its parent
    /// entity. Pending requests are invalidated.
    pub fn seed(&self, page: Connection<T>) -> LoadOutcome {
        let mut state = lock(&self.state);
        state.generation += 1;
        state.in_flight = None;
        state.replace(page)
    }

    /// Drops everything held and invalidates pending requests.
    pub fn reset(&self) {
        let mut state = lock(&self.state);
        let generation = state.generation + 1;
        *state = PageState::new(generation);
    }

    fn mark_in_flight<'a>(
        &'a self,
        state: &mut PageState<T>,
    ) -> InFlightGuard<'a, T> {
        state.in_flight = Some(state.generation);
        InFlightGuard { state: &self.state, generation: state.generation, done: false }
    }

    /// Fetches the first page, replacing whatever the list held.
    pub async fn load_first(&self) -> Result<LoadOutcome> {
        let guard = {
            let mut state = lock(&self.state);
            if state.in_flight.is_some() {
                return Ok(LoadOutcome::InFlight);
            }
            self.mark_in_flight(&mut state)
        };

        tracing::debug!(count = self.page_size, "Loading first page");
        let page = self.source.fetch_page(None, self.page_size).await;
        guard.complete(|state| Ok(state.replace(page?)))
    }

    /// Fetches the page after the last held edge and appends it.
    ///
    /// A no-op unless the latest page reported `hasNext` and at least one
    /// edge is held. A failed request leaves the held edges untouched.
    pub async fn load_more(&self) -> Result<LoadOutcome> {
        let (cursor, guard) = {
            let mut state = lock(&self.state);
            if state.in_flight.is_some() {
                return Ok(LoadOutcome::InFlight);
            }
            match state.status {
                PaginationStatus::Stalled => return Ok(LoadOutcome::Stalled),
                PaginationStatus::Exhausted => return Ok(LoadOutcome::Exhausted),
                PaginationStatus::Empty | PaginationStatus::Ready => {}
            }
            let cursor = match (state.page_info.has_next, state.edges.last()) {
                (true, Some(edge)) => edge.cursor.clone(),
                _ => return Ok(LoadOutcome::Exhausted),
            };
            (cursor, self.mark_in_flight(&mut state))
        };

        tracing::debug!(%cursor, count = self.page_size, "Loading next page");
        let page = self.source.fetch_page(Some(&cursor), self.page_size).await;
        guard.complete(|state| Ok(state.append(page?)))
    }
}

impl<T: Clone + Send + 'static> PaginationController<T> {
    pub fn edges(&self) -> Vec<Edge<T>> {
        self.with_edges(|edges| edges.to_vec())
    }

    pub fn nodes(&self) -> Vec<T> {
        self.with_edges(|edges| edges.iter().map(|edge| edge.node.clone()).collect())
    }
}
