use crate::domain::a001_transactions::controller::SearchStore;
use crate::domain::a001_transactions::error::SearchError;
use crate::domain::a001_transactions::pagination::Pagination;
use crate::domain::a001_transactions::query::Query;
use contracts::domain::a001_transactions::SearchResult;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub enum SearchStatus {
    Idle,
    Loading,
    Loaded,
    Failed(SearchError),
}

#[derive(Clone, Debug)]
pub struct SearchState {
    /// Query of the last successful search
    pub query: Query,
    pub result: SearchResult,
    pub pagination: Pagination,
    pub status: SearchStatus,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: Query::default(),
            result: SearchResult::default(),
            pagination: Pagination::new(1, 0, Query::default().count),
            status: SearchStatus::Idle,
        }
    }
}

impl SearchState {
    pub fn with_page_size(count: u32) -> Self {
        let query = Query {
            count,
            ..Query::default()
        };
        Self {
            pagination: Pagination::new(query.offset, 0, query.count),
            query,
            ..Self::default()
        }
    }

    pub fn begin_request(&mut self) {
        self.status = SearchStatus::Loading;
    }

    /// The result replaces the previous one entirely
    pub fn receive(&mut self, query: Query, result: SearchResult) {
        self.pagination = Pagination::new(query.offset, result.total.count, query.count);
        self.query = query;
        self.result = result;
        self.status = SearchStatus::Loaded;
    }

    /// Keeps the last good query and result on screen
    pub fn fail(&mut self, error: SearchError) {
        self.status = SearchStatus::Failed(error);
    }

    pub fn is_loading(&self) -> bool {
        self.status == SearchStatus::Loading
    }
}

/// Reactive store shared by the transactions page and its controls
#[derive(Clone, Copy)]
pub struct TransactionsStore {
    pub state: RwSignal<SearchState>,
}

impl TransactionsStore {
    pub fn new(page_size: u32) -> Self {
        Self {
            state: RwSignal::new(SearchState::with_page_size(page_size)),
        }
    }
}

impl SearchStore for TransactionsStore {
    fn query(&self) -> Query {
        self.state.with_untracked(|s| s.query.clone())
    }

    fn request_search(&self) {
        self.state.update(|s| s.begin_request());
    }

    fn receive_search(&self, query: Query, result: SearchResult) {
        self.state.update(|s| s.receive(query, result));
    }

    fn fail_search(&self, query: Query, error: SearchError) {
        log::debug!("Search failed for offset {}: {}", query.offset, error);
        self.state.update(|s| s.fail(error));
    }
}
