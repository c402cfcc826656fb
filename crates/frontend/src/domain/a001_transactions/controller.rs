//! Search controller: keeps the query in the URL, the store and the
//! remote search in agreement.
//!
//! Every entry point builds a new `Query`, signals "loading" to the store,
//! runs the search and hands query + result back to the store. Only
//! user-triggered searches are written back to the URL; navigation-triggered
//! ones came from the URL in the first place.
//!
//! Searches may overlap (nothing is cancelled). Each one takes a request id
//! and only the most recently dispatched one may update the store.

use super::columns::{accessor_for_column_index, COLUMNS};
use super::error::SearchError;
use super::query::{FilterChange, Query};
use super::query_codec::{decode_or, encode, to_iso_dates};
use async_trait::async_trait;
use contracts::domain::a001_transactions::{QueryParams, SearchResult, SortOrder};
use std::cell::{Cell, RefCell};

/// Remote transactions search
#[async_trait(?Send)]
pub trait SearchClient {
    async fn search(&self, params: &QueryParams) -> Result<SearchResult, SearchError>;
}

/// External page state the controller reports to
pub trait SearchStore {
    /// Query of the last successful search (the retained query)
    fn query(&self) -> Query;

    /// A search is in flight
    fn request_search(&self);

    fn receive_search(&self, query: Query, result: SearchResult);

    fn fail_search(&self, query: Query, error: SearchError);
}

/// Browser history, reduced to what the controller writes
pub trait UrlHistory {
    /// Replace the current entry's query string (`"?a=1"`, or `""` for none)
    fn replace_search(&self, search: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Navigation,
    User,
}

pub struct SearchController<C, S, H> {
    client: C,
    store: S,
    history: H,
    /// Last query string seen in (or written to) the URL
    last_search: RefCell<Option<String>>,
    latest_request: Cell<u64>,
    failed: RefCell<Option<(Query, Trigger)>>,
}

impl<C, S, H> SearchController<C, S, H>
where
    C: SearchClient,
    S: SearchStore,
    H: UrlHistory,
{
    pub fn new(client: C, store: S, history: H) -> Self {
        Self {
            client,
            store,
            history,
            last_search: RefCell::new(None),
            latest_request: Cell::new(0),
            failed: RefCell::new(None),
        }
    }

    /// Mount and browser navigation. The same query string twice in a row
    /// searches once.
    pub async fn on_navigate(&self, search: &str) -> Result<(), SearchError> {
        if self.last_search.borrow().as_deref() == Some(search) {
            log::debug!("Navigation to '{}' already handled", search);
            return Ok(());
        }
        self.last_search.replace(Some(search.to_string()));

        let query = decode_or(search, &self.store.query());
        self.run(query, Trigger::Navigation).await
    }

    pub async fn on_filter_change(&self, change: FilterChange) -> Result<(), SearchError> {
        let query = self.store.query().with_filters(change);
        self.run(query, Trigger::User).await
    }

    /// `page` is 1-based and becomes the new offset
    pub async fn on_page_change(&self, page: u32) -> Result<(), SearchError> {
        let query = self.store.query().with_page(page);
        self.run(query, Trigger::User).await
    }

    pub async fn on_page_count_change(&self, count: u32) -> Result<(), SearchError> {
        let query = self.store.query().with_page_count(count);
        self.run(query, Trigger::User).await
    }

    /// Sort by the column at `index`. An index the registry can't resolve is
    /// rejected before anything is dispatched.
    pub async fn on_order_change(&self, index: usize, order: SortOrder) -> Result<(), SearchError> {
        let field = sort_field_for_column(index)?;
        let query = self.store.query().with_sort(field, order);
        self.run(query, Trigger::User).await
    }

    /// Re-run the last failed search. Does nothing if the last search succeeded.
    pub async fn retry(&self) -> Result<(), SearchError> {
        let failed = self.failed.borrow_mut().take();
        match failed {
            Some((query, trigger)) => {
                log::info!("Retrying search (offset={}, count={})", query.offset, query.count);
                self.run(query, trigger).await
            }
            None => Ok(()),
        }
    }

    async fn run(&self, query: Query, trigger: Trigger) -> Result<(), SearchError> {
        let request_id = self.latest_request.get() + 1;
        self.latest_request.set(request_id);

        let params = to_iso_dates(&query);
        log::debug!("Search #{} ({:?}): {:?}", request_id, trigger, params);
        self.store.request_search();

        let outcome = self.client.search(&params).await;

        if request_id != self.latest_request.get() {
            log::debug!(
                "Dropping response of search #{}, #{} is newer",
                request_id,
                self.latest_request.get()
            );
            return Ok(());
        }

        match outcome {
            Ok(result) => {
                self.failed.replace(None);
                log::debug!(
                    "Search #{} returned {} of {} transactions",
                    request_id,
                    result.list.rows.len(),
                    result.total.count
                );
                self.store.receive_search(query, result);
                if trigger == Trigger::User {
                    self.push_url(&params)?;
                }
                Ok(())
            }
            Err(e) => {
                log::error!("Search #{} failed: {}", request_id, e);
                self.failed.replace(Some((query.clone(), trigger)));
                self.store.fail_search(query, e.clone());
                Err(e)
            }
        }
    }

    fn push_url(&self, params: &QueryParams) -> Result<(), SearchError> {
        let encoded = encode(params)?;
        let search = if encoded.is_empty() {
            String::new()
        } else {
            format!("?{}", encoded)
        };
        self.history.replace_search(&search);
        // The navigation event echoing this write must not search again
        self.last_search.replace(Some(search));
        Ok(())
    }
}

/// Sort field path for a clicked column header
pub fn sort_field_for_column(index: usize) -> Result<Vec<String>, SearchError> {
    let accessor = accessor_for_column_index(index).ok_or(SearchError::UnknownColumn(index))?;
    if !COLUMNS[index].orderable {
        return Err(SearchError::ColumnNotOrderable(index));
    }
    Ok(accessor.iter().map(|segment| segment.to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_transactions::query::DateRange;
    use chrono::{TimeZone, Utc};
    use contracts::domain::a001_transactions::{Sort, Total};
    use std::collections::{BTreeMap, VecDeque};
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct FakeClient {
        calls: Rc<RefCell<Vec<QueryParams>>>,
        /// Scripted outcomes; an empty script answers with `result(1)`
        outcomes: Rc<RefCell<VecDeque<Result<SearchResult, SearchError>>>>,
        /// How many times each call yields before answering
        delays: Rc<RefCell<VecDeque<usize>>>,
    }

    #[async_trait(?Send)]
    impl SearchClient for FakeClient {
        async fn search(&self, params: &QueryParams) -> Result<SearchResult, SearchError> {
            self.calls.borrow_mut().push(params.clone());
            let delay = self.delays.borrow_mut().pop_front().unwrap_or(0);
            let outcome = self.outcomes.borrow_mut().pop_front();
            for _ in 0..delay {
                tokio::task::yield_now().await;
            }
            outcome.unwrap_or_else(|| Ok(result(1)))
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Request,
        Receive(Query, SearchResult),
        Fail(Query, SearchError),
    }

    #[derive(Clone, Default)]
    struct FakeStore {
        retained: Rc<RefCell<Query>>,
        events: Rc<RefCell<Vec<Event>>>,
    }

    impl SearchStore for FakeStore {
        fn query(&self) -> Query {
            self.retained.borrow().clone()
        }

        fn request_search(&self) {
            self.events.borrow_mut().push(Event::Request);
        }

        fn receive_search(&self, query: Query, result: SearchResult) {
            self.retained.replace(query.clone());
            self.events.borrow_mut().push(Event::Receive(query, result));
        }

        fn fail_search(&self, query: Query, error: SearchError) {
            self.events.borrow_mut().push(Event::Fail(query, error));
        }
    }

    #[derive(Clone, Default)]
    struct FakeHistory {
        writes: Rc<RefCell<Vec<String>>>,
    }

    impl UrlHistory for FakeHistory {
        fn replace_search(&self, search: &str) {
            self.writes.borrow_mut().push(search.to_string());
        }
    }

    type Controller = SearchController<FakeClient, FakeStore, FakeHistory>;

    fn result(count: u64) -> SearchResult {
        SearchResult {
            total: Total {
                count,
                payment: None,
            },
            ..SearchResult::default()
        }
    }

    fn setup() -> (Controller, FakeClient, FakeStore, FakeHistory) {
        let client = FakeClient::default();
        let store = FakeStore::default();
        let history = FakeHistory::default();
        let controller = SearchController::new(client.clone(), store.clone(), history.clone());
        (controller, client, store, history)
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_navigation_searches_and_receives_once() {
        let (controller, client, store, history) = setup();
        client.outcomes.borrow_mut().push_back(Ok(result(42)));

        controller
            .on_navigate("?search=foo&offset=2&count=10")
            .await
            .unwrap();

        let expected = Query {
            search: Some("foo".to_string()),
            offset: 2,
            count: 10,
            ..Query::default()
        };
        assert_eq!(client.calls.borrow().len(), 1);
        assert_eq!(client.calls.borrow()[0].search.as_deref(), Some("foo"));
        assert_eq!(
            *store.events.borrow(),
            vec![Event::Request, Event::Receive(expected, result(42))]
        );
        assert!(history.writes.borrow().is_empty());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_identical_navigation_searches_once() {
        let (controller, client, _store, _history) = setup();

        controller.on_navigate("?search=foo").await.unwrap();
        controller.on_navigate("?search=foo").await.unwrap();
        assert_eq!(client.calls.borrow().len(), 1);

        controller.on_navigate("?search=bar").await.unwrap();
        assert_eq!(client.calls.borrow().len(), 2);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_empty_url_uses_retained_query() {
        let (controller, client, store, _history) = setup();
        let retained = Query {
            search: Some("kept".to_string()),
            offset: 3,
            ..Query::default()
        };
        store.retained.replace(retained.clone());

        controller.on_navigate("").await.unwrap();

        assert_eq!(client.calls.borrow()[0], to_iso_dates(&retained));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_page_count_change_resets_offset_and_updates_url() {
        let (controller, client, store, history) = setup();
        store.retained.replace(Query {
            offset: 4,
            ..Query::default()
        });

        controller.on_page_count_change(50).await.unwrap();

        let params = client.calls.borrow()[0].clone();
        assert_eq!((params.offset, params.count), (1, 50));
        assert_eq!(store.query().offset, 1);
        assert_eq!(store.query().count, 50);
        assert_eq!(*history.writes.borrow(), vec!["?offset=1&count=50".to_string()]);

        // The navigation echoing our own URL write does not search again
        controller.on_navigate("?offset=1&count=50").await.unwrap();
        assert_eq!(client.calls.borrow().len(), 1);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_page_change_replaces_offset() {
        let (controller, client, store, _history) = setup();
        store.retained.replace(Query {
            search: Some("foo".to_string()),
            count: 20,
            ..Query::default()
        });

        controller.on_page_change(3).await.unwrap();

        let params = client.calls.borrow()[0].clone();
        assert_eq!((params.offset, params.count), (3, 20));
        assert_eq!(params.search.as_deref(), Some("foo"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_filter_change_merges_and_resets_offset() {
        let (controller, client, store, history) = setup();
        store.retained.replace(Query {
            offset: 5,
            count: 30,
            ..Query::default()
        });
        let dates = DateRange {
            start: Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2017, 1, 2, 0, 0, 0).unwrap(),
        };

        controller
            .on_filter_change(FilterChange {
                search: Some("maria".to_string()),
                dates: Some(dates),
                values: Some(BTreeMap::from([("status".to_string(), "paid".to_string())])),
            })
            .await
            .unwrap();

        let query = store.query();
        assert_eq!(query.offset, 1);
        assert_eq!(query.count, 30);
        assert_eq!(query.dates, Some(dates));
        let written = history.writes.borrow()[0].clone();
        assert!(written.contains("dates"), "{}", written);
        assert_eq!(client.calls.borrow()[0].dates.start.as_deref(), Some("2017-01-01T00:00:00.000Z"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_order_change_resolves_accessor() {
        let (controller, client, store, _history) = setup();
        store.retained.replace(Query {
            offset: 2,
            ..Query::default()
        });

        controller.on_order_change(5, SortOrder::Desc).await.unwrap();

        assert_eq!(
            client.calls.borrow()[0].sort,
            Some(Sort {
                field: vec!["payment".to_string(), "paid_amount".to_string()],
                order: SortOrder::Desc,
            })
        );
        assert_eq!(store.query().offset, 1);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_unknown_column_fails_fast() {
        let (controller, client, store, _history) = setup();

        let err = controller
            .on_order_change(COLUMNS.len(), SortOrder::Asc)
            .await
            .unwrap_err();
        assert_eq!(err, SearchError::UnknownColumn(COLUMNS.len()));

        let err = controller.on_order_change(3, SortOrder::Asc).await.unwrap_err();
        assert_eq!(err, SearchError::ColumnNotOrderable(3));

        assert!(client.calls.borrow().is_empty());
        assert!(store.events.borrow().is_empty());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_failure_is_surfaced_and_retry_recovers() {
        let (controller, client, store, history) = setup();
        client
            .outcomes
            .borrow_mut()
            .push_back(Err(SearchError::Http(502)));

        let err = controller.on_page_change(2).await.unwrap_err();
        assert_eq!(err, SearchError::Http(502));
        assert!(matches!(
            store.events.borrow().last(),
            Some(Event::Fail(query, SearchError::Http(502))) if query.offset == 2
        ));
        assert!(history.writes.borrow().is_empty());

        controller.retry().await.unwrap();
        assert_eq!(client.calls.borrow().len(), 2);
        assert_eq!(client.calls.borrow()[1].offset, 2);
        assert_eq!(store.query().offset, 2);
        assert_eq!(history.writes.borrow().len(), 1);

        // Nothing left to retry
        controller.retry().await.unwrap();
        assert_eq!(client.calls.borrow().len(), 2);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_stale_response_is_dropped() {
        let (controller, client, store, _history) = setup();
        client.delays.borrow_mut().extend([3, 0]);
        client.outcomes.borrow_mut().extend([Ok(result(1)), Ok(result(2))]);

        let (first, second) = tokio::join!(
            controller.on_page_change(2),
            controller.on_page_change(3)
        );
        first.unwrap();
        second.unwrap();

        let receives: Vec<Event> = store
            .events
            .borrow()
            .iter()
            .filter(|e| matches!(e, Event::Receive(..)))
            .cloned()
            .collect();
        assert_eq!(receives.len(), 1);
        assert!(matches!(&receives[0], Event::Receive(q, r) if q.offset == 3 && r.total.count == 2));
        assert_eq!(store.query().offset, 3);
    }
}
