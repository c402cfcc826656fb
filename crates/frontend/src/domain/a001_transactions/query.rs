use chrono::{DateTime, Utc};
use contracts::domain::a001_transactions::{Sort, SortOrder, DEFAULT_PAGE_SIZE};
use std::collections::BTreeMap;

/// Calendar date bounds. Both ends are always present together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Transactions search query as the page works with it (calendar dates).
///
/// `offset` is the 1-based page number, `count` the page size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub search: Option<String>,
    pub dates: Option<DateRange>,
    pub filters: Option<BTreeMap<String, String>>,
    pub sort: Option<Sort>,
    pub offset: u32,
    pub count: u32,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            search: None,
            dates: None,
            filters: None,
            sort: None,
            offset: 1,
            count: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Values submitted by the filter panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterChange {
    pub search: Option<String>,
    pub dates: Option<DateRange>,
    pub values: Option<BTreeMap<String, String>>,
}

impl Query {
    /// Replaces search text, dates and filter values; back to the first page
    pub fn with_filters(&self, change: FilterChange) -> Self {
        Self {
            search: change.search,
            dates: change.dates,
            filters: change.values,
            offset: 1,
            ..self.clone()
        }
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self {
            offset: page.max(1),
            ..self.clone()
        }
    }

    /// New page size; always restarts from page 1
    pub fn with_page_count(&self, count: u32) -> Self {
        Self {
            offset: 1,
            count: count.max(1),
            ..self.clone()
        }
    }

    pub fn with_sort(&self, field: Vec<String>, order: SortOrder) -> Self {
        Self {
            sort: Some(Sort { field, order }),
            offset: 1,
            ..self.clone()
        }
    }
}
