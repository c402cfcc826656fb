use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Page size used when neither the URL nor the retained state carries one
pub const DEFAULT_PAGE_SIZE: u32 = 15;

/// Sort direction as it travels in the URL and in API requests ("asc" / "desc")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Sort specification: `field` is a path into a nested transaction record,
/// e.g. `["payment", "paid_amount"]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub field: Vec<String>,
    pub order: SortOrder,
}

/// Date bounds in ISO-8601 form.
///
/// An empty value (`{}`) means "no date filter"; it is never written out
/// as a pair of null parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsoDates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl IsoDates {
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// Transactions search query in wire form: what lives in the browser URL
/// and what the search API accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "IsoDates::is_empty")]
    pub dates: IsoDates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Sort>,
    #[serde(default = "default_offset")]
    pub offset: u32,
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_offset() -> u32 {
    1
}

fn default_count() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            search: None,
            dates: IsoDates::default(),
            filters: None,
            sort: None,
            offset: default_offset(),
            count: default_count(),
        }
    }
}
