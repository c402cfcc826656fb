use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Envelope returned by `POST /api/transactions/search`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub result: SearchResult,
}

/// One page of search results. Every response replaces the previous one
/// wholesale; nothing is merged across calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub total: Total,
    #[serde(default)]
    pub list: ResultList,
    #[serde(default)]
    pub chart: Chart,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Total {
    /// Number of transactions matching the query (all pages)
    #[serde(default)]
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<TotalPayment>,
}

impl Total {
    /// Paid amount in cents, 0 when the API sent no payment totals
    pub fn paid_amount(&self) -> i64 {
        self.payment.as_ref().map(|p| p.paid_amount).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TotalPayment {
    #[serde(default)]
    pub paid_amount: i64,
}

/// Transaction records are nested JSON documents; columns navigate them by path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultList {
    #[serde(default)]
    pub rows: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    #[serde(default)]
    pub dataset: Vec<ChartPoint>,
}

/// A named chart bucket with one value per series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub name: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}
