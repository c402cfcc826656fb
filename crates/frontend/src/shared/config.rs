//! Client-side settings of the transactions page

use contracts::domain::a001_transactions::DEFAULT_PAGE_SIZE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Path of the search endpoint, appended to `api_base()`
    pub search_path: String,
    pub default_page_size: u32,
    pub page_size_options: Vec<u32>,
    /// Page changes are debounced before they reach the controller
    pub page_change_debounce_ms: i32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            search_path: "/api/transactions/search".to_string(),
            default_page_size: DEFAULT_PAGE_SIZE,
            page_size_options: vec![DEFAULT_PAGE_SIZE, 30, 50, 100],
            page_change_debounce_ms: 200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.page_change_debounce_ms, 200);
        assert!(config.page_size_options.contains(&config.default_page_size));
        assert!(config.search_path.starts_with("/api/"));
    }
}
