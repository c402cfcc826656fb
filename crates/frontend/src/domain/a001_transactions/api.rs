use super::controller::SearchClient;
use super::error::SearchError;
use crate::shared::browser::api_base;
use crate::shared::config::SearchConfig;
use async_trait::async_trait;
use contracts::domain::a001_transactions::{QueryParams, SearchResponse, SearchResult};
use gloo_net::http::Request;

/// Transactions search over HTTP
#[derive(Debug, Clone)]
pub struct HttpSearchClient {
    url: String,
}

impl HttpSearchClient {
    pub fn new(base_url: &str, config: &SearchConfig) -> Self {
        Self {
            url: format!("{}{}", base_url, config.search_path),
        }
    }

    /// Client for the backend serving the current page
    pub fn from_location(config: &SearchConfig) -> Self {
        Self::new(&api_base(), config)
    }
}

#[async_trait(?Send)]
impl SearchClient for HttpSearchClient {
    async fn search(&self, params: &QueryParams) -> Result<SearchResult, SearchError> {
        let response = Request::post(&self.url)
            .json(params)
            .map_err(|e| SearchError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(SearchError::Http(response.status()));
        }

        let data: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(e.to_string()))?;

        Ok(data.result)
    }
}
