//! Search provider client.
//!
//! JSON POST to the Tavily search endpoint, restricted to a fixed
//! allow-list of reputable educational domains at "advanced" search depth.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::clients::{RawSearchResult, SearchApi};
use crate::config::Config;
use crate::error::SearchError;

/// Domains the search provider is allowed to return results from.
pub const EDUCATIONAL_DOMAINS: [&str; 16] = [
    "khanacademy.org",
    "youtube.com",
    "britannica.com",
    "nationalgeographic.com",
    "pbslearningmedia.org",
    "edutopia.org",
    "scholastic.com",
    "smithsonianmag.com",
    "ed.ted.com",
    "readworks.org",
    "commonlit.org",
    "sciencebuddies.org",
    "nasa.gov",
    "noaa.gov",
    "loc.gov",
    "si.edu",
];

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Option<Vec<RawSearchResult>>,
}

/// Client for the search endpoint.
pub struct TavilyClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl TavilyClient {
    pub fn new(config: &Config) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            http,
            api_key: config.tavily_api_key.clone(),
            base_url: config.tavily_api_base_url.clone(),
        }
    }
}

#[async_trait::async_trait]
impl SearchApi for TavilyClient {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<RawSearchResult>, SearchError> {
        let endpoint = format!("{}/search", self.base_url);
        debug!(%query, max_results, "calling search API");

        let body = json!({
            "api_key": self.api_key,
            "query": query,
            "search_depth": "advanced",
            "include_domains": EDUCATIONAL_DOMAINS,
            "max_results": max_results,
        });

        let response = self
            .http
            .post(&endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!("search API request failed: {e}");
                SearchError::Transport(e.to_string())
            })?
            .error_for_status()
            .map_err(|e| {
                warn!("search API returned error status: {e}");
                SearchError::Transport(e.to_string())
            })?;

        let parsed: SearchResponse = response.json().await.map_err(|e| {
            warn!("search API response was not valid JSON: {e}");
            SearchError::Transport(e.to_string())
        })?;

        let results = parsed.results.ok_or(SearchError::MissingResults)?;
        debug!(count = results.len(), "search API call succeeded");

        Ok(results)
    }
}
