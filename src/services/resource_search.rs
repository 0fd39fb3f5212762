//! Resource search service - capability layer.
//!
//! Wraps a [`SearchApi`] transport and guarantees a usable result: raw hits
//! are normalized into typed [`Resource`] entries, and any transport
//! failure, missing results field or empty hit list degrades to the
//! deterministic topic-based fallback set instead of an error.

use tracing::{debug, warn};

use crate::clients::{RawSearchResult, SearchApi};
use crate::models::Resource;
use crate::services::{classify, fallback};

/// Default number of results requested from the provider.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Resource search service.
pub struct ResourceSearchService<S: SearchApi> {
    api: S,
}

impl<S: SearchApi> ResourceSearchService<S> {
    pub fn new(api: S) -> Self {
        Self { api }
    }

    /// Search for supplementary resources.
    ///
    /// `resource_type_hint` is appended to the query unless it is the
    /// wildcard "all". `topic` seeds the fallback set when the provider
    /// yields nothing. Infallible by design: lesson creation must never
    /// block on supplementary material.
    pub async fn search(
        &self,
        query: &str,
        resource_type_hint: &str,
        max_results: usize,
        topic: &str,
    ) -> Vec<Resource> {
        let full_query = if resource_type_hint == "all" || resource_type_hint.trim().is_empty() {
            query.to_string()
        } else {
            format!("{} {}", query, resource_type_hint)
        };

        match self.api.search(&full_query, max_results).await {
            Ok(hits) if !hits.is_empty() => {
                debug!(count = hits.len(), "normalizing search hits");
                hits.into_iter()
                    .map(|hit| normalize(hit, resource_type_hint))
                    .collect()
            }
            Ok(_) => {
                warn!(%full_query, "search returned no hits, using fallback resource set");
                fallback::resources(topic)
            }
            Err(e) => {
                warn!(%full_query, "search failed ({e}), using fallback resource set");
                fallback::resources(topic)
            }
        }
    }
}

/// Normalize one raw hit into a typed resource entry.
fn normalize(hit: RawSearchResult, hint: &str) -> Resource {
    Resource {
        title: classify::truncate_title(&hit.title),
        description: classify::truncate_description(&hit.content),
        source: classify::source_host(&hit.url),
        resource_type: classify::classify_url(&hit.url, hint),
        url: hit.url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use crate::models::ResourceType;

    struct CannedSearch(Vec<RawSearchResult>);

    #[async_trait::async_trait]
    impl SearchApi for CannedSearch {
        async fn search(
            &self,
            _query: &str,
            _max_results: usize,
        ) -> Result<Vec<RawSearchResult>, SearchError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSearch;

    #[async_trait::async_trait]
    impl SearchApi for FailingSearch {
        async fn search(
            &self,
            _query: &str,
            _max_results: usize,
        ) -> Result<Vec<RawSearchResult>, SearchError> {
            Err(SearchError::Transport("connection refused".to_string()))
        }
    }

    struct RecordingSearch(std::sync::Mutex<Vec<String>>);

    #[async_trait::async_trait]
    impl SearchApi for RecordingSearch {
        async fn search(
            &self,
            query: &str,
            _max_results: usize,
        ) -> Result<Vec<RawSearchResult>, SearchError> {
            self.0.lock().unwrap().push(query.to_string());
            Err(SearchError::MissingResults)
        }
    }

    #[tokio::test]
    async fn normalizes_hits_with_classification() {
        let service = ResourceSearchService::new(CannedSearch(vec![RawSearchResult {
            title: "Photosynthesis explained".to_string(),
            content: "How plants make food.".to_string(),
            url: "https://www.youtube.com/watch?v=abc".to_string(),
        }]));

        let resources = service.search("photosynthesis", "all", 5, "photosynthesis").await;
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].resource_type, ResourceType::Video);
        assert_eq!(resources[0].source, "youtube.com");
    }

    #[tokio::test]
    async fn transport_failure_yields_fallback_set() {
        let service = ResourceSearchService::new(FailingSearch);
        let resources = service.search("cells biology", "all", 5, "cells").await;
        assert_eq!(resources.len(), 5);
        assert!(resources.iter().all(|r| r.url.contains("cells")));
    }

    #[tokio::test]
    async fn empty_hit_list_yields_fallback_set() {
        let service = ResourceSearchService::new(CannedSearch(vec![]));
        let resources = service.search("gravity", "all", 5, "gravity").await;
        assert_eq!(resources.len(), 5);
    }

    #[tokio::test]
    async fn hint_is_appended_unless_wildcard() {
        let recorder = RecordingSearch(std::sync::Mutex::new(Vec::new()));
        let service = ResourceSearchService::new(recorder);
        service.search("gravity grade 9", "video", 5, "gravity").await;
        service.search("gravity grade 9", "all", 5, "gravity").await;

        let queries = service.api.0.lock().unwrap();
        assert_eq!(queries[0], "gravity grade 9 video");
        assert_eq!(queries[1], "gravity grade 9");
    }
}
