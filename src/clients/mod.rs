//! Raw provider wrappers.
//!
//! A client owns the HTTP transport for one external API and nothing else;
//! prompt building, response parsing and fallback policy live in the
//! service layer. The traits are the seams the tests mock.

pub mod groq;
pub mod tavily;

use serde::Deserialize;

use crate::error::{GenerationError, SearchError};

pub use groq::GroqClient;
pub use tavily::TavilyClient;

/// Chat-style text generation transport.
#[async_trait::async_trait]
pub trait GenerationApi: Send + Sync {
    /// Single attempt, no retry. The response is the trimmed completion
    /// text, expected (but not guaranteed) to be one JSON object.
    async fn chat(
        &self,
        system_message: &str,
        user_message: &str,
        max_tokens: u32,
    ) -> Result<String, GenerationError>;
}

/// One raw hit from the search provider.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSearchResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub url: String,
}

/// Web search transport.
#[async_trait::async_trait]
pub trait SearchApi: Send + Sync {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<RawSearchResult>, SearchError>;
}
