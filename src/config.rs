/// Process configuration.
///
/// Read once at startup. A missing provider key does not prevent startup:
/// every call to that provider then fails with a transport error, which the
/// orchestration layer absorbs with fallback content.
#[derive(Clone, Debug)]
pub struct Config {
    // --- generation provider (OpenAI-compatible) ---
    pub groq_api_key: String,
    pub groq_api_base_url: String,
    pub groq_model: String,
    // --- search provider ---
    pub tavily_api_key: String,
    pub tavily_api_base_url: String,
    /// Default number of search results to request.
    pub search_max_results: usize,
    /// Per-request timeout for outbound provider calls, in seconds.
    pub request_timeout_secs: u64,
    /// Log prompt/response previews at debug level.
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            groq_api_key: String::new(),
            groq_api_base_url: "https://api.groq.com/openai/v1".to_string(),
            groq_model: "llama3-70b-8192".to_string(),
            tavily_api_key: String::new(),
            tavily_api_base_url: "https://api.tavily.com".to_string(),
            search_max_results: 5,
            request_timeout_secs: 60,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            groq_api_key: std::env::var("GROQ_API_KEY").unwrap_or(default.groq_api_key),
            groq_api_base_url: std::env::var("GROQ_API_BASE_URL").unwrap_or(default.groq_api_base_url),
            groq_model: std::env::var("GROQ_MODEL").unwrap_or(default.groq_model),
            tavily_api_key: std::env::var("TAVILY_API_KEY").unwrap_or(default.tavily_api_key),
            tavily_api_base_url: std::env::var("TAVILY_API_BASE_URL").unwrap_or(default.tavily_api_base_url),
            search_max_results: std::env::var("SEARCH_MAX_RESULTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.search_max_results),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }
}
