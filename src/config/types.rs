use serde::Deserialize;

/// Main configuration structure for Minnow
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// User agent token presented to robots.txt checks and page fetches
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Timeout for page fetches (milliseconds)
    #[serde(rename = "fetch-timeout-ms", default = "default_fetch_timeout")]
    pub fetch_timeout_ms: u64,

    /// Timeout for robots.txt fetches (milliseconds)
    #[serde(rename = "robots-timeout-ms", default = "default_robots_timeout")]
    pub robots_timeout_ms: u64,

    /// Page budget used when a crawl request does not specify one
    #[serde(rename = "default-max-pages", default = "default_max_pages")]
    pub default_max_pages: u32,

    /// Maximum length of the stored text snippet (characters)
    #[serde(rename = "snippet-length", default = "default_snippet_length")]
    pub snippet_length: usize,
}

/// Search and autocomplete configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Time-to-live for cached search results (seconds)
    #[serde(rename = "cache-ttl-secs", default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,

    /// Maximum number of full-text hits returned by the store
    #[serde(rename = "result-limit", default = "default_result_limit")]
    pub result_limit: usize,

    /// Maximum snippet length in search responses (characters)
    #[serde(rename = "snippet-preview-length", default = "default_preview_length")]
    pub snippet_preview_length: usize,

    /// Maximum number of autocomplete suggestions
    #[serde(rename = "autocomplete-limit", default = "default_autocomplete_limit")]
    pub autocomplete_limit: usize,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,
}

fn default_user_agent() -> String {
    "MinnowBot/1.0".to_string()
}

fn default_fetch_timeout() -> u64 {
    5000
}

fn default_robots_timeout() -> u64 {
    3000
}

fn default_max_pages() -> u32 {
    10
}

fn default_snippet_length() -> usize {
    500
}

fn default_cache_ttl() -> u64 {
    3600
}

fn default_result_limit() -> usize {
    20
}

fn default_preview_length() -> usize {
    200
}

fn default_autocomplete_limit() -> usize {
    10
}

fn default_database_path() -> String {
    "./minnow.db".to_string()
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            fetch_timeout_ms: default_fetch_timeout(),
            robots_timeout_ms: default_robots_timeout(),
            default_max_pages: default_max_pages(),
            snippet_length: default_snippet_length(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: default_cache_ttl(),
            result_limit: default_result_limit(),
            snippet_preview_length: default_preview_length(),
            autocomplete_limit: default_autocomplete_limit(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig::default(),
            search: SearchConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}
