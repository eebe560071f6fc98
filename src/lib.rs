//! Minnow: a minimal crawl-and-serve web search engine
//!
//! This crate implements a small search engine pipeline: a politeness-aware
//! crawler that discovers and stores pages, a prefix index over document
//! titles for autocomplete, a popularity ranking store, and a TTL result
//! cache composed into cached, ranked query responses.

pub mod cache;
pub mod config;
pub mod crawler;
pub mod index;
pub mod rank;
pub mod robots;
pub mod search;
pub mod storage;

use thiserror::Error;

/// Main error type for Minnow operations
///
/// Only caller-visible failures appear here. Fetch failures are soft and
/// page-scoped (classified as [`crawler::FetchOutcome`] and swallowed by
/// the engine), and ranking/cache failures are advisory and swallowed by
/// the components that own them; none of those surface as variants.
#[derive(Debug, Error)]
pub enum MinnowError {
    #[error("Store error: {0}")]
    Store(#[from] storage::StoreError),

    #[error("Document not found: {url}")]
    NotFound { url: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

impl MinnowError {
    /// Returns true if this error is the caller-visible not-found failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Minnow operations
pub type Result<T> = std::result::Result<T, MinnowError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use index::Trie;
pub use search::{SearchEngine, SearchService};
pub use storage::{DocumentRecord, DocumentStore, SqliteStore};
