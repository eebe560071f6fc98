//! Request and response types for the search engine interface

use serde::{Deserialize, Serialize};

/// One search result entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub url: String,
    pub title: String,
    pub snippet: String,
    pub score: f64,
}

/// Response to a search query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Matching documents in relevance order
    pub results: Vec<SearchHit>,
    /// Number of results returned
    pub total_hits: usize,
}

impl SearchResponse {
    /// The empty response used for blank queries and degraded paths
    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
            total_hits: 0,
        }
    }
}

/// Response to an autocomplete request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutocompleteResponse {
    /// Suggestions ordered by descending popularity
    pub suggestions: Vec<String>,
    /// Time spent serving the request, in milliseconds
    pub duration_ms: f64,
}

/// Identifying fields of a document after an update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatedDocument {
    pub url: String,
    pub title: String,
    pub score: f64,
}

/// Outcome of a crawl request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlOutcome {
    pub pages_crawled: u32,
    pub status: String,
}

/// Partial document carried by an update request
///
/// Only the fields named in the accompanying field mask are applied, and
/// only when the patch actually carries them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentPatch {
    pub title: Option<String>,
    pub snippet: Option<String>,
    pub content: Option<String>,
    pub score: Option<f64>,
}
