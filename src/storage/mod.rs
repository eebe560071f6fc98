//! Storage module for persisting crawled documents
//!
//! The document store is the engine's single source of truth: the crawler
//! inserts rows, the search side reads them through a full-text index, and
//! update operations patch them in place.

mod schema;
mod sqlite;
mod traits;

pub use schema::initialize_schema;
pub use sqlite::SqliteStore;
pub use traits::{DocumentStore, StoreError, StoreResult};

use chrono::{DateTime, Utc};

/// A stored document, one per unique URL
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRecord {
    /// Unique URL key
    pub url: String,
    /// Page title (falls back to the URL during crawling)
    pub title: String,
    /// Bounded-length text extract
    pub snippet: String,
    /// Extracted page text
    pub content: String,
    /// Popularity score, only ever increased
    pub score: f64,
    /// When the page was crawled
    pub crawled_at: DateTime<Utc>,
}
