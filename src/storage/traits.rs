//! Storage trait and error types
//!
//! Defines the document store interface the crawler and search sides share,
//! along with the store-level error type.

use crate::storage::DocumentRecord;
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Interface to the document store
///
/// One row per unique URL; re-crawling an existing URL upserts without
/// violating uniqueness. The combined title+content text must be queryable
/// by arbitrary user text with a relevance ordering and a result cap.
pub trait DocumentStore: Send {
    /// Inserts a document or refreshes the existing row for its URL
    ///
    /// The popularity score of an existing row is preserved on re-crawl.
    fn upsert_document(&mut self, document: &DocumentRecord) -> StoreResult<()>;

    /// Looks up a document by its URL key
    fn get_document(&self, url: &str) -> StoreResult<Option<DocumentRecord>>;

    /// Full-text lookup over title and content
    ///
    /// Returns up to `limit` documents in the store's relevance order.
    fn search_documents(&self, query: &str, limit: usize) -> StoreResult<Vec<DocumentRecord>>;

    /// Commits updated fields for an existing document
    ///
    /// # Returns
    ///
    /// `Err(StoreError::DocumentNotFound)` if no row exists for the URL.
    fn update_document(&mut self, document: &DocumentRecord) -> StoreResult<()>;

    /// Loads all stored titles (for warming the autocomplete index)
    fn load_titles(&self) -> StoreResult<Vec<String>>;

    /// Total number of stored documents
    fn count_documents(&self) -> StoreResult<u64>;
}
