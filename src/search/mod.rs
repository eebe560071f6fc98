//! Search orchestration module
//!
//! Defines the engine's external interface and the service that implements
//! it by composing the trie, ranking client, result cache, and document
//! store.

mod service;
mod types;

pub use service::SearchService;
pub use types::{
    AutocompleteResponse, CrawlOutcome, DocumentPatch, SearchHit, SearchResponse, UpdatedDocument,
};

use crate::Result;

/// The four operations exposed by the engine
///
/// Any transport binding (CLI, RPC, HTTP) implements its marshaling against
/// this trait without the core depending on transport types.
pub trait SearchEngine {
    /// Returns popularity-ordered suggestions for a title prefix
    ///
    /// A zero `limit` falls back to the configured default; non-zero limits
    /// are capped at the configured maximum. An unknown prefix yields an
    /// empty suggestion list; the ranking store is not consulted in that
    /// case. Suggestion order is descending by popularity score with ties
    /// in index-enumeration order.
    fn autocomplete(
        &self,
        prefix: &str,
        limit: usize,
    ) -> impl std::future::Future<Output = AutocompleteResponse> + Send;

    /// Returns cached or freshly ranked results for a query
    ///
    /// Blank queries yield zero results. Results are served from the TTL
    /// cache when possible; only a cold lookup that produces results bumps
    /// the query's popularity. Store failures degrade to an empty response.
    fn search(&self, query: &str) -> impl std::future::Future<Output = SearchResponse> + Send;

    /// Applies a field-masked patch to a stored document
    ///
    /// # Returns
    ///
    /// The updated identifying fields, or [`MinnowError::NotFound`] when no
    /// document exists for the URL. Store failures during the write are
    /// surfaced to the caller.
    ///
    /// [`MinnowError::NotFound`]: crate::MinnowError::NotFound
    fn update_document(
        &self,
        url: &str,
        patch: &DocumentPatch,
        field_mask: &[String],
    ) -> impl std::future::Future<Output = Result<UpdatedDocument>> + Send;

    /// Runs a crawl from a seed URL under a page budget
    ///
    /// A robots-disallowed seed completes normally with zero pages crawled.
    /// When `max_pages` is None the configured default budget applies.
    fn crawl(
        &self,
        seed_url: &str,
        max_pages: Option<u32>,
    ) -> impl std::future::Future<Output = Result<CrawlOutcome>> + Send;
}
