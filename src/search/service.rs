//! Search orchestrator
//!
//! Composes the title trie, ranking client, result cache, and document
//! store into the engine's four operations. All collaborator state is
//! owned here and constructed once at startup; the trie is explicitly
//! warmed from stored titles before serving begins.

use crate::cache::ResultCache;
use crate::config::Config;
use crate::crawler::CrawlerEngine;
use crate::index::Trie;
use crate::rank::{RankBackend, RankingClient};
use crate::search::types::{
    AutocompleteResponse, CrawlOutcome, DocumentPatch, SearchHit, SearchResponse, UpdatedDocument,
};
use crate::search::SearchEngine;
use crate::storage::{DocumentRecord, DocumentStore};
use crate::{MinnowError, Result};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// The search engine service
///
/// Owns the autocomplete index, ranking client, and result cache; shares
/// the document store with crawl runs it spawns.
pub struct SearchService<S: DocumentStore, B: RankBackend> {
    config: Config,
    store: Arc<Mutex<S>>,
    trie: Mutex<Trie>,
    ranker: Mutex<RankingClient<B>>,
    cache: ResultCache,
}

impl<S: DocumentStore, B: RankBackend> SearchService<S, B> {
    /// Creates a service over the given store and ranking backend
    ///
    /// The trie starts cold; call [`warm_up`](Self::warm_up) before serving.
    pub fn new(config: Config, store: Arc<Mutex<S>>, rank_backend: B) -> Self {
        let cache = ResultCache::new(Duration::from_secs(config.search.cache_ttl_secs));

        Self {
            config,
            store,
            trie: Mutex::new(Trie::new()),
            ranker: Mutex::new(RankingClient::new(rank_backend)),
            cache,
        }
    }

    /// Loads stored document titles into the autocomplete index
    ///
    /// A store failure leaves the trie cold (empty suggestions) and is
    /// logged rather than propagated: autocomplete is a degradable
    /// capability, not a startup precondition.
    ///
    /// # Returns
    ///
    /// The number of titles loaded.
    pub fn warm_up(&self) -> usize {
        let titles = {
            let store = self.store.lock().unwrap();
            store.load_titles()
        };

        match titles {
            Ok(titles) => {
                let mut trie = self.trie.lock().unwrap();
                let mut count = 0;
                for title in titles {
                    if !title.is_empty() {
                        trie.insert(&title);
                        count += 1;
                    }
                }
                tracing::info!("Autocomplete index warmed with {} titles", count);
                count
            }
            Err(e) => {
                tracing::error!("Failed to warm autocomplete index: {}", e);
                0
            }
        }
    }

    /// Shared handle to the document store
    pub fn store(&self) -> Arc<Mutex<S>> {
        Arc::clone(&self.store)
    }

    /// Builds a response snippet from document content
    ///
    /// Content longer than the configured preview length is truncated with
    /// an ellipsis marker.
    fn preview_snippet(&self, content: &str) -> String {
        let limit = self.config.search.snippet_preview_length;
        if content.chars().count() > limit {
            let truncated: String = content.chars().take(limit).collect();
            format!("{}...", truncated)
        } else {
            content.to_string()
        }
    }

    /// Maps a stored document to a response hit
    fn to_hit(&self, document: &DocumentRecord) -> SearchHit {
        SearchHit {
            url: document.url.clone(),
            title: document.title.clone(),
            snippet: self.preview_snippet(&document.content),
            // Unscored documents present as 1.0 in responses
            score: if document.score > 0.0 {
                document.score
            } else {
                1.0
            },
        }
    }

    /// The cold search path: store lookup, cache write-through, rank bump
    async fn search_cold(&self, raw_query: &str, normalized: &str, cache_key: String) -> SearchResponse {
        tracing::info!("Querying store for '{}'", normalized);

        let lookup = {
            let store = self.store.lock().unwrap();
            store.search_documents(normalized, self.config.search.result_limit)
        };

        let documents = match lookup {
            Ok(documents) => documents,
            Err(e) => {
                tracing::error!("Store search failed for '{}': {}", normalized, e);
                return SearchResponse::empty();
            }
        };

        let hits: Vec<SearchHit> = documents.iter().map(|d| self.to_hit(d)).collect();

        if !hits.is_empty() {
            match serde_json::to_string(&hits) {
                Ok(payload) => self.cache.put(cache_key, payload).await,
                Err(e) => tracing::warn!("Failed to serialize results for '{}': {}", raw_query, e),
            }

            // Only a cold lookup with results bumps popularity
            let mut ranker = self.ranker.lock().unwrap();
            ranker.increment(normalized);
        }

        SearchResponse {
            total_hits: hits.len(),
            results: hits,
        }
    }
}

impl<S: DocumentStore, B: RankBackend> SearchEngine for SearchService<S, B> {
    async fn autocomplete(&self, prefix: &str, limit: usize) -> AutocompleteResponse {
        let start = Instant::now();
        let configured = self.config.search.autocomplete_limit;
        // Zero requests the default; anything else is capped at the maximum
        let limit = if limit == 0 {
            configured
        } else {
            limit.min(configured)
        };

        let candidates = {
            let trie = self.trie.lock().unwrap();
            trie.autocomplete(prefix, limit)
        };

        // No candidates: skip the ranking lookup entirely
        if candidates.is_empty() {
            return AutocompleteResponse {
                suggestions: Vec::new(),
                duration_ms: start.elapsed().as_secs_f64() * 1000.0,
            };
        }

        let ranked = {
            let ranker = self.ranker.lock().unwrap();
            ranker.batch_scores(&candidates)
        };

        AutocompleteResponse {
            suggestions: ranked.into_iter().map(|(term, _)| term).collect(),
            duration_ms: start.elapsed().as_secs_f64() * 1000.0,
        }
    }

    async fn search(&self, query: &str) -> SearchResponse {
        let normalized = query.trim().to_lowercase();
        if normalized.is_empty() {
            return SearchResponse::empty();
        }

        // The cache key keeps the caller's raw query text; see ResultCache
        let cache_key = ResultCache::key_for(query);

        if let Some(payload) = self.cache.get(&cache_key).await {
            match serde_json::from_str::<Vec<SearchHit>>(&payload) {
                Ok(hits) => {
                    tracing::debug!("Cache hit for '{}'", query);
                    return SearchResponse {
                        total_hits: hits.len(),
                        results: hits,
                    };
                }
                Err(e) => {
                    // Treat an undecodable entry as a miss
                    tracing::warn!("Discarding malformed cache entry for '{}': {}", query, e);
                }
            }
        }

        self.search_cold(query, &normalized, cache_key).await
    }

    async fn update_document(
        &self,
        url: &str,
        patch: &DocumentPatch,
        field_mask: &[String],
    ) -> Result<UpdatedDocument> {
        tracing::info!("Updating document {} with mask {:?}", url, field_mask);

        let mut store = self.store.lock().unwrap();

        let mut document = store
            .get_document(url)?
            .ok_or_else(|| MinnowError::NotFound {
                url: url.to_string(),
            })?;

        apply_field_mask(&mut document, patch, field_mask);
        store.update_document(&document)?;

        Ok(UpdatedDocument {
            url: document.url,
            title: document.title,
            score: document.score,
        })
    }

    async fn crawl(&self, seed_url: &str, max_pages: Option<u32>) -> Result<CrawlOutcome> {
        let budget = max_pages.unwrap_or(self.config.crawler.default_max_pages);

        let mut engine = CrawlerEngine::new(&self.config.crawler, self.store())?;
        let pages_crawled = engine.run(seed_url, budget).await?;

        Ok(CrawlOutcome {
            pages_crawled,
            status: "COMPLETED".to_string(),
        })
    }
}

/// Copies masked fields from a patch onto a stored document
///
/// A path is applied only when it names a known document field and the
/// patch carries a value for it; anything else is skipped silently.
fn apply_field_mask(document: &mut DocumentRecord, patch: &DocumentPatch, field_mask: &[String]) {
    for path in field_mask {
        match path.as_str() {
            "title" => {
                if let Some(title) = &patch.title {
                    document.title = title.clone();
                }
            }
            "snippet" => {
                if let Some(snippet) = &patch.snippet {
                    document.snippet = snippet.clone();
                }
            }
            "content" => {
                if let Some(content) = &patch.content {
                    document.content = content.clone();
                }
            }
            "score" => {
                if let Some(score) = patch.score {
                    document.score = score;
                }
            }
            unknown => {
                tracing::debug!("Ignoring unknown field mask path: {}", unknown);
            }
        }
    }
}
