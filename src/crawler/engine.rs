//! Crawler engine: drives the frontier through a single crawl run
//!
//! The engine is a single consumer of its frontier. Each run moves through
//! INIT (seed politeness check), RUNNING (fetch, extract, persist, discover),
//! and DONE (frontier exhausted or page budget reached). Robots denials and
//! fetch failures are soft: they skip a page, never abort the run.

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchOutcome};
use crate::crawler::frontier::CrawlFrontier;
use crate::crawler::parser::{parse_page, truncate_chars};
use crate::robots::RobotsPolicyCache;
use crate::storage::{DocumentRecord, DocumentStore};
use crate::Result;
use chrono::Utc;
use reqwest::Client;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

/// Crawls pages breadth-first from a seed URL and persists them
///
/// Owns the HTTP client and the per-run robots policy cache; the document
/// store is shared with the search side. Construct one engine per crawl
/// request.
pub struct CrawlerEngine<S: DocumentStore> {
    client: Client,
    robots: RobotsPolicyCache,
    store: Arc<Mutex<S>>,
    snippet_length: usize,
}

impl<S: DocumentStore> CrawlerEngine<S> {
    /// Creates a new engine for one crawl run
    ///
    /// # Arguments
    ///
    /// * `config` - Crawler configuration (identity, timeouts, bounds)
    /// * `store` - Shared handle to the document store
    pub fn new(config: &CrawlerConfig, store: Arc<Mutex<S>>) -> Result<Self> {
        let client = build_http_client(
            &config.user_agent,
            Duration::from_millis(config.fetch_timeout_ms),
        )?;

        let robots = RobotsPolicyCache::new(
            client.clone(),
            &config.user_agent,
            Duration::from_millis(config.robots_timeout_ms),
        );

        Ok(Self {
            client,
            robots,
            store,
            snippet_length: config.snippet_length,
        })
    }

    /// Runs the crawl to completion and returns the number of pages crawled
    ///
    /// A seed disallowed by robots.txt is a normal zero-page outcome, not an
    /// error. The run ends when the frontier is empty or the budget is
    /// reached.
    ///
    /// # Arguments
    ///
    /// * `seed_url` - The URL to start from
    /// * `max_pages` - Page budget for this run
    pub async fn run(&mut self, seed_url: &str, max_pages: u32) -> Result<u32> {
        let seed = Url::parse(seed_url)?;
        tracing::info!("Starting crawl at {} (budget: {} pages)", seed, max_pages);

        if !self.robots.is_allowed(&seed).await {
            tracing::info!("Seed URL disallowed by robots.txt: {}", seed);
            return Ok(0);
        }

        let mut frontier = CrawlFrontier::new(max_pages);
        frontier.enqueue(seed);

        while frontier.has_work() {
            let url = match frontier.dequeue() {
                Some(url) => url,
                None => break,
            };

            if frontier.is_visited(&url) {
                continue;
            }

            self.process_page(&url, &mut frontier).await;
            frontier.mark_visited(&url);
        }

        tracing::info!(
            "Crawl finished: {} pages crawled, {} URLs visited, {} left queued",
            frontier.pages_crawled(),
            frontier.visited_count(),
            frontier.queue_len()
        );

        Ok(frontier.pages_crawled())
    }

    /// Fetches one page, persists it, and enqueues its outbound links
    ///
    /// Fetch failures and non-success statuses skip the page without
    /// consuming budget. Persistence is best-effort: a store failure is
    /// logged and the run continues.
    async fn process_page(&mut self, url: &Url, frontier: &mut CrawlFrontier) {
        tracing::debug!("Fetching: {}", url);

        let (final_url, body) = match fetch_page(&self.client, url).await {
            FetchOutcome::Success {
                final_url, body, ..
            } => (final_url, body),
            FetchOutcome::HttpStatus { status } => {
                tracing::warn!("Error fetching {}: status {}", url, status);
                return;
            }
            FetchOutcome::Network { reason } => {
                tracing::warn!("Error fetching {}: {}", url, reason);
                return;
            }
        };

        let parsed = parse_page(&body, &final_url);
        let title = parsed.title.unwrap_or_else(|| url.to_string());
        let snippet = truncate_chars(&parsed.text, self.snippet_length);

        let document = DocumentRecord {
            url: url.to_string(),
            title,
            snippet,
            content: parsed.text,
            score: 0.0,
            crawled_at: Utc::now(),
        };

        self.save_document(&document);
        frontier.record_crawled();

        for link in parsed.links {
            if frontier.is_visited(&link) {
                continue;
            }
            if self.robots.is_allowed(&link).await {
                frontier.enqueue(link);
            }
        }
    }

    /// Persists a crawled document, logging and swallowing store failures
    fn save_document(&self, document: &DocumentRecord) {
        let mut store = self.store.lock().unwrap();
        if let Err(e) = store.upsert_document(document) {
            tracing::warn!("Skipping store insert for {}: {}", document.url, e);
        }
    }
}
