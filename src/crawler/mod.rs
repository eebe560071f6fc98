//! Crawler module for web page fetching and discovery
//!
//! This module contains the crawl pipeline:
//! - HTTP fetching with per-request timeouts
//! - HTML title/text/link extraction
//! - The FIFO frontier with visited-set and page budget
//! - The engine that drives a run from seed to completion

mod engine;
mod fetcher;
mod frontier;
mod parser;

pub use engine::CrawlerEngine;
pub use fetcher::{build_http_client, fetch_page, FetchOutcome};
pub use frontier::CrawlFrontier;
pub use parser::{parse_page, truncate_chars, ParsedPage};
