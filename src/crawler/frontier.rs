//! Crawl frontier: discovered URLs, visited set, and page budget
//!
//! The frontier is a first-class owned structure so that a future
//! multi-worker extension can put it behind a single coordinating task.
//! Under the current single-consumer loop no synchronization is needed.

use std::collections::{HashSet, VecDeque};
use url::Url;

/// FIFO queue of discovered URLs plus visited-set and budget counter
///
/// Created per crawl invocation and discarded at completion; nothing here
/// is persisted across runs. The visited set only grows during a run, and
/// `pages_crawled` is bounded by `max_pages`.
#[derive(Debug)]
pub struct CrawlFrontier {
    queue: VecDeque<Url>,
    visited: HashSet<String>,
    pages_crawled: u32,
    max_pages: u32,
}

impl CrawlFrontier {
    /// Creates an empty frontier with the given page budget
    pub fn new(max_pages: u32) -> Self {
        Self {
            queue: VecDeque::new(),
            visited: HashSet::new(),
            pages_crawled: 0,
            max_pages,
        }
    }

    /// Adds a URL to the back of the queue
    ///
    /// FIFO ordering gives breadth-first coverage relative to enqueue time.
    pub fn enqueue(&mut self, url: Url) {
        self.queue.push_back(url);
    }

    /// Removes and returns the next URL in FIFO order
    pub fn dequeue(&mut self) -> Option<Url> {
        self.queue.pop_front()
    }

    /// Returns true if the URL has already been visited this run
    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url.as_str())
    }

    /// Marks a URL as visited
    pub fn mark_visited(&mut self, url: &Url) {
        self.visited.insert(url.as_str().to_string());
    }

    /// Records one successfully crawled page against the budget
    pub fn record_crawled(&mut self) {
        self.pages_crawled += 1;
    }

    /// Returns true once the page budget has been consumed
    pub fn budget_exhausted(&self) -> bool {
        self.pages_crawled >= self.max_pages
    }

    /// Returns true while there are queued URLs and budget remaining
    pub fn has_work(&self) -> bool {
        !self.queue.is_empty() && !self.budget_exhausted()
    }

    /// Total pages crawled so far
    pub fn pages_crawled(&self) -> u32 {
        self.pages_crawled
    }

    /// Number of URLs currently queued
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Number of URLs marked visited
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
