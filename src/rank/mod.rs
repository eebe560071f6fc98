//! Popularity ranking store client
//!
//! Ranking is advisory: it orders autocomplete suggestions and tracks query
//! popularity, but its unavailability must never fail a response. The
//! backend trait is the seam for any sorted-set-like store; the client
//! wrapper owns the degradation policy.

mod sqlite;

pub use sqlite::SqliteRankBackend;

use crate::storage::StoreResult;

/// Backend interface for the term popularity store
///
/// Implementations provide atomic increments and batched score lookups.
pub trait RankBackend: Send {
    /// Atomically increases the term's score by 1
    fn increment(&mut self, term: &str) -> StoreResult<()>;

    /// Returns one score per input term, aligned with the input order
    ///
    /// Terms with no stored score resolve to 0.
    fn scores(&self, terms: &[String]) -> StoreResult<Vec<f64>>;
}

/// Ranking client applying the engine's degradation policy
///
/// Increment failures are logged and swallowed; lookup failures degrade to
/// all-zero scores. Lookup results are sorted by descending score with ties
/// keeping the caller's input order.
pub struct RankingClient<B: RankBackend> {
    backend: B,
}

impl<B: RankBackend> RankingClient<B> {
    /// Creates a client over the given backend
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Bumps the popularity of the lower-cased term by 1
    ///
    /// A backend error is logged and swallowed.
    pub fn increment(&mut self, term: &str) {
        let term = term.to_lowercase();
        if let Err(e) = self.backend.increment(&term) {
            tracing::error!("Failed to increment score for {}: {}", term, e);
        }
    }

    /// Batched score lookup, sorted by descending score
    ///
    /// Ties and backend failures preserve the input order; on failure every
    /// term comes back with score 0.
    pub fn batch_scores(&self, terms: &[String]) -> Vec<(String, f64)> {
        if terms.is_empty() {
            return Vec::new();
        }

        let scores = match self.backend.scores(terms) {
            Ok(scores) => scores,
            Err(e) => {
                tracing::error!("Ranking score lookup failed: {}", e);
                vec![0.0; terms.len()]
            }
        };

        let mut ranked: Vec<(String, f64)> = terms
            .iter()
            .cloned()
            .zip(scores)
            .collect();

        // Stable sort keeps input order for equal scores
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked
    }
}
