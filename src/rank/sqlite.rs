//! SQLite ranking backend
//!
//! Realizes the sorted-set contract over a single table: scores are bumped
//! with an atomic upsert and read back with a batched lookup inside one
//! transaction.

use crate::rank::RankBackend;
use crate::storage::StoreResult;
use rusqlite::Connection;
use std::path::Path;

const RANK_SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS rank_scores (
    term TEXT PRIMARY KEY,
    score REAL NOT NULL DEFAULT 0
);
"#;

/// SQLite-backed popularity score store
pub struct SqliteRankBackend {
    conn: Connection,
}

impl SqliteRankBackend {
    /// Opens (or creates) the ranking store at the given path
    pub fn new(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(RANK_SCHEMA_SQL)?;
        Ok(Self { conn })
    }

    /// Opens an in-memory ranking store (used by tests)
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(RANK_SCHEMA_SQL)?;
        Ok(Self { conn })
    }
}

impl RankBackend for SqliteRankBackend {
    fn increment(&mut self, term: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO rank_scores (term, score) VALUES (?1, 1.0)
             ON CONFLICT(term) DO UPDATE SET score = score + 1.0",
            [term],
        )?;
        Ok(())
    }

    fn scores(&self, terms: &[String]) -> StoreResult<Vec<f64>> {
        let tx = self.conn.unchecked_transaction()?;
        let mut scores = Vec::with_capacity(terms.len());
        {
            let mut stmt = tx.prepare("SELECT score FROM rank_scores WHERE term = ?1")?;
            for term in terms {
                let score: Option<f64> = stmt
                    .query_row([term], |row| row.get(0))
                    .map(Some)
                    .or_else(|e| match e {
                        rusqlite::Error::QueryReturnedNoRows => Ok(None),
                        other => Err(other),
                    })?;
                scores.push(score.unwrap_or(0.0));
            }
        }
        tx.commit()?;
        Ok(scores)
    }
}
