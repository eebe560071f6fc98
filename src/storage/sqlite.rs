//! SQLite document store implementation
//!
//! Documents live in a single table keyed by URL; the FTS5 index over
//! title+content provides the relevance-ordered full-text lookup.

use crate::storage::schema::initialize_schema;
use crate::storage::{DocumentRecord, DocumentStore, StoreError, StoreResult};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::path::Path;

/// SQLite-backed document store
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) a document store at the given path
    pub fn new(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Opens an in-memory store (used by tests)
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Maps a row to a DocumentRecord
    ///
    /// Expects columns in the order: url, title, snippet, content, score,
    /// crawled_at.
    fn row_to_document(row: &rusqlite::Row<'_>) -> rusqlite::Result<DocumentRecord> {
        let raw_crawled_at: String = row.get(5)?;
        let crawled_at = DateTime::parse_from_rfc3339(&raw_crawled_at)
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    5,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?
            .with_timezone(&Utc);

        Ok(DocumentRecord {
            url: row.get(0)?,
            title: row.get(1)?,
            snippet: row.get(2)?,
            content: row.get(3)?,
            score: row.get(4)?,
            crawled_at,
        })
    }
}

/// Builds an FTS5 MATCH expression from arbitrary user text
///
/// Each whitespace-separated token becomes a quoted phrase so FTS5 query
/// syntax characters in user input cannot break the query. Tokens are
/// implicitly ANDed.
fn fts_match_expr(query: &str) -> String {
    query
        .split_whitespace()
        .map(|token| format!("\"{}\"", token.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(" ")
}

impl DocumentStore for SqliteStore {
    fn upsert_document(&mut self, document: &DocumentRecord) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO documents (url, title, snippet, content, score, crawled_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(url) DO UPDATE SET
                 title = excluded.title,
                 snippet = excluded.snippet,
                 content = excluded.content,
                 crawled_at = excluded.crawled_at",
            rusqlite::params![
                document.url,
                document.title,
                document.snippet,
                document.content,
                document.score,
                document.crawled_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn get_document(&self, url: &str) -> StoreResult<Option<DocumentRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT url, title, snippet, content, score, crawled_at
             FROM documents WHERE url = ?1",
        )?;

        let mut rows = stmt.query_map([url], Self::row_to_document)?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    fn search_documents(&self, query: &str, limit: usize) -> StoreResult<Vec<DocumentRecord>> {
        let match_expr = fts_match_expr(query);
        if match_expr.is_empty() {
            return Ok(Vec::new());
        }

        let mut stmt = self.conn.prepare(
            "SELECT d.url, d.title, d.snippet, d.content, d.score, d.crawled_at
             FROM documents_fts f
             JOIN documents d ON d.id = f.rowid
             WHERE documents_fts MATCH ?1
             ORDER BY f.rank
             LIMIT ?2",
        )?;

        let rows = stmt.query_map(
            rusqlite::params![match_expr, limit as i64],
            Self::row_to_document,
        )?;

        let mut documents = Vec::new();
        for row in rows {
            documents.push(row?);
        }
        Ok(documents)
    }

    fn update_document(&mut self, document: &DocumentRecord) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE documents SET
                 title = ?2,
                 snippet = ?3,
                 content = ?4,
                 score = ?5,
                 crawled_at = ?6
             WHERE url = ?1",
            rusqlite::params![
                document.url,
                document.title,
                document.snippet,
                document.content,
                document.score,
                document.crawled_at.to_rfc3339(),
            ],
        )?;

        if changed == 0 {
            return Err(StoreError::DocumentNotFound(document.url.clone()));
        }
        Ok(())
    }

    fn load_titles(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT title FROM documents")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut titles = Vec::new();
        for row in rows {
            titles.push(row?);
        }
        Ok(titles)
    }

    fn count_documents(&self) -> StoreResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_document(url: &str, title: &str, content: &str) -> DocumentRecord {
        DocumentRecord {
            url: url.to_string(),
            title: title.to_string(),
            snippet: content.chars().take(500).collect(),
            content: content.to_string(),
            score: 0.0,
            crawled_at: Utc::now(),
        }
    }

    #[test]
    fn test_upsert_and_get() {
        let mut store = SqliteStore::in_memory().unwrap();
        let doc = test_document("http://a.test/", "Home", "welcome to the test site");

        store.upsert_document(&doc).unwrap();
        let loaded = store.get_document("http://a.test/").unwrap().unwrap();

        assert_eq!(loaded.url, "http://a.test/");
        assert_eq!(loaded.title, "Home");
        assert_eq!(loaded.content, "welcome to the test site");
        assert_eq!(loaded.score, 0.0);
    }

    #[test]
    fn test_get_missing_document_is_none() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(store.get_document("http://missing.test/").unwrap().is_none());
    }

    #[test]
    fn test_recrawl_upserts_without_duplicating() {
        let mut store = SqliteStore::in_memory().unwrap();

        store
            .upsert_document(&test_document("http://a.test/", "Old Title", "old text"))
            .unwrap();
        store
            .upsert_document(&test_document("http://a.test/", "New Title", "new text"))
            .unwrap();

        assert_eq!(store.count_documents().unwrap(), 1);
        let loaded = store.get_document("http://a.test/").unwrap().unwrap();
        assert_eq!(loaded.title, "New Title");
    }

    #[test]
    fn test_recrawl_preserves_score() {
        let mut store = SqliteStore::in_memory().unwrap();

        store
            .upsert_document(&test_document("http://a.test/", "Title", "text"))
            .unwrap();

        let mut scored = store.get_document("http://a.test/").unwrap().unwrap();
        scored.score = 5.0;
        store.update_document(&scored).unwrap();

        store
            .upsert_document(&test_document("http://a.test/", "Title v2", "text v2"))
            .unwrap();

        let loaded = store.get_document("http://a.test/").unwrap().unwrap();
        assert_eq!(loaded.score, 5.0);
        assert_eq!(loaded.title, "Title v2");
    }

    #[test]
    fn test_full_text_search_matches_title_and_content() {
        let mut store = SqliteStore::in_memory().unwrap();
        store
            .upsert_document(&test_document(
                "http://a.test/rust",
                "Rust Guide",
                "systems programming language",
            ))
            .unwrap();
        store
            .upsert_document(&test_document(
                "http://a.test/cooking",
                "Cooking",
                "recipes with smoked paprika",
            ))
            .unwrap();
        store
            .upsert_document(&test_document(
                "http://a.test/other",
                "Gardening",
                "flowers and soil",
            ))
            .unwrap();

        let by_title = store.search_documents("rust", 20).unwrap();
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].url, "http://a.test/rust");

        let by_content = store.search_documents("paprika", 20).unwrap();
        assert_eq!(by_content.len(), 1);
        assert_eq!(by_content[0].url, "http://a.test/cooking");
    }

    #[test]
    fn test_search_respects_limit() {
        let mut store = SqliteStore::in_memory().unwrap();
        for i in 0..5 {
            store
                .upsert_document(&test_document(
                    &format!("http://a.test/{}", i),
                    &format!("Widget {}", i),
                    "widget catalog page",
                ))
                .unwrap();
        }

        let results = store.search_documents("widget", 3).unwrap();
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn test_search_special_characters_do_not_error() {
        let mut store = SqliteStore::in_memory().unwrap();
        store
            .upsert_document(&test_document("http://a.test/", "Title", "content"))
            .unwrap();

        // FTS5 query syntax characters must be neutralized
        assert!(store.search_documents("\"broken", 20).is_ok());
        assert!(store.search_documents("a AND b OR c*", 20).is_ok());
        assert!(store.search_documents("(paren)", 20).is_ok());
    }

    #[test]
    fn test_search_stays_in_sync_after_update() {
        let mut store = SqliteStore::in_memory().unwrap();
        store
            .upsert_document(&test_document("http://a.test/", "Alpha", "first words"))
            .unwrap();

        let mut doc = store.get_document("http://a.test/").unwrap().unwrap();
        doc.title = "Omega".to_string();
        doc.content = "replacement words".to_string();
        store.update_document(&doc).unwrap();

        assert!(store.search_documents("alpha", 20).unwrap().is_empty());
        assert_eq!(store.search_documents("omega", 20).unwrap().len(), 1);
    }

    #[test]
    fn test_update_missing_document_is_not_found() {
        let mut store = SqliteStore::in_memory().unwrap();
        let doc = test_document("http://missing.test/", "Ghost", "nothing");

        let result = store.update_document(&doc);
        assert!(matches!(result, Err(StoreError::DocumentNotFound(_))));
    }

    #[test]
    fn test_load_titles() {
        let mut store = SqliteStore::in_memory().unwrap();
        store
            .upsert_document(&test_document("http://a.test/1", "First", "x"))
            .unwrap();
        store
            .upsert_document(&test_document("http://a.test/2", "Second", "y"))
            .unwrap();

        let mut titles = store.load_titles().unwrap();
        titles.sort();
        assert_eq!(titles, vec!["First".to_string(), "Second".to_string()]);
    }

    #[test]
    fn test_fts_match_expr_quotes_tokens() {
        assert_eq!(fts_match_expr("hello world"), "\"hello\" \"world\"");
        assert_eq!(fts_match_expr("say \"hi\""), "\"say\" \"\"\"hi\"\"\"");
        assert_eq!(fts_match_expr("   "), "");
    }
}
