//! In-memory storage backend for development and testing.
//!
//! Mirrors the first-write-wins semantics of the PostgreSQL backend;
//! records keep their insertion order so scans are deterministic.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::{Sentiment, TweetRecord};
use crate::storage::TweetStore;

/// In-memory tweet store.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<TweetRecord>>,
    // Ids whose writes should fail, for exercising per-record error paths.
    poisoned: Mutex<HashSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a record by id.
    pub fn get(&self, id: &str) -> Option<TweetRecord> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make every write touching `id` fail with a database-style error.
    pub fn poison(&self, id: &str) {
        self.poisoned.lock().unwrap().insert(id.to_string());
    }

    fn check_poisoned(&self, id: &str) -> Result<()> {
        if self.poisoned.lock().unwrap().contains(id) {
            return Err(AppError::Io(std::io::Error::other(format!(
                "simulated write failure for {id}"
            ))));
        }
        Ok(())
    }
}

#[async_trait]
impl TweetStore for MemoryStore {
    async fn upsert_if_absent(&self, record: &TweetRecord) -> Result<bool> {
        self.check_poisoned(&record.id)?;
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|r| r.id == record.id) {
            return Ok(false);
        }
        rows.push(record.clone());
        Ok(true)
    }

    async fn scan_all(&self) -> Result<Vec<(String, String)>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .map(|r| (r.id.clone(), r.content.clone()))
            .collect())
    }

    async fn update_sentiment(&self, id: &str, sentiment: Sentiment) -> Result<()> {
        self.check_poisoned(id)?;
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|r| r.id == id) {
            row.sentiment = sentiment;
        }
        Ok(())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(id: &str, content: &str, sentiment: Sentiment) -> TweetRecord {
        TweetRecord {
            id: id.to_string(),
            username: Some("alice".to_string()),
            content: content.to_string(),
            sentiment,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn upsert_is_idempotent_first_write_wins() {
        let store = MemoryStore::new();
        let first = record("1", "original", Sentiment::Positive);
        let mut second = record("1", "changed", Sentiment::Negative);
        second.username = None;

        assert!(store.upsert_if_absent(&first).await.unwrap());
        assert!(!store.upsert_if_absent(&second).await.unwrap());

        let stored = store.get("1").unwrap();
        assert_eq!(stored.content, "original");
        assert_eq!(stored.sentiment, Sentiment::Positive);
        assert_eq!(stored.username.as_deref(), Some("alice"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn scan_preserves_insertion_order() {
        let store = MemoryStore::new();
        for id in ["a", "b", "c"] {
            store
                .upsert_if_absent(&record(id, id, Sentiment::Neutral))
                .await
                .unwrap();
        }
        let ids: Vec<String> = store.scan_all().await.unwrap().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn update_sentiment_overwrites() {
        let store = MemoryStore::new();
        store
            .upsert_if_absent(&record("1", "text", Sentiment::Neutral))
            .await
            .unwrap();
        store
            .update_sentiment("1", Sentiment::Negative)
            .await
            .unwrap();
        assert_eq!(store.get("1").unwrap().sentiment, Sentiment::Negative);
    }

    #[tokio::test]
    async fn poisoned_write_errors() {
        let store = MemoryStore::new();
        store.poison("1");
        let err = store
            .upsert_if_absent(&record("1", "text", Sentiment::Neutral))
            .await;
        assert!(err.is_err());
        assert!(store.is_empty());
    }
}
