//! Storage abstractions for tweet persistence.
//!
//! The store is a flat table keyed by tweet id. Writes are deliberately
//! not batched into transactions: each record's durability is independent,
//! so one failed insert during a long-running ingest loop never takes the
//! rest of the page down with it. Duplicate-id inserts are no-ops; the
//! table's primary key constraint is the sole consistency guard.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Sentiment, TweetRecord};

// Re-export for convenience
pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Trait for tweet storage backends.
#[async_trait]
pub trait TweetStore: Send + Sync {
    /// Insert a record unless its id already exists. Returns whether a
    /// row was actually written; a duplicate id is `Ok(false)`, not an
    /// error. Each call is its own committed unit.
    async fn upsert_if_absent(&self, record: &TweetRecord) -> Result<bool>;

    /// Return every stored `(id, content)` pair, for reanalysis.
    async fn scan_all(&self) -> Result<Vec<(String, String)>>;

    /// Overwrite the sentiment of an existing record.
    async fn update_sentiment(&self, id: &str, sentiment: Sentiment) -> Result<()>;

    /// Number of stored records.
    async fn count(&self) -> Result<i64>;

    /// Release the underlying connection, if any.
    async fn close(&self) {}
}
