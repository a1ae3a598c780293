//! PostgreSQL storage backend.
//!
//! ## Schema
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS tweets (
//!     tweet_id   TEXT PRIMARY KEY,
//!     username   TEXT,
//!     content    TEXT NOT NULL,
//!     sentiment  TEXT NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL
//! );
//! ```
//!
//! Inserts go through `ON CONFLICT (tweet_id) DO NOTHING`, so replayed
//! pages never overwrite earlier writes.

use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::DbConfig;
use crate::error::Result;
use crate::models::{Sentiment, TweetRecord};
use crate::storage::TweetStore;

/// PostgreSQL-backed tweet store.
///
/// Holds the single long-lived connection handle for the process;
/// opened once at startup and closed once at shutdown.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect and initialize the schema. Connection failure here is
    /// startup-fatal for the caller.
    pub async fn connect(db: &DbConfig) -> Result<Self> {
        // Ingest is fully sequential; one connection is enough.
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(&db.url())
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Wrap an existing pool (used by tests against a scratch database).
    pub async fn from_pool(pool: PgPool) -> Result<Self> {
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS tweets (
                tweet_id   TEXT PRIMARY KEY,
                username   TEXT,
                content    TEXT NOT NULL,
                sentiment  TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl TweetStore for PgStore {
    async fn upsert_if_absent(&self, record: &TweetRecord) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO tweets (tweet_id, username, content, sentiment, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (tweet_id) DO NOTHING
            "#,
        )
        .bind(&record.id)
        .bind(&record.username)
        .bind(&record.content)
        .bind(record.sentiment.as_str())
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn scan_all(&self) -> Result<Vec<(String, String)>> {
        let rows = sqlx::query("SELECT tweet_id, content FROM tweets")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| {
                let id: String = row.try_get("tweet_id")?;
                let content: String = row.try_get("content")?;
                Ok((id, content))
            })
            .collect()
    }

    async fn update_sentiment(&self, id: &str, sentiment: Sentiment) -> Result<()> {
        sqlx::query("UPDATE tweets SET sentiment = $1 WHERE tweet_id = $2")
            .bind(sentiment.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tweets")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
