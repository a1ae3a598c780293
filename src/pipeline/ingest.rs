//! Ingest pipeline: fetch -> join -> classify -> store, repeating.
//!
//! One cycle fetches a page, joins each post against the author side
//! table, classifies it, and upserts it. Posts are processed in arrival
//! order and independently: a store failure on one post is logged and
//! the rest of the page continues. An empty or failed fetch skips the
//! inter-cycle pause and retries immediately; the fetch-level waits
//! already happened inside the fetcher.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use tracing::{info, warn};

use crate::context::AppContext;
use crate::error::Result;
use crate::models::{SearchPage, TweetRecord};

/// Counts for one ingest cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleStats {
    pub fetched: usize,
    pub inserted: usize,
    pub duplicates: usize,
    pub failed: usize,
}

/// Run ingest cycles until the shutdown flag is raised.
pub async fn run_ingest(ctx: &AppContext, shutdown: &AtomicBool) -> Result<()> {
    info!("starting ingest loop");

    while !shutdown.load(Ordering::Relaxed) {
        match run_cycle(ctx).await {
            Some(stats) => {
                info!(
                    "cycle complete: {} fetched, {} inserted, {} duplicates, {} failed",
                    stats.fetched, stats.inserted, stats.duplicates, stats.failed
                );
                tokio::time::sleep(ctx.poll_interval).await;
            }
            // No data this cycle: retry immediately, no pause.
            None => continue,
        }
    }

    info!("shutdown requested, stopping ingest loop");
    Ok(())
}

/// Run one fetch-classify-store cycle.
///
/// Returns `None` when the fetch produced no data (failed fetch or empty
/// page), `Some(stats)` otherwise.
pub async fn run_cycle(ctx: &AppContext) -> Option<CycleStats> {
    let Some(page) = ctx.fetcher.fetch_page().await else {
        warn!("no tweets fetched this cycle");
        return None;
    };

    if page.posts.is_empty() {
        info!("search returned no tweets");
        return None;
    }

    Some(ingest_page(ctx, &page).await)
}

/// Classify and store every post in a page, in arrival order.
async fn ingest_page(ctx: &AppContext, page: &SearchPage) -> CycleStats {
    let mut stats = CycleStats {
        fetched: page.posts.len(),
        ..CycleStats::default()
    };

    for post in &page.posts {
        let username = page.username_for(post.author_id.as_deref());
        let sentiment = ctx.classifier.classify(&post.text).await;

        let record = TweetRecord {
            id: post.id.clone(),
            username,
            content: post.text.clone(),
            sentiment,
            created_at: post.created_at.unwrap_or_else(Utc::now),
        };

        match ctx.store.upsert_if_absent(&record).await {
            Ok(true) => {
                stats.inserted += 1;
                info!("stored tweet {} with sentiment '{}'", record.id, sentiment);
            }
            Ok(false) => stats.duplicates += 1,
            Err(e) => {
                stats.failed += 1;
                warn!("failed to store tweet {}: {}", record.id, e);
            }
        }
    }

    stats
}
