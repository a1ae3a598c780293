//! Reanalysis pipeline: re-run classification over stored records.

use tracing::{info, warn};

use crate::context::AppContext;
use crate::error::Result;

/// Reclassify every stored tweet and write the new sentiment back.
///
/// Single pass in scan order; per-record update failures are logged and
/// skipped. Returns the number of records updated.
pub async fn run_reanalyze(ctx: &AppContext) -> Result<usize> {
    let rows = ctx.store.scan_all().await?;

    if rows.is_empty() {
        info!("no tweets found in the database");
        return Ok(0);
    }

    info!("reanalyzing {} tweets", rows.len());

    let mut updated = 0;
    for (id, content) in rows {
        let sentiment = ctx.classifier.classify(&content).await;

        match ctx.store.update_sentiment(&id, sentiment).await {
            Ok(()) => {
                updated += 1;
                info!("updated tweet {} with new sentiment '{}'", id, sentiment);
            }
            Err(e) => warn!("failed to update tweet {}: {}", id, e),
        }
    }

    info!("reanalysis complete: {} tweets updated", updated);
    Ok(updated)
}
