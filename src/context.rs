// src/context.rs

//! Process-wide context: the store handle, classifier and fetcher,
//! constructed once at startup and torn down on every exit path.

use std::sync::Arc;
use std::time::Duration;

use crate::services::{Classifier, TweetFetcher};
use crate::storage::TweetStore;

/// Owns the long-lived collaborators for one run.
pub struct AppContext {
    pub store: Arc<dyn TweetStore>,
    pub classifier: Classifier,
    pub fetcher: TweetFetcher,
    pub poll_interval: Duration,
}

impl AppContext {
    /// Release held resources (the store's connection pool).
    pub async fn close(self) {
        self.store.close().await;
    }
}
