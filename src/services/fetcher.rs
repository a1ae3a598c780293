//! Tweet fetch service with bounded retry and rate-limit backoff.
//!
//! Wraps an opaque search API. Each `fetch_page` call issues one search
//! request for the configured query, retrying transient failures up to a
//! fixed budget. Rate-limit rejections sleep until the remote-supplied
//! reset time and do not consume retry budget; a persistently rate-limited
//! call therefore waits as long as the remote keeps saying so.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{error, warn};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::SearchPage;

/// An opaque remote search call.
#[async_trait]
pub trait SearchApi: Send + Sync {
    /// Fetch one page of recent posts matching `query`.
    async fn search_recent(&self, query: &str, page_size: u32) -> Result<SearchPage>;
}

/// Service fetching pages of recent tweets for a fixed query.
pub struct TweetFetcher {
    api: Box<dyn SearchApi>,
    query: String,
    page_size: u32,
    max_attempts: u32,
    retry_wait: Duration,
    rate_limit_fallback: Duration,
}

impl TweetFetcher {
    pub fn new(api: Box<dyn SearchApi>, config: &Config) -> Self {
        Self {
            api,
            query: config.search.query.clone(),
            page_size: config.search.page_size,
            max_attempts: config.fetch.max_attempts,
            retry_wait: Duration::from_secs(config.fetch.retry_wait_secs),
            rate_limit_fallback: Duration::from_secs(config.fetch.rate_limit_fallback_secs),
        }
    }

    /// Fetch one page, retrying on failure.
    ///
    /// Returns `None` after the retry budget is exhausted; the caller
    /// treats that as "no data this cycle", not as fatal.
    pub async fn fetch_page(&self) -> Option<SearchPage> {
        let mut attempt = 0;

        while attempt < self.max_attempts {
            match self.api.search_recent(&self.query, self.page_size).await {
                Ok(page) => return Some(page),
                Err(AppError::RateLimited { reset_at }) => {
                    let wait = rate_limit_wait(reset_at, self.rate_limit_fallback);
                    warn!(
                        "rate limit exceeded, waiting {}s before retrying",
                        wait.as_secs()
                    );
                    tokio::time::sleep(wait).await;
                }
                Err(e) => {
                    attempt += 1;
                    warn!(
                        "tweet fetch attempt {}/{} failed: {}",
                        attempt, self.max_attempts, e
                    );
                    if attempt < self.max_attempts {
                        tokio::time::sleep(self.retry_wait).await;
                    }
                }
            }
        }

        error!("failed to fetch tweets after {} attempts", self.max_attempts);
        None
    }
}

/// Wait until the remote-supplied reset time, clamped at zero; fall back
/// to a fixed duration when the response carried no reset time.
fn rate_limit_wait(reset_at: Option<DateTime<Utc>>, fallback: Duration) -> Duration {
    match reset_at {
        Some(reset) => (reset - Utc::now()).to_std().unwrap_or(Duration::ZERO),
        None => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};

    /// Scripted search API; pops one result per call.
    struct ScriptedApi {
        script: Mutex<Vec<Result<SearchPage>>>,
        calls: Arc<AtomicU32>,
    }

    #[async_trait]
    impl SearchApi for ScriptedApi {
        async fn search_recent(&self, _query: &str, _page_size: u32) -> Result<SearchPage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(AppError::fetch("scripted", "script exhausted")))
        }
    }

    fn transient() -> AppError {
        AppError::fetch("search_recent", "connection reset")
    }

    fn fetcher_with(mut script: Vec<Result<SearchPage>>) -> (TweetFetcher, Arc<AtomicU32>) {
        script.reverse();
        let calls = Arc::new(AtomicU32::new(0));
        let api = Box::new(ScriptedApi {
            script: Mutex::new(script),
            calls: calls.clone(),
        });
        (TweetFetcher::new(api, &Config::default()), calls)
    }

    #[tokio::test(start_paused = true)]
    async fn returns_page_on_first_success() {
        let (fetcher, api) = fetcher_with(vec![Ok(SearchPage::default())]);
        assert!(fetcher.fetch_page().await.is_some());
        assert_eq!(api.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_max_attempts() {
        let script = (0..5).map(|_| Err(transient())).collect();
        let (fetcher, api) = fetcher_with(script);

        assert!(fetcher.fetch_page().await.is_none());
        // No sixth attempt.
        assert_eq!(api.load(Ordering::SeqCst), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn transient_failures_use_fixed_wait() {
        let (fetcher, _) = fetcher_with(vec![Err(transient()), Ok(SearchPage::default())]);

        let started = tokio::time::Instant::now();
        assert!(fetcher.fetch_page().await.is_some());
        let waited = started.elapsed();

        assert!(waited >= Duration::from_secs(10));
        assert!(waited < Duration::from_secs(12));
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limit_waits_until_reset_time() {
        let reset_at = Utc::now() + chrono::Duration::seconds(120);
        let script = vec![
            Err(AppError::RateLimited {
                reset_at: Some(reset_at),
            }),
            Ok(SearchPage::default()),
        ];
        let (fetcher, api) = fetcher_with(script);

        let started = tokio::time::Instant::now();
        assert!(fetcher.fetch_page().await.is_some());
        let waited = started.elapsed();

        // Dynamically computed wait, not the fixed 10s retry wait.
        assert!(waited >= Duration::from_secs(115));
        assert!(waited <= Duration::from_secs(125));
        assert_eq!(api.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limit_without_reset_uses_fallback() {
        let script = vec![
            Err(AppError::RateLimited { reset_at: None }),
            Ok(SearchPage::default()),
        ];
        let (fetcher, _) = fetcher_with(script);

        let started = tokio::time::Instant::now();
        assert!(fetcher.fetch_page().await.is_some());
        let waited = started.elapsed();

        assert!(waited >= Duration::from_secs(900));
        assert!(waited <= Duration::from_secs(902));
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limit_does_not_consume_retry_budget() {
        let mut script: Vec<Result<SearchPage>> = vec![
            Err(AppError::RateLimited { reset_at: None }),
            Err(AppError::RateLimited { reset_at: None }),
        ];
        script.extend((0..5).map(|_| Err(transient())));
        let (fetcher, api) = fetcher_with(script);

        assert!(fetcher.fetch_page().await.is_none());
        // Two rate-limit rejections plus the full five-attempt budget.
        assert_eq!(api.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn stale_reset_time_clamps_to_zero() {
        let past = Utc::now() - chrono::Duration::seconds(30);
        assert_eq!(
            rate_limit_wait(Some(past), Duration::from_secs(900)),
            Duration::ZERO
        );
    }
}
