//! Twitter/X v2 recent-search client.

use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::{Client, StatusCode};

use crate::error::{AppError, Result};
use crate::models::SearchPage;
use crate::models::search::SearchResponse;
use crate::services::fetcher::SearchApi;

/// Default API host.
pub const DEFAULT_BASE_URL: &str = "https://api.x.com";

/// Header carrying the epoch second at which the request quota resets.
const RATE_LIMIT_RESET_HEADER: &str = "x-rate-limit-reset";

/// Client for the v2 recent-search endpoint.
pub struct RecentSearchApi {
    client: Client,
    base_url: String,
    bearer_token: String,
}

impl RecentSearchApi {
    pub fn new(bearer_token: String, timeout_secs: u64) -> Result<Self> {
        Self::with_base_url(bearer_token, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Create a client against a custom host (for testing).
    pub fn with_base_url(
        bearer_token: String,
        timeout_secs: u64,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            bearer_token,
        })
    }
}

#[async_trait]
impl SearchApi for RecentSearchApi {
    async fn search_recent(&self, query: &str, page_size: u32) -> Result<SearchPage> {
        let url = format!("{}/2/tweets/search/recent", self.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .query(&[
                ("query", query),
                ("max_results", &page_size.to_string()),
                ("tweet.fields", "created_at"),
                ("expansions", "author_id"),
                ("user.fields", "username"),
            ])
            .send()
            .await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            let reset_at = response
                .headers()
                .get(RATE_LIMIT_RESET_HEADER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<i64>().ok())
                .and_then(|secs| DateTime::from_timestamp(secs, 0));
            return Err(AppError::RateLimited { reset_at });
        }

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::fetch(
                "search_recent",
                format!("status {status}: {body}"),
            ));
        }

        let parsed: SearchResponse = response.json().await?;
        Ok(SearchPage::from(parsed))
    }
}
