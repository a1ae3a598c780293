//! Hosted inference endpoint for the graded-label model.
//!
//! Calls a Hugging Face text-classification endpoint
//! (`nlptown/bert-base-multilingual-uncased-sentiment` by default) and
//! returns the top-scored label. The endpoint URL comes from config; an
//! optional `HF_API_TOKEN` environment variable is sent as a bearer token.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::ClassifierConfig;
use crate::error::{AppError, Result};
use crate::services::classifier::SentimentModel;

/// Graded-label model backed by a hosted inference endpoint.
pub struct InferenceApiModel {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

/// One `{label, score}` candidate from the classification response.
#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

impl InferenceApiModel {
    pub fn new(config: &ClassifierConfig, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            token: env::var("HF_API_TOKEN").ok(),
        })
    }
}

#[async_trait]
impl SentimentModel for InferenceApiModel {
    async fn grade(&self, text: &str) -> Result<String> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&InferenceRequest { inputs: text });

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?.error_for_status()?;

        // The endpoint wraps candidates in an extra array per input.
        let candidates: Vec<Vec<LabelScore>> = response.json().await?;
        let best = candidates
            .into_iter()
            .next()
            .unwrap_or_default()
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .ok_or_else(|| AppError::classify("inference response contained no labels"))?;

        Ok(best.label)
    }
}
