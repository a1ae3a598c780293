// src/error.rs

//! Unified error handling for the application.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type alias for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Database operation failed
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// The search endpoint rejected the request for quota reasons.
    /// `reset_at` is the remote-supplied time after which requests
    /// may resume, when the response carried one.
    #[error("rate limit exceeded")]
    RateLimited { reset_at: Option<DateTime<Utc>> },

    /// Search request failed for a non-quota reason
    #[error("fetch error for {context}: {message}")]
    Fetch { context: String, message: String },

    /// Sentiment model call failed
    #[error("classification error: {0}")]
    Classify(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a fetch error with context.
    pub fn fetch(context: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Fetch {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create a classification error.
    pub fn classify(message: impl Into<String>) -> Self {
        Self::Classify(message.into())
    }
}
