// src/lib.rs

//! sentipulse library
//!
//! Polls the Twitter/X recent-search endpoint for a configured keyword,
//! classifies each tweet's sentiment, and persists results to PostgreSQL.

pub mod config;
pub mod context;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
