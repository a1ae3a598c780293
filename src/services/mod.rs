// src/services/mod.rs

//! External-facing services: search fetch and sentiment classification.

pub mod classifier;
pub mod fetcher;
pub mod inference;
pub mod twitter;

pub use classifier::{Classifier, SentimentModel};
pub use fetcher::{SearchApi, TweetFetcher};
pub use inference::InferenceApiModel;
pub use twitter::RecentSearchApi;
