// src/models/mod.rs

//! Data model definitions.

pub mod search;
pub mod tweet;

pub use search::{RawPost, SearchPage};
pub use tweet::{Sentiment, TweetRecord};
