//! Sentiment classification service.
//!
//! Wraps an opaque graded-label model and maps its five-point output to
//! the three-way sentiment stored in the database. Model failures never
//! propagate: any error or unrecognizable label degrades to neutral.

use async_trait::async_trait;
use tracing::warn;

use crate::error::Result;
use crate::models::Sentiment;

/// An opaque model that grades text on a five-point star scale.
#[async_trait]
pub trait SentimentModel: Send + Sync {
    /// Return the model's graded label for the text, e.g. `"4 stars"`.
    async fn grade(&self, text: &str) -> Result<String>;
}

/// Service mapping free text to a sentiment label.
pub struct Classifier {
    model: Box<dyn SentimentModel>,
    max_input_chars: usize,
}

impl Classifier {
    pub fn new(model: Box<dyn SentimentModel>, max_input_chars: usize) -> Self {
        Self {
            model,
            max_input_chars,
        }
    }

    /// Classify text, truncated to the model's input ceiling first.
    ///
    /// Total over {positive, neutral, negative}; failures are logged and
    /// default to neutral.
    pub async fn classify(&self, text: &str) -> Sentiment {
        let input = truncate_chars(text, self.max_input_chars);

        match self.model.grade(input).await {
            Ok(label) => match Sentiment::from_graded_label(&label) {
                Some(sentiment) => sentiment,
                None => {
                    warn!("unrecognized model label {label:?}, defaulting to neutral");
                    Sentiment::Neutral
                }
            },
            Err(e) => {
                warn!("sentiment model failed: {e}, defaulting to neutral");
                Sentiment::Neutral
            }
        }
    }
}

/// Truncate to at most `max` characters without splitting a codepoint.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
