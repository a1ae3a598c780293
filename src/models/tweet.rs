//! Stored tweet record and sentiment label.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Three-way sentiment label, stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Text form used in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }

    /// Parse the stored text form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "positive" => Some(Sentiment::Positive),
            "neutral" => Some(Sentiment::Neutral),
            "negative" => Some(Sentiment::Negative),
            _ => None,
        }
    }

    /// Map a graded model label (five-point star scale) to a sentiment.
    ///
    /// Scores of 4-5 map to positive, 3 to neutral, 1-2 to negative.
    /// Returns `None` for labels that carry no recognizable score; the
    /// classifier treats that as a model failure and defaults to neutral.
    pub fn from_graded_label(label: &str) -> Option<Self> {
        let label = label.to_lowercase();
        if label.contains("4 star") || label.contains("5 star") {
            Some(Sentiment::Positive)
        } else if label.contains("3 star") {
            Some(Sentiment::Neutral)
        } else if label.contains("1 star") || label.contains("2 star") {
            Some(Sentiment::Negative)
        } else {
            None
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified tweet as persisted in the `tweets` table.
///
/// `id` is the source-assigned tweet identifier, widened to a string to
/// avoid precision loss on 64-bit ids. First write wins: inserting a
/// duplicate `id` is a no-op.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TweetRecord {
    /// Source tweet id (natural key)
    pub id: String,

    /// Author username, absent when the author expansion had no entry
    pub username: Option<String>,

    /// Raw tweet text
    pub content: String,

    /// Classified sentiment
    pub sentiment: Sentiment,

    /// Source-assigned creation timestamp
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graded_label_mapping() {
        assert_eq!(
            Sentiment::from_graded_label("5 stars"),
            Some(Sentiment::Positive)
        );
        assert_eq!(
            Sentiment::from_graded_label("4 stars"),
            Some(Sentiment::Positive)
        );
        assert_eq!(
            Sentiment::from_graded_label("3 stars"),
            Some(Sentiment::Neutral)
        );
        assert_eq!(
            Sentiment::from_graded_label("2 stars"),
            Some(Sentiment::Negative)
        );
        assert_eq!(
            Sentiment::from_graded_label("1 star"),
            Some(Sentiment::Negative)
        );
    }

    #[test]
    fn graded_label_is_case_insensitive() {
        assert_eq!(
            Sentiment::from_graded_label("5 Stars"),
            Some(Sentiment::Positive)
        );
    }

    #[test]
    fn malformed_label_is_rejected() {
        assert_eq!(Sentiment::from_graded_label("LABEL_2"), None);
        assert_eq!(Sentiment::from_graded_label(""), None);
    }

    #[test]
    fn sentiment_text_round_trip() {
        for s in [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative] {
            assert_eq!(Sentiment::parse(s.as_str()), Some(s));
        }
        assert_eq!(Sentiment::parse("angry"), None);
    }
}
