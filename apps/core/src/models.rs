use crate::sentiment::SentimentLabel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One classified mood message, as stored in the emotion diary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct EmotionRecord {
    /// Storage-assigned identity; increases with every insert.
    pub id: i64,
    /// Chat platform user identifier.
    pub user_id: i64,
    /// Display name at the time of writing; may be empty.
    pub username: String,
    /// Raw message text.
    pub text: String,
    /// Label string: `positive`, `neutral` or `negative`.
    pub sentiment: String,
    /// Classifier confidence.
    pub score: f32,
    /// Unix timestamp (seconds) assigned when the record was written.
    pub created_at: i64,
}

impl EmotionRecord {
    #[allow(dead_code)]
    pub fn label(&self) -> Option<SentimentLabel> {
        self.sentiment.parse().ok()
    }

    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_at, 0)
    }
}
