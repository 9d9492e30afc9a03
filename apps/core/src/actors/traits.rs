use crate::error::AppError;
use crate::models::EmotionRecord;
use crate::sentiment::SentimentResult;
use async_trait::async_trait;

/// Defines the public interface for the interaction logger (the emotion diary).
///
/// This trait abstracts the storage backend so the supervisor can be driven by
/// an in-memory or failing log in tests.
#[async_trait]
pub trait InteractionLog: Send + Sync + 'static {
    /// Appends one classified interaction. Surfaces storage errors to the caller.
    async fn record(
        &self,
        user_id: i64,
        display_name: &str,
        text: &str,
        result: &SentimentResult,
    ) -> Result<EmotionRecord, AppError>;

    /// Returns at most `limit` records for the user, newest first.
    ///
    /// A user without records yields an empty vector, not an error.
    async fn recent(&self, user_id: i64, limit: u32) -> Result<Vec<EmotionRecord>, AppError>;
}
