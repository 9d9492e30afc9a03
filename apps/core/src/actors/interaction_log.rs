use crate::actors::traits::InteractionLog;
use crate::database;
use crate::error::AppError;
use crate::models::EmotionRecord;
use crate::sentiment::SentimentResult;
use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;

/// SQLite-backed emotion diary.
#[derive(Clone)]
pub struct SqliteInteractionLog {
    pool: SqlitePool,
}

impl SqliteInteractionLog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InteractionLog for SqliteInteractionLog {
    async fn record(
        &self,
        user_id: i64,
        display_name: &str,
        text: &str,
        result: &SentimentResult,
    ) -> Result<EmotionRecord, AppError> {
        let record = database::save_emotion(
            &self.pool,
            user_id,
            display_name,
            text,
            result.label.as_str(),
            result.score,
        )
        .await?;
        Ok(record)
    }

    async fn recent(&self, user_id: i64, limit: u32) -> Result<Vec<EmotionRecord>, AppError> {
        let records = database::get_recent(&self.pool, user_id, limit).await?;
        Ok(records)
    }
}
