use crate::error::AppError;
use crate::models::EmotionRecord;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use tracing::info;

/// Opens (creating if missing) the diary database at `db_path` and applies migrations.
pub async fn init_db(db_path: &Path) -> Result<SqlitePool, AppError> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    info!("Initializing database at: {}", db_path.display());

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    info!("Database initialized and migrations applied.");

    Ok(pool)
}

// --- Emotions ---

/// Appends one diary entry. `created_at` is stamped here, at write time.
pub async fn save_emotion(
    pool: &SqlitePool,
    user_id: i64,
    username: &str,
    text: &str,
    sentiment: &str,
    score: f32,
) -> Result<EmotionRecord, sqlx::Error> {
    let created_at = Utc::now().timestamp();

    sqlx::query_as::<_, EmotionRecord>(
        r#"
        INSERT INTO emotions (user_id, username, text, sentiment, score, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id, user_id, username, text, sentiment, score, created_at
        "#,
    )
    .bind(user_id)
    .bind(username)
    .bind(text)
    .bind(sentiment)
    .bind(score)
    .bind(created_at)
    .fetch_one(pool)
    .await
}

/// Latest `limit` entries for a user, newest first; equal timestamps keep insertion order reversed.
pub async fn get_recent(
    pool: &SqlitePool,
    user_id: i64,
    limit: u32,
) -> Result<Vec<EmotionRecord>, sqlx::Error> {
    sqlx::query_as::<_, EmotionRecord>(
        r#"
        SELECT id, user_id, username, text, sentiment, score, created_at
        FROM emotions
        WHERE user_id = ?
        ORDER BY created_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(user_id)
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await
}
