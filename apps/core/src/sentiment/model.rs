use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure at the model plugin boundary. Always recovered by the keyword fallback.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed model output: {0}")]
    Malformed(String),

    #[error("model unavailable: {0}")]
    Unavailable(String),
}

/// Top class reported by a sentiment model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPrediction {
    /// Raw class name as the model reports it (`"POSITIVE"`, `"neg"`, `"LABEL_2"`...).
    pub label: String,
    pub score: f32,
}

impl ModelPrediction {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }

    /// Rejects confidences that are NaN or outside [0, 1].
    pub fn validated(self) -> Result<Self, ModelError> {
        if self.score.is_finite() && (0.0..=1.0).contains(&self.score) {
            Ok(self)
        } else {
            Err(ModelError::Malformed(format!(
                "confidence {} for label '{}' is outside [0, 1]",
                self.score, self.label
            )))
        }
    }
}

/// A pluggable sentiment model sitting in front of the keyword heuristic.
///
/// Implementations may be slow or fallible; callers must treat any `Err`
/// as "no opinion" and fall back.
#[async_trait]
pub trait SentimentModel: Send + Sync + 'static {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Returns the model's top class for `text`.
    async fn infer(&self, text: &str) -> Result<ModelPrediction, ModelError>;
}
