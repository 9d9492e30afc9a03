//! Sentiment classifier: optional model first, keyword heuristic as the guaranteed fallback.

use super::embedding_model::EmbeddingSentimentModel;
use super::http_model::HttpSentimentModel;
use super::lexicon::KeywordScorer;
use super::model::{ModelPrediction, SentimentModel};
use super::result::{ScoreSource, SentimentLabel, SentimentResult};
use crate::config::{BotConfig, SentimentBackend};
use crate::fs_manager::PortablePathManager;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Longest prefix, in characters, handed to a model.
pub const MAX_MODEL_INPUT_CHARS: usize = 1000;

pub struct SentimentClassifier {
    scorer: KeywordScorer,
    model: Option<Arc<dyn SentimentModel>>,
}

impl Default for SentimentClassifier {
    fn default() -> Self {
        Self::keyword_only()
    }
}

impl SentimentClassifier {
    pub fn new(model: Option<Arc<dyn SentimentModel>>) -> Self {
        Self {
            scorer: KeywordScorer::new(),
            model,
        }
    }

    pub fn keyword_only() -> Self {
        Self::new(None)
    }

    #[allow(dead_code)]
    pub fn with_model(model: Arc<dyn SentimentModel>) -> Self {
        Self::new(Some(model))
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Classifies `text`. Never fails: model errors degrade to the keyword heuristic.
    pub async fn classify(&self, text: &str) -> SentimentResult {
        let Some(model) = &self.model else {
            return self.scorer.score(text);
        };

        let input = truncate_chars(text, MAX_MODEL_INPUT_CHARS);
        match model.infer(input).await.and_then(ModelPrediction::validated) {
            Ok(prediction) => {
                debug!(
                    model = model.name(),
                    raw_label = %prediction.label,
                    score = prediction.score,
                    "Model prediction"
                );
                SentimentResult::new(
                    SentimentLabel::from_model_label(&prediction.label),
                    prediction.score,
                    ScoreSource::Model,
                )
            }
            Err(e) => {
                warn!(model = model.name(), error = %e, "Sentiment model failed, using keyword fallback");
                self.scorer.score(text)
            }
        }
    }
}

/// Returns the first `max_chars` characters of `text` without splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Builds the model selected by the configuration.
///
/// Any loading failure is logged and yields `None`; the bot then runs keyword-only.
pub async fn load_model(config: &BotConfig) -> Option<Arc<dyn SentimentModel>> {
    match config.sentiment_backend {
        SentimentBackend::Keyword => {
            info!("Sentiment backend: keyword heuristic");
            None
        }
        SentimentBackend::Http => {
            let model_id = config.hf_model.as_deref()?;
            match HttpSentimentModel::new(
                &config.hf_api_url,
                model_id,
                config.hf_api_token.clone(),
                Duration::from_secs(config.model_timeout_secs),
            ) {
                Ok(model) => {
                    info!("Sentiment backend: HTTP model {}", model_id);
                    let model: Arc<dyn SentimentModel> = Arc::new(model);
                    Some(model)
                }
                Err(e) => {
                    warn!("Failed to set up HTTP sentiment model {}: {}", model_id, e);
                    None
                }
            }
        }
        SentimentBackend::Embedding => {
            let cache_dir = PortablePathManager::models_dir().join("embeddings");
            match tokio::task::spawn_blocking(move || EmbeddingSentimentModel::load(cache_dir)).await
            {
                Ok(Ok(model)) => {
                    info!("Sentiment backend: local embedding model");
                    let model: Arc<dyn SentimentModel> = Arc::new(model);
                    Some(model)
                }
                Ok(Err(e)) => {
                    warn!("Failed to load embedding sentiment model: {}", e);
                    None
                }
                Err(e) => {
                    warn!("Embedding model loader panicked: {}", e);
                    None
                }
            }
        }
    }
}
