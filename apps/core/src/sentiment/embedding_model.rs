//! Local sentiment model built on FastEmbed sentence embeddings.
//!
//! The text embedding is compared (cosine similarity) against pre-computed
//! embeddings of short mood descriptions, one anchor per label. No fine-tuned
//! classifier is needed, only the AllMiniLML6V2 embedding model.

use super::model::{ModelError, ModelPrediction, SentimentModel};
use super::result::SentimentLabel;
use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

struct SentimentAnchor {
    label: SentimentLabel,
    descriptions: &'static [&'static str],
}

const SENTIMENT_ANCHORS: &[SentimentAnchor] = &[
    SentimentAnchor {
        label: SentimentLabel::Positive,
        descriptions: &[
            "I feel good, happy and calm",
            "joyful relaxed content peaceful",
            "мені добре, я щасливий і спокійний",
            "радість спокій задоволення",
        ],
    },
    SentimentAnchor {
        label: SentimentLabel::Neutral,
        descriptions: &[
            "I feel okay, nothing special today",
            "ordinary day, so-so",
            "звичайний день, нормально",
            "нічого особливого",
        ],
    },
    SentimentAnchor {
        label: SentimentLabel::Negative,
        descriptions: &[
            "I feel bad, sad, tired and stressed",
            "anxious depressed exhausted lonely",
            "мені погано, сумно, я втомлений",
            "стрес тривога депресія",
        ],
    },
];

pub struct EmbeddingSentimentModel {
    model: Arc<TextEmbedding>,
    anchors: Arc<Vec<(SentimentLabel, Vec<f32>)>>,
}

impl EmbeddingSentimentModel {
    /// Loads (downloading on first use) the embedding model into `cache_dir`.
    ///
    /// Blocking; call from `spawn_blocking`.
    pub fn load(cache_dir: PathBuf) -> Result<Self, ModelError> {
        let mut options = InitOptions::new(EmbeddingModel::AllMiniLML6V2);
        options.show_download_progress = false;
        options.cache_dir = cache_dir;

        let model = TextEmbedding::try_new(options)
            .map_err(|e| ModelError::Unavailable(e.to_string()))?;

        let mut anchors = Vec::with_capacity(SENTIMENT_ANCHORS.len());
        for anchor in SENTIMENT_ANCHORS {
            let combined = anchor.descriptions.join(" ");
            match model.embed(vec![combined], None) {
                Ok(mut embeddings) if !embeddings.is_empty() => {
                    anchors.push((anchor.label, embeddings.swap_remove(0)));
                }
                Ok(_) => warn!("Empty embedding for sentiment anchor {}", anchor.label),
                Err(e) => warn!("Failed to embed sentiment anchor {}: {}", anchor.label, e),
            }
        }

        if anchors.is_empty() {
            return Err(ModelError::Unavailable(
                "no sentiment anchors could be embedded".to_string(),
            ));
        }
        info!("Pre-computed {} sentiment anchor embeddings", anchors.len());

        Ok(Self {
            model: Arc::new(model),
            anchors: Arc::new(anchors),
        })
    }
}

fn best_anchor(
    query: &[f32],
    anchors: &[(SentimentLabel, Vec<f32>)],
) -> Option<(SentimentLabel, f32)> {
    anchors
        .iter()
        .map(|(label, embedding)| (*label, cosine_similarity(query, embedding)))
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
}

#[async_trait]
impl SentimentModel for EmbeddingSentimentModel {
    fn name(&self) -> &str {
        "fastembed-all-minilm-l6-v2"
    }

    async fn infer(&self, text: &str) -> Result<ModelPrediction, ModelError> {
        let model = Arc::clone(&self.model);
        let anchors = Arc::clone(&self.anchors);
        let text = text.to_string();

        tokio::task::spawn_blocking(move || {
            let query = model
                .embed(vec![text], None)
                .map_err(|e| ModelError::Unavailable(e.to_string()))?
                .into_iter()
                .next()
                .ok_or_else(|| ModelError::Malformed("empty query embedding".to_string()))?;

            let (label, similarity) = best_anchor(&query, &anchors)
                .ok_or_else(|| ModelError::Malformed("no anchors".to_string()))?;
            Ok(ModelPrediction::new(label.as_str(), similarity.clamp(0.0, 1.0)))
        })
        .await
        .map_err(|e| ModelError::Unavailable(format!("embedding task failed: {}", e)))?
    }
}

/// Calculate cosine similarity between two vectors
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot_product / (magnitude_a * magnitude_b)
}
