//! # Sentiment Module
//!
//! Maps the text of a mood message to a [`SentimentResult`].
//!
//! ## Components
//! - `lexicon`: keyword heuristic (always available, deterministic)
//! - `model`: plugin boundary for heavier models
//! - `http_model`: hosted text-classification model
//! - `embedding_model`: local FastEmbed anchor similarity
//! - `classifier`: model first, heuristic as fallback

pub mod classifier;
pub mod embedding_model;
pub mod http_model;
pub mod lexicon;
pub mod model;
pub mod result;

pub use classifier::{load_model, SentimentClassifier, MAX_MODEL_INPUT_CHARS};
pub use http_model::HttpSentimentModel;
pub use lexicon::{KeywordScorer, NEGATIVE_KEYWORDS, POSITIVE_KEYWORDS};
pub use model::{ModelError, ModelPrediction, SentimentModel};
pub use result::{ScoreSource, SentimentLabel, SentimentResult};
