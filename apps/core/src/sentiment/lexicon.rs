//! Keyword heuristic used whenever no model is configured or the model fails.
//!
//! Matching is plain substring search on the lower-cased text, so stems such as
//! `"втом"` catch `"втомлений"`, `"втома"` and friends. Each keyword counts once.

use super::result::{ScoreSource, SentimentLabel, SentimentResult};

/// Stems signalling a good mood (Ukrainian plus two common English tokens).
pub const POSITIVE_KEYWORDS: &[&str] = &["добре", "радіс", "щас", "спокі", "ok", "happy"];

/// Stems signalling a bad mood.
pub const NEGATIVE_KEYWORDS: &[&str] = &["поган", "сум", "депрес", "втом", "стрес", "тривож"];

const KEYWORD_WEIGHT: f32 = 0.6;
const DECISION_MARGIN: f32 = 0.2;
const NEUTRAL_CONFIDENCE: f32 = 0.5;

/// Keywords found in a text, split by polarity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordHits {
    pub positive: Vec<&'static str>,
    pub negative: Vec<&'static str>,
}

impl KeywordHits {
    /// Net accumulated score before clamping; may exceed 1.0 in magnitude.
    pub fn raw_score(&self) -> f32 {
        let net = self.positive.len() as i64 - self.negative.len() as i64;
        net as f32 * KEYWORD_WEIGHT
    }
}

/// Deterministic keyword-based sentiment scorer.
#[derive(Debug, Clone)]
pub struct KeywordScorer {
    positive: &'static [&'static str],
    negative: &'static [&'static str],
}

impl Default for KeywordScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordScorer {
    pub fn new() -> Self {
        Self {
            positive: POSITIVE_KEYWORDS,
            negative: NEGATIVE_KEYWORDS,
        }
    }

    /// Collects every keyword occurring in `text`.
    pub fn hits(&self, text: &str) -> KeywordHits {
        let lower = text.to_lowercase();
        KeywordHits {
            positive: self
                .positive
                .iter()
                .copied()
                .filter(|kw| lower.contains(kw))
                .collect(),
            negative: self
                .negative
                .iter()
                .copied()
                .filter(|kw| lower.contains(kw))
                .collect(),
        }
    }

    /// Scores `text`. Never fails; an empty text is neutral.
    pub fn score(&self, text: &str) -> SentimentResult {
        let raw = self.hits(text).raw_score();

        if raw > DECISION_MARGIN {
            SentimentResult::new(SentimentLabel::Positive, raw.min(1.0), ScoreSource::Keyword)
        } else if raw < -DECISION_MARGIN {
            SentimentResult::new(
                SentimentLabel::Negative,
                (-raw).clamp(0.0, 1.0),
                ScoreSource::Keyword,
            )
        } else {
            SentimentResult::new(SentimentLabel::Neutral, NEUTRAL_CONFIDENCE, ScoreSource::Keyword)
        }
    }
}
