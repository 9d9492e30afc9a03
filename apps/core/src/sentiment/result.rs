use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Emotional polarity of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl SentimentLabel {
    /// Storage and display form of the label.
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }

    /// Maps a free-form model class name onto the three labels.
    ///
    /// `"pos"` wins over `"neg"`; anything else (`"LABEL_1"`, `"mixed"`, ...) is neutral.
    pub fn from_model_label(raw: &str) -> Self {
        let lower = raw.to_lowercase();
        if lower.contains("pos") {
            SentimentLabel::Positive
        } else if lower.contains("neg") {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl FromStr for SentimentLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(SentimentLabel::Positive),
            "neutral" => Ok(SentimentLabel::Neutral),
            "negative" => Ok(SentimentLabel::Negative),
            other => Err(format!("unknown sentiment label '{}'", other)),
        }
    }
}

/// Which path produced a [`SentimentResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    Keyword,
    Model,
}

/// Classification outcome for one message.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    /// Confidence in [0, 1].
    pub score: f32,
    pub source: ScoreSource,
}

impl SentimentResult {
    pub fn new(label: SentimentLabel, score: f32, source: ScoreSource) -> Self {
        Self {
            label,
            score,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_label_normalisation() {
        assert_eq!(SentimentLabel::from_model_label("POSITIVE"), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_model_label("pos"), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_model_label("Negative"), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_model_label("neg"), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_model_label("neutral"), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_model_label("LABEL_1"), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_model_label(""), SentimentLabel::Neutral);
    }

    #[test]
    fn test_label_string_round_trip() {
        for label in [
            SentimentLabel::Positive,
            SentimentLabel::Neutral,
            SentimentLabel::Negative,
        ] {
            assert_eq!(label.as_str().parse::<SentimentLabel>(), Ok(label));
            assert_eq!(label.to_string(), label.as_str());
        }
        assert!("happy".parse::<SentimentLabel>().is_err());
    }
}
