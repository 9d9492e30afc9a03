//! Bot configuration loaded from the environment (and an optional `.env` file).

use crate::error::AppError;
use crate::fs_manager::PortablePathManager;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use validator::Validate;

pub const DEFAULT_HF_API_URL: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Which sentiment model sits in front of the keyword fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentBackend {
    /// Keyword heuristic only.
    Keyword,
    /// Hosted text-classification model reached over HTTP.
    Http,
    /// Local embedding model compared against sentiment anchors.
    Embedding,
}

impl FromStr for SentimentBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keyword" => Ok(Self::Keyword),
            "http" => Ok(Self::Http),
            "embedding" => Ok(Self::Embedding),
            other => Err(AppError::Config(format!(
                "Unknown SENTIMENT_BACKEND '{}' (expected keyword, http or embedding)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(AppError::Config(format!("Unknown LOG_FORMAT '{}'", other))),
        }
    }
}

/// Runtime configuration for the bot process.
#[derive(Debug, Clone, Validate)]
pub struct BotConfig {
    /// Bot API token issued by the chat platform.
    #[validate(length(min = 1))]
    pub bot_token: String,
    /// SQLite file holding the emotion diary.
    pub db_path: PathBuf,
    pub sentiment_backend: SentimentBackend,
    /// Model identifier for the HTTP backend (e.g. a Hugging Face repo id).
    pub hf_model: Option<String>,
    pub hf_api_token: Option<String>,
    #[validate(url)]
    pub hf_api_url: String,
    /// Upper bound on a single model request.
    #[validate(range(min = 1, max = 120))]
    pub model_timeout_secs: u64,
    /// Number of entries shown by `/diary`.
    #[validate(range(min = 1, max = 50))]
    pub diary_limit: u32,
    /// When set, a failed diary write aborts the reply instead of being logged and skipped.
    pub strict_logging: bool,
    #[validate(url)]
    pub telegram_api_url: String,
    /// Long-poll duration passed to `getUpdates`.
    #[validate(range(min = 1, max = 50))]
    pub poll_timeout_secs: u64,
    pub log_format: LogFormat,
}

impl BotConfig {
    /// Loads the configuration from process environment variables.
    ///
    /// A `.env` file in the working directory is read first when present.
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bot_token = get("BOT_TOKEN")
            .ok_or_else(|| AppError::Config("BOT_TOKEN is not set".to_string()))?;
        let hf_model = get("HF_MODEL");

        let sentiment_backend = match get("SENTIMENT_BACKEND") {
            Some(raw) => raw.parse()?,
            None if hf_model.is_some() => SentimentBackend::Http,
            None => SentimentBackend::Keyword,
        };
        if sentiment_backend == SentimentBackend::Http && hf_model.is_none() {
            return Err(AppError::Config(
                "SENTIMENT_BACKEND=http requires HF_MODEL".to_string(),
            ));
        }

        let config = Self {
            bot_token,
            db_path: get("CAREBOT_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(PortablePathManager::default_db_path),
            sentiment_backend,
            hf_model,
            hf_api_token: get("HF_API_TOKEN"),
            hf_api_url: get("HF_API_URL").unwrap_or_else(|| DEFAULT_HF_API_URL.to_string()),
            model_timeout_secs: parse_or(get("MODEL_TIMEOUT_SECS"), "MODEL_TIMEOUT_SECS", 10)?,
            diary_limit: parse_or(get("DIARY_LIMIT"), "DIARY_LIMIT", 8)?,
            strict_logging: parse_or(get("STRICT_LOGGING"), "STRICT_LOGGING", false)?,
            telegram_api_url: get("TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            poll_timeout_secs: parse_or(get("POLL_TIMEOUT_SECS"), "POLL_TIMEOUT_SECS", 30)?,
            log_format: match get("LOG_FORMAT") {
                Some(raw) => raw.parse()?,
                None => LogFormat::Pretty,
            },
        };

        config.validate()?;
        Ok(config)
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid {} '{}': {}", key, value, e))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_only_token() {
        let config = BotConfig::from_lookup(lookup(&[("BOT_TOKEN", "123:abc")])).unwrap();

        assert_eq!(config.bot_token, "123:abc");
        assert_eq!(config.sentiment_backend, SentimentBackend::Keyword);
        assert_eq!(config.diary_limit, 8);
        assert_eq!(config.model_timeout_secs, 10);
        assert_eq!(config.poll_timeout_secs, 30);
        assert!(!config.strict_logging);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.telegram_api_url, DEFAULT_TELEGRAM_API_URL);
        assert_eq!(config.hf_api_url, DEFAULT_HF_API_URL);
    }

    #[test]
    fn test_missing_token_is_config_error() {
        let err = BotConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        let err = BotConfig::from_lookup(lookup(&[("BOT_TOKEN", "   ")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_hf_model_implies_http_backend() {
        let config = BotConfig::from_lookup(lookup(&[
            ("BOT_TOKEN", "t"),
            ("HF_MODEL", "cardiffnlp/twitter-xlm-roberta-base-sentiment"),
        ]))
        .unwrap();
        assert_eq!(config.sentiment_backend, SentimentBackend::Http);

        let config = BotConfig::from_lookup(lookup(&[
            ("BOT_TOKEN", "t"),
            ("HF_MODEL", "some/model"),
            ("SENTIMENT_BACKEND", "keyword"),
        ]))
        .unwrap();
        assert_eq!(config.sentiment_backend, SentimentBackend::Keyword);
    }

    #[test]
    fn test_http_backend_requires_model() {
        let err = BotConfig::from_lookup(lookup(&[
            ("BOT_TOKEN", "t"),
            ("SENTIMENT_BACKEND", "http"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        let err = BotConfig::from_lookup(lookup(&[("BOT_TOKEN", "t"), ("DIARY_LIMIT", "0")]))
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        let err = BotConfig::from_lookup(lookup(&[
            ("BOT_TOKEN", "t"),
            ("MODEL_TIMEOUT_SECS", "500"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        let err = BotConfig::from_lookup(lookup(&[("BOT_TOKEN", "t"), ("DIARY_LIMIT", "many")]))
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_invalid_urls_are_rejected() {
        let err = BotConfig::from_lookup(lookup(&[
            ("BOT_TOKEN", "t"),
            ("TELEGRAM_API_URL", "not a url"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_from_env_reads_process_environment() {
        temp_env::with_vars(
            [
                ("BOT_TOKEN", Some("env-token")),
                ("STRICT_LOGGING", Some("true")),
                ("LOG_FORMAT", Some("json")),
                ("DIARY_LIMIT", Some("3")),
                ("CAREBOT_DB_PATH", Some("/tmp/carebot-test.sqlite")),
                ("HF_MODEL", None),
                ("SENTIMENT_BACKEND", None),
            ],
            || {
                let config = BotConfig::from_env().unwrap();
                assert_eq!(config.bot_token, "env-token");
                assert!(config.strict_logging);
                assert_eq!(config.log_format, LogFormat::Json);
                assert_eq!(config.diary_limit, 3);
                assert_eq!(config.db_path, PathBuf::from("/tmp/carebot-test.sqlite"));
            },
        );
    }
}
