//! Hosted text-classification model reached over HTTP (Hugging Face inference API shape).

use super::model::{ModelError, ModelPrediction, SentimentModel};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// The inference API answers either `[[{label, score}, ...]]` or `[{label, score}, ...]`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Nested(Vec<Vec<ModelPrediction>>),
    Flat(Vec<ModelPrediction>),
}

impl InferenceResponse {
    /// Highest-scoring class across the whole payload.
    fn top(self) -> Option<ModelPrediction> {
        let predictions = match self {
            InferenceResponse::Nested(batches) => batches.into_iter().flatten().collect(),
            InferenceResponse::Flat(predictions) => predictions,
        };
        predictions.into_iter().max_by(|a, b| {
            a.score
                .partial_cmp(&b.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }
}

pub struct HttpSentimentModel {
    client: Client,
    endpoint: String,
    model_id: String,
    api_token: Option<String>,
}

impl HttpSentimentModel {
    /// Creates a client for `{base_url}/{model_id}` with a per-request timeout.
    pub fn new(
        base_url: &str,
        model_id: &str,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ModelError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/{}", base_url.trim_end_matches('/'), model_id),
            model_id: model_id.to_string(),
            api_token,
        })
    }
}

#[async_trait]
impl SentimentModel for HttpSentimentModel {
    fn name(&self) -> &str {
        &self.model_id
    }

    async fn infer(&self, text: &str) -> Result<ModelPrediction, ModelError> {
        let mut request = self.client.post(&self.endpoint).json(&json!({ "inputs": text }));
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: InferenceResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Malformed(e.to_string()))?;
        parsed
            .top()
            .ok_or_else(|| ModelError::Malformed("empty prediction list".to_string()))
    }
}
