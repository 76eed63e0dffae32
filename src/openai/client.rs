use async_trait::async_trait;
use tracing::debug;

use crate::config::OpenAiConfig;
use crate::provider::{ChatProvider, FetchError, FetchResult};
use super::types::{ChatMessage, ChatRequest, ChatResponse};

/// reqwest-backed client for an OpenAI compatible `/chat/completions` endpoint.
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: &OpenAiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl ChatProvider for OpenAiClient {
    async fn complete(&self, prompt: &str, temperature: f32) -> FetchResult<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
            temperature,
        };

        let url = format!("{}/chat/completions", self.base_url);
        debug!(model = %self.model, "chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let parsed: ChatResponse =
            serde_json::from_slice(&body).map_err(|e| FetchError::Malformed(e.to_string()))?;

        parsed
            .first_content()
            .ok_or_else(|| FetchError::Malformed("response has no choices".to_string()))
    }
}
