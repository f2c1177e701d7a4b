use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use papercast_capability::{CapabilityError, ScriptModel};

use crate::config::ScriptModelConfig;

const SUMMARY_PROMPT: &str = "Summarize the key points of the following text \
into a concise summary of about 300 words.";

const MONOLOGUE_PROMPT: &str = "You are a podcast host. Transform the \
following summary into a short, engaging monologue. Write in a natural, \
spoken style. Output only the monologue text.";

/// [`ScriptModel`] backed by an OpenAI-compatible chat completions API.
#[derive(Debug)]
pub struct HttpScriptModel {
    client: reqwest::Client,
    config: ScriptModelConfig,
}

impl HttpScriptModel {
    /// Create a new model client with the given configuration.
    pub fn new(config: ScriptModelConfig) -> Result<Self, CapabilityError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| CapabilityError::Configuration(e.to_string()))?;

        Ok(Self { client, config })
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String, CapabilityError> {
        let request_body = json!({
            "model": self.config.model,
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user }
            ]
        });

        debug!(endpoint = %self.config.endpoint, model = %self.config.model, "sending completion request");

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CapabilityError::Timeout(Duration::from_secs(self.config.timeout_seconds))
                } else {
                    CapabilityError::Connection(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "completion API returned error");
            return Err(CapabilityError::ExecutionFailed(format!(
                "HTTP {status}: {body}"
            )));
        }

        let response_json: serde_json::Value = response.json().await.map_err(|e| {
            CapabilityError::Serialization(format!("failed to parse API response: {e}"))
        })?;

        extract_content(&response_json)
    }
}

/// Pull the generated text out of a chat completions response body.
fn extract_content(response: &serde_json::Value) -> Result<String, CapabilityError> {
    response
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .map(str::to_owned)
        .ok_or_else(|| {
            CapabilityError::Serialization("response has no choices[0].message.content".into())
        })
}

#[async_trait]
impl ScriptModel for HttpScriptModel {
    async fn summarize(&self, text: &str) -> Result<String, CapabilityError> {
        self.complete(SUMMARY_PROMPT, text).await
    }

    async fn monologue(&self, summary: &str) -> Result<String, CapabilityError> {
        self.complete(MONOLOGUE_PROMPT, summary).await
    }
}
