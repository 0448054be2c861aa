use crate::config::Config;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value as JsonValue};
use std::time::Duration;

/// Anything that can turn a prompt plus a response schema into a parsed JSON payload.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExamGenerator: Send + Sync {
    /// Single attempt; provider failures surface as `GenerationFailed`,
    /// blank or non-JSON output as `EmptyGeneration`.
    async fn generate(&self, prompt: &str, schema: &JsonValue) -> Result<JsonValue>;
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, base_url: String, client: Client) -> Self {
        Self {
            client,
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.ai_timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::new(
            config.google_api_key.clone(),
            config.gemini_model.clone(),
            config.gemini_base_url.clone(),
            client,
        ))
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn build_request_body(prompt: &str, schema: &JsonValue) -> JsonValue {
        json!({
            "contents": [
                { "role": "user", "parts": [{ "text": prompt }] }
            ],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema,
            },
        })
    }

    /// Pulls the first candidate's text out of a `generateContent` response and parses it.
    fn parse_candidate(body: &JsonValue) -> Result<JsonValue> {
        let text: String = body
            .get("candidates")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("content"))
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.as_array())
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            if let Some(reason) = body.pointer("/candidates/0/finishReason") {
                tracing::warn!(finish_reason = %reason, "Gemini returned no candidate text");
            }
            return Err(Error::EmptyGeneration);
        }

        let parsed: JsonValue = serde_json::from_str(text.trim()).map_err(|e| {
            tracing::error!(error = %e, "Gemini candidate text is not valid JSON");
            Error::EmptyGeneration
        })?;

        if parsed.is_null() {
            return Err(Error::EmptyGeneration);
        }
        Ok(parsed)
    }
}

#[async_trait]
impl ExamGenerator for GeminiClient {
    async fn generate(&self, prompt: &str, schema: &JsonValue) -> Result<JsonValue> {
        let payload = Self::build_request_body(prompt, schema);

        tracing::info!(model = %self.model, prompt_chars = prompt.len(), "Sending generation request to Gemini");

        let res = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, "Gemini request failed");
                let reason = if e.is_timeout() {
                    "the AI service timed out"
                } else {
                    "the AI service could not be reached"
                };
                Error::GenerationFailed(reason.to_string())
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %text, "Gemini API error");
            return Err(Error::GenerationFailed(format!(
                "the AI service rejected the request (status {})",
                status.as_u16()
            )));
        }

        let body: JsonValue = res.json().await.map_err(|e| {
            tracing::error!(error = ?e, "Gemini response body is not JSON");
            Error::EmptyGeneration
        })?;

        let parsed = Self::parse_candidate(&body)?;
        tracing::info!("Gemini response received");
        Ok(parsed)
    }
}
