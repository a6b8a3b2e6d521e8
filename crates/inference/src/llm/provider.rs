//! Model gateway: the single outbound call of the pipeline.
//!
//! `LLMProvider` abstracts the hosted model so engines and tests can swap in
//! a mock without process-wide state. `GeminiProvider` talks to the Gemini
//! `generateContent` REST endpoint: one text prompt in, one text candidate
//! out, no streaming, no multi-turn state. Each invocation makes exactly one
//! attempt; callers degrade to the heuristic fallback on failure.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Error)]
pub enum LLMError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone)]
pub struct LLMRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone)]
pub struct LLMResponse {
    pub content: String,
    pub model: String,
}

#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError>;

    fn model_name(&self) -> &str;
}

pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiProvider {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LLMError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LLMError::NetworkError(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: GEMINI_BASE_URL.to_string(),
            timeout,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

// Gemini wire format, reduced to the fields this gateway uses.

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
    model_version: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct Candidate {
    content: Content,
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError> {
        // The Gemini contract is a single text prompt; fold the instruction
        // block and the task block into one part.
        let prompt = format!("{}\n\n{}", request.system_prompt, request.user_prompt);

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            },
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        debug!(model = %self.model, "dispatching generateContent request");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LLMError::Timeout(self.timeout.as_secs())
                } else {
                    LLMError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(LLMError::ApiError(format!("{status}: {detail}")));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LLMError::InvalidResponse(e.to_string()))?;

        let content = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| LLMError::InvalidResponse("no candidate text in response".to_string()))?;

        debug!(chars = content.len(), "received model response");

        Ok(LLMResponse {
            content,
            model: parsed.model_version.unwrap_or_else(|| self.model.clone()),
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
