//! Environment-driven model configuration.
//!
//! Presence of `GEMINI_API_KEY` is the only switch between configured and
//! unconfigured mode; the model name and call timeout are tunable, nothing
//! else affects engine behavior.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const MODEL_ENV: &str = "GEMINI_MODEL";
pub const TIMEOUT_ENV: &str = "LLM_TIMEOUT_SECONDS";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_model() -> String {
    "gemini-1.5-flash-latest".to_string()
}
fn default_temperature() -> f32 {
    0.2
}
fn default_max_tokens() -> u32 {
    2048
}
fn default_timeout_seconds() -> u64 {
    30
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl LLMConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                config.api_key = Some(key);
            }
        }

        if let Ok(model) = std::env::var(MODEL_ENV) {
            if !model.is_empty() {
                config.model = model;
            }
        }

        if let Ok(timeout) = std::env::var(TIMEOUT_ENV) {
            if let Ok(seconds) = timeout.parse::<u64>() {
                config.timeout_seconds = seconds;
            }
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
