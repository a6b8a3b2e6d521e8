//! Strict parsing of model output.
//!
//! Models are instructed to reply with bare JSON but routinely wrap it in a
//! markdown fence anyway. The parser strips one leading/trailing fence
//! (optional language tag) and then parses the remainder strictly; anything
//! else is a format failure handled identically to a gateway failure.

use crate::llm::provider::LLMError;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Remove one surrounding triple-backtick fence, if present.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();

    let Some(mut body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // The fence line may carry a language tag ("json", "JSON", ...).
    if let Some((tag, rest)) = body.split_once('\n') {
        if tag.trim().chars().all(|c| c.is_ascii_alphanumeric()) {
            body = rest;
        }
    }

    if let Some(stripped) = body.trim_end().strip_suffix("```") {
        body = stripped;
    }

    body.trim()
}

/// Parse model output into `T`, tolerating an incidental code fence.
pub fn parse<T: DeserializeOwned>(raw: &str) -> Result<T, LLMError> {
    let body = strip_code_fence(raw);
    serde_json::from_str(body).map_err(|e| {
        debug!(error = %e, "model output failed strict JSON parse");
        LLMError::InvalidResponse(e.to_string())
    })
}
