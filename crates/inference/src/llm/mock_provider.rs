//! Test double for the model gateway.

use crate::llm::provider::{LLMError, LLMProvider, LLMRequest, LLMResponse};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Canned-response provider. Responses are keyed by prompt substring; the
/// first matching pattern wins. Counts every call so tests can assert that
/// unconfigured engines never reach the gateway.
pub struct MockLLMProvider {
    responses: Vec<(String, String)>,
    call_count: AtomicUsize,
    should_fail: bool,
    fence_output: bool,
    delay_ms: u64,
}

impl Default for MockLLMProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLLMProvider {
    pub fn new() -> Self {
        Self {
            responses: Vec::new(),
            call_count: AtomicUsize::new(0),
            should_fail: false,
            fence_output: false,
            delay_ms: 10,
        }
    }

    /// Provider whose every call fails with an API error.
    pub fn failing() -> Self {
        let mut provider = Self::new();
        provider.should_fail = true;
        provider
    }

    pub fn with_response(mut self, pattern: &str, content: impl Into<String>) -> Self {
        self.responses.push((pattern.to_string(), content.into()));
        self
    }

    /// Wrap responses in a ```json fence, as chatty models do.
    pub fn fenced(mut self) -> Self {
        self.fence_output = true;
        self
    }

    /// Simulated latency; combine with a paused tokio clock to exercise the
    /// engine timeout deterministically.
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    fn generate_content(&self, request: &LLMRequest) -> String {
        let combined = format!("{} {}", request.system_prompt, request.user_prompt);

        for (pattern, content) in &self.responses {
            if combined.contains(pattern.as_str()) {
                return content.clone();
            }
        }

        if combined.contains("QUESTION:") {
            Self::default_ask_content()
        } else {
            Self::default_inference_content()
        }
    }

    fn default_inference_content() -> String {
        r#"{
  "architecture": {
    "type": "Modern Web Application",
    "frontend": {"framework": "React", "rendering": "CSR"},
    "backend": {"runtime": "Node.js", "framework": null, "database": "Unknown"},
    "infrastructure": {"hosting": "Vercel", "cdn": "Cloudflare", "security": "HSTS enabled"}
  },
  "confidence": {"overall": 80, "frontend": 92, "backend": 45, "infrastructure": 87},
  "recommendations": ["Pin the TLS configuration to 1.3"]
}"#
        .to_string()
    }

    fn default_ask_content() -> String {
        r#"{
  "answer": "The site is served through Cloudflare.",
  "confidence": 85,
  "citations": ["[DNS] Provider/CDN: Cloudflare"],
  "suggested_questions": ["What framework powers this site?"]
}"#
        .to_string()
    }
}

#[async_trait]
impl LLMProvider for MockLLMProvider {
    async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if self.delay_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.delay_ms)).await;
        }

        if self.should_fail {
            return Err(LLMError::ApiError(
                "mock provider configured to fail".to_string(),
            ));
        }

        let content = self.generate_content(&request);
        let content = if self.fence_output {
            format!("```json\n{content}\n```")
        } else {
            content
        };

        Ok(LLMResponse {
            content,
            model: "mock-model".to_string(),
        })
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
