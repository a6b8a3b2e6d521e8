//! Technology-stack classification engine.
//!
//! Orchestrates context document → prompt → single gateway call → strict
//! parse, degrading to the heuristic fallback on any failure. The contract at
//! this boundary is absolute: `classify` never returns an error and always
//! yields a schema-complete [`InferenceResult`].

use crate::context::ContextDocument;
use crate::evidence::EvidenceSnapshot;
use crate::heuristics::heuristic_inference;
use crate::llm::{
    parser,
    prompts::{self, PromptBuilder},
    GeminiProvider, LLMConfig, LLMError, LLMProvider, LLMRequest,
};
use crate::schemas::InferenceResult;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Fixed prefix of the single degraded-mode recommendation.
pub const FAILURE_PREFIX: &str = "AI inference failed: ";

const FAILURE_SUFFIX: &str = ". Showing heuristic analysis.";

/// Underlying error text is truncated before reaching callers, so oversized
/// or sensitive gateway errors never leak into user-facing output.
pub const MAX_FAILURE_DETAIL_CHARS: usize = 100;

pub struct InferenceEngine {
    provider: Option<Arc<dyn LLMProvider>>,
    prompts: PromptBuilder,
    config: LLMConfig,
}

impl InferenceEngine {
    /// Build from environment configuration; absence of the API key selects
    /// unconfigured mode, which is the documented default, not an error.
    pub fn from_env() -> Self {
        Self::with_config(LLMConfig::from_env())
    }

    pub fn with_config(config: LLMConfig) -> Self {
        let provider = config.api_key.as_ref().and_then(|key| {
            match GeminiProvider::new(key.clone(), config.model.clone(), config.timeout()) {
                Ok(provider) => Some(Arc::new(provider) as Arc<dyn LLMProvider>),
                Err(error) => {
                    warn!(%error, "failed to construct model gateway; running unconfigured");
                    None
                }
            }
        });

        Self {
            provider,
            prompts: PromptBuilder::new(),
            config,
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            provider: None,
            prompts: PromptBuilder::new(),
            config: LLMConfig::default(),
        }
    }

    /// Inject a gateway directly; this is how tests substitute a mock without
    /// touching process-wide state.
    pub fn with_provider(provider: Arc<dyn LLMProvider>) -> Self {
        Self {
            provider: Some(provider),
            prompts: PromptBuilder::new(),
            config: LLMConfig::default(),
        }
    }

    pub fn with_provider_and_config(provider: Arc<dyn LLMProvider>, config: LLMConfig) -> Self {
        Self {
            provider: Some(provider),
            prompts: PromptBuilder::new(),
            config,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Classify the technology stack behind an evidence snapshot.
    pub async fn classify(&self, snapshot: &EvidenceSnapshot) -> InferenceResult {
        let Some(provider) = self.provider.as_ref() else {
            debug!("no model credential configured; serving heuristic inference");
            return heuristic_inference(snapshot);
        };

        let document = ContextDocument::build(snapshot);

        match self.call_model(provider.as_ref(), &document).await {
            Ok(result) => {
                info!(model = provider.model_name(), "model classification succeeded");
                result
            }
            Err(error) => {
                warn!(%error, "model path failed; serving degraded heuristic result");
                degraded_inference(snapshot, &error)
            }
        }
    }

    async fn call_model(
        &self,
        provider: &dyn LLMProvider,
        document: &ContextDocument,
    ) -> Result<InferenceResult, LLMError> {
        let mut variables = HashMap::new();
        variables.insert("context_document".to_string(), document.render());
        variables.insert(
            "json_schema".to_string(),
            InferenceResult::schema_definition().to_string(),
        );

        let (system_prompt, user_prompt) = self
            .prompts
            .build_prompt(prompts::STACK_CLASSIFICATION, variables)
            .map_err(|e| LLMError::ApiError(e.to_string()))?;

        let request = LLMRequest {
            system_prompt,
            user_prompt,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        // The gateway call is the pipeline's only suspension point; bound it
        // here even when the provider carries no timeout of its own.
        let response = tokio::time::timeout(self.config.timeout(), provider.generate(request))
            .await
            .map_err(|_| LLMError::Timeout(self.config.timeout_seconds))??;

        parser::parse(&response.content)
    }
}

/// Heuristic result annotated with a single bounded failure reason.
fn degraded_inference(snapshot: &EvidenceSnapshot, error: &LLMError) -> InferenceResult {
    let mut result = heuristic_inference(snapshot);
    let detail: String = error
        .to_string()
        .chars()
        .take(MAX_FAILURE_DETAIL_CHARS)
        .collect();
    result.recommendations = vec![format!("{FAILURE_PREFIX}{detail}{FAILURE_SUFFIX}")];
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::UNCONFIGURED_RECOMMENDATION;
    use crate::llm::MockLLMProvider;

    fn example_snapshot() -> EvidenceSnapshot {
        serde_json::from_str(
            r#"{
                "dns": {"data": {"provider": "Cloudflare", "records": {"A": ["1.2.3.4"]}}},
                "http": {"data": {"status_code": 200, "headers": {"server": "nginx"},
                    "technologies": {"framework": "React"}}}
            }"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_unconfigured_engine_serves_heuristic_result() {
        let engine = InferenceEngine::unconfigured();
        let result = engine.classify(&example_snapshot()).await;

        assert_eq!(result.architecture.frontend.framework, "React");
        assert_eq!(result.confidence.overall, 75);
        assert_eq!(result.confidence.frontend, 90);
        assert_eq!(
            result.recommendations,
            vec![UNCONFIGURED_RECOMMENDATION.to_string()]
        );
    }

    #[tokio::test]
    async fn test_successful_model_call_returns_parsed_result() {
        let engine = InferenceEngine::with_provider(Arc::new(MockLLMProvider::new().fenced()));
        let result = engine.classify(&example_snapshot()).await;

        // Mock content, not the heuristic placeholders.
        assert_eq!(result.confidence.overall, 80);
        assert_eq!(result.architecture.infrastructure.hosting, "Vercel");
        assert_ne!(
            result.recommendations,
            vec![UNCONFIGURED_RECOMMENDATION.to_string()]
        );
    }

    #[tokio::test]
    async fn test_gateway_failure_degrades_with_bounded_reason() {
        let engine = InferenceEngine::with_provider(Arc::new(MockLLMProvider::failing()));
        let result = engine.classify(&example_snapshot()).await;

        assert_eq!(result.recommendations.len(), 1);
        let reason = &result.recommendations[0];
        assert!(reason.starts_with(FAILURE_PREFIX));
        assert!(reason.ends_with(FAILURE_SUFFIX));
        assert!(
            reason.chars().count()
                <= FAILURE_PREFIX.chars().count()
                    + MAX_FAILURE_DETAIL_CHARS
                    + FAILURE_SUFFIX.chars().count()
        );

        // Degraded results still carry the full schema and fixed priors.
        assert_eq!(result.confidence.backend, 40);
        assert_eq!(result.architecture.frontend.framework, "React");
    }

    #[tokio::test]
    async fn test_unparseable_model_output_degrades() {
        let provider = MockLLMProvider::new().with_response("SCAN EVIDENCE", "not json");
        let engine = InferenceEngine::with_provider(Arc::new(provider));
        let result = engine.classify(&example_snapshot()).await;

        assert!(result.recommendations[0].starts_with(FAILURE_PREFIX));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_gateway_hits_engine_timeout() {
        let provider = MockLLMProvider::new().with_delay_ms(120_000);
        let engine = InferenceEngine::with_provider_and_config(
            Arc::new(provider),
            LLMConfig {
                timeout_seconds: 30,
                ..LLMConfig::default()
            },
        );

        let result = engine.classify(&example_snapshot()).await;
        assert!(result.recommendations[0].contains("Timeout after 30 seconds"));
    }

    #[tokio::test]
    async fn test_oversized_error_text_is_truncated() {
        let long_detail = "x".repeat(500);
        let provider = MockLLMProvider::new().with_response("SCAN EVIDENCE", long_detail);
        let engine = InferenceEngine::with_provider(Arc::new(provider));
        let result = engine.classify(&example_snapshot()).await;

        let reason = &result.recommendations[0];
        assert!(
            reason.chars().count()
                <= FAILURE_PREFIX.chars().count()
                    + MAX_FAILURE_DETAIL_CHARS
                    + FAILURE_SUFFIX.chars().count()
        );
    }
}
