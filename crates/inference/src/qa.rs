//! Evidence-grounded question answering.
//!
//! Same orchestration shape as the classification engine, with two
//! differences: the unconfigured state is a user-facing configuration hint
//! rather than a fallback inference, and failure detail is never surfaced —
//! answers are prose shown directly to users.

use crate::context::ContextDocument;
use crate::evidence::EvidenceSnapshot;
use crate::llm::{
    parser,
    prompts::{self, PromptBuilder},
    GeminiProvider, LLMConfig, LLMError, LLMProvider, LLMRequest,
};
use crate::schemas::AskResult;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Answer returned when no model credential is configured.
pub const UNCONFIGURED_ANSWER: &str =
    "AI Q&A is not configured. Set GEMINI_API_KEY to enable this feature.";

/// Fixed follow-up suggestions for the unconfigured hint.
pub const DEFAULT_SUGGESTED_QUESTIONS: [&str; 3] = [
    "What CDN is used?",
    "Is the site secure?",
    "What framework powers this site?",
];

const FAILURE_ANSWER: &str = "Could not process your question. Please try again.";

const FAILURE_SUGGESTED_QUESTIONS: [&str; 2] =
    ["What CDN is used?", "What framework is this built on?"];

pub struct QAGroundingEngine {
    provider: Option<Arc<dyn LLMProvider>>,
    prompts: PromptBuilder,
    config: LLMConfig,
}

impl QAGroundingEngine {
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

    pub fn with_provider(provider: Arc<dyn LLMProvider>) -> Self {
        Self {
            provider: Some(provider),
            prompts: PromptBuilder::new(),
            config: LLMConfig::default(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Answer a free-text question from the evidence snapshot. Never returns
    /// an error: every outcome is a structurally complete [`AskResult`].
    pub async fn ask(&self, question: &str, snapshot: &EvidenceSnapshot) -> AskResult {
        let Some(provider) = self.provider.as_ref() else {
            debug!("no model credential configured; serving Q&A configuration hint");
            return unconfigured_result();
        };

        let document = ContextDocument::build(snapshot);

        match self.call_model(provider.as_ref(), question, &document).await {
            Ok(mut result) => {
                info!(model = provider.model_name(), "grounded answer produced");
                // A citation the context document never contained is evidence
                // the model was never given; drop it.
                result.citations.retain(|citation| document.contains(citation));
                result
            }
            Err(error) => {
                warn!(%error, "Q&A model path failed; serving canned answer");
                failure_result()
            }
        }
    }

    async fn call_model(
        &self,
        provider: &dyn LLMProvider,
        question: &str,
        document: &ContextDocument,
    ) -> Result<AskResult, LLMError> {
        let mut variables = HashMap::new();
        variables.insert("context_document".to_string(), document.render());
        variables.insert("question".to_string(), question.to_string());
        variables.insert(
            "json_schema".to_string(),
            AskResult::schema_definition().to_string(),
        );

        let (system_prompt, user_prompt) = self
            .prompts
            .build_prompt(prompts::EVIDENCE_QA, variables)
            .map_err(|e| LLMError::ApiError(e.to_string()))?;

        let request = LLMRequest {
            system_prompt,
            user_prompt,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response = tokio::time::timeout(self.config.timeout(), provider.generate(request))
            .await
            .map_err(|_| LLMError::Timeout(self.config.timeout_seconds))??;

        parser::parse(&response.content)
    }
}

fn unconfigured_result() -> AskResult {
    AskResult {
        answer: UNCONFIGURED_ANSWER.to_string(),
        confidence: 0,
        citations: Vec::new(),
        suggested_questions: DEFAULT_SUGGESTED_QUESTIONS
            .iter()
            .map(|q| q.to_string())
            .collect(),
    }
}

fn failure_result() -> AskResult {
    AskResult {
        answer: FAILURE_ANSWER.to_string(),
        confidence: 0,
        citations: Vec::new(),
        suggested_questions: FAILURE_SUGGESTED_QUESTIONS
            .iter()
            .map(|q| q.to_string())
            .collect(),
    }
}
