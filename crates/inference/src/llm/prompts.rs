//! Prompt templates for the two model tasks.
//!
//! Both templates share the evidence-grounding preamble: the model may only
//! state what the context document between the `=== SCAN EVIDENCE ===`
//! markers supports, and must reply with bare JSON in the supplied schema.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const STACK_CLASSIFICATION: &str = "stack_classification";
pub const EVIDENCE_QA: &str = "evidence_qa";

const GROUNDING_PREAMBLE: &str = "Base every statement ONLY on the scan evidence between the \
=== SCAN EVIDENCE === markers. Do NOT guess beyond what the evidence supports.";

const OUTPUT_CONTRACT: &str =
    "Respond with a single JSON object in this exact format (no markdown, no extra text):";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptTemplate {
    pub name: String,
    pub system_prompt: String,
    pub user_prompt_template: String,
}

impl PromptTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system_prompt: String::new(),
            user_prompt_template: String::new(),
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_user_template(mut self, template: impl Into<String>) -> Self {
        self.user_prompt_template = template.into();
        self
    }
}

pub struct PromptBuilder {
    templates: HashMap<String, PromptTemplate>,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptBuilder {
    pub fn new() -> Self {
        let mut builder = Self {
            templates: HashMap::new(),
        };

        builder.add_template(Self::classification_template());
        builder.add_template(Self::qa_template());
        builder
    }

    pub fn add_template(&mut self, template: PromptTemplate) {
        self.templates.insert(template.name.clone(), template);
    }

    pub fn build_prompt(
        &self,
        template_name: &str,
        variables: HashMap<String, String>,
    ) -> Result<(String, String)> {
        let template = self
            .templates
            .get(template_name)
            .ok_or_else(|| anyhow::anyhow!("Template '{}' not found", template_name))?;

        let system_prompt = substitute_variables(&template.system_prompt, &variables);
        let user_prompt = substitute_variables(&template.user_prompt_template, &variables);

        Ok((system_prompt, user_prompt))
    }

    fn classification_template() -> PromptTemplate {
        PromptTemplate::new(STACK_CLASSIFICATION)
            .with_system_prompt(format!(
                "You are an expert infrastructure analyst. Determine the website's technology \
                 stack and architecture from the scan evidence. {GROUNDING_PREAMBLE}"
            ))
            .with_user_template(format!(
                "=== SCAN EVIDENCE ===\n{{context_document}}\n=====================\n\n\
                 {OUTPUT_CONTRACT}\n{{json_schema}}"
            ))
    }

    fn qa_template() -> PromptTemplate {
        PromptTemplate::new(EVIDENCE_QA)
            .with_system_prompt(format!(
                "You are an expert infrastructure analyst assistant. Answer the user's question \
                 about the scanned website. {GROUNDING_PREAMBLE} Be concise: at most 3 \
                 sentences. If the evidence does not support an answer, say so clearly."
            ))
            .with_user_template(format!(
                "=== SCAN EVIDENCE ===\n{{context_document}}\n=====================\n\n\
                 QUESTION: {{question}}\n\n{OUTPUT_CONTRACT}\n{{json_schema}}"
            ))
    }
}

fn substitute_variables(template: &str, variables: &HashMap<String, String>) -> String {
    let mut result = template.to_string();

    for (key, value) in variables {
        let placeholder = format!("{{{}}}", key);
        result = result.replace(&placeholder, value);
    }

    result
}
