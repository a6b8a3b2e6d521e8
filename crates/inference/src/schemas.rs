//! Result schemas shared by the model path and the heuristic fallback.
//!
//! Both engines promise a schema-complete structure in every outcome, so the
//! types here deserialize defensively: confidence values are clamped into
//! [0,100] at parse time and list fields default to empty rather than failing.

use serde::{Deserialize, Deserializer, Serialize};

fn clamp_confidence<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(raw.clamp(0, 100) as u8)
}

/// Structured technology-stack classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceResult {
    pub architecture: Architecture,
    pub confidence: ConfidenceScores,

    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Architecture {
    #[serde(rename = "type")]
    pub kind: String,
    pub frontend: FrontendStack,
    pub backend: BackendStack,
    pub infrastructure: InfrastructureStack,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontendStack {
    pub framework: String,
    pub rendering: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendStack {
    pub runtime: String,

    // Serialized as an explicit null when absent; the schema says "string or null".
    #[serde(default)]
    pub framework: Option<String>,

    pub database: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfrastructureStack {
    pub hosting: String,
    pub cdn: String,
    pub security: String,
}

/// Per-axis confidence, always an integer in [0,100] in every outcome.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConfidenceScores {
    #[serde(deserialize_with = "clamp_confidence")]
    pub overall: u8,

    #[serde(deserialize_with = "clamp_confidence")]
    pub frontend: u8,

    #[serde(deserialize_with = "clamp_confidence")]
    pub backend: u8,

    #[serde(deserialize_with = "clamp_confidence")]
    pub infrastructure: u8,
}

impl InferenceResult {
    /// JSON schema embedded verbatim into the classification prompt.
    pub fn schema_definition() -> &'static str {
        r#"{
  "architecture": {
    "type": "string (e.g. Modern Web App, Microservices, Legacy Monolith)",
    "frontend": {
      "framework": "string (framework name or Unknown)",
      "rendering": "string (SSR, CSR, SSG, or Hybrid)"
    },
    "backend": {
      "runtime": "string (e.g. Node.js, Go, or Unknown)",
      "framework": "string or null",
      "database": "string or Unknown"
    },
    "infrastructure": {
      "hosting": "string (e.g. AWS, Vercel, or Unknown)",
      "cdn": "string (CDN name or None)",
      "security": "string (summary of security posture)"
    }
  },
  "confidence": {
    "overall": "int (0-100)",
    "frontend": "int (0-100)",
    "backend": "int (0-100)",
    "infrastructure": "int (0-100)"
  },
  "recommendations": ["short insight 1", "short insight 2"]
}"#
    }
}

/// Free-text answer grounded in the evidence digest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResult {
    pub answer: String,

    #[serde(deserialize_with = "clamp_confidence")]
    pub confidence: u8,

    #[serde(default)]
    pub citations: Vec<String>,

    #[serde(default)]
    pub suggested_questions: Vec<String>,
}

impl AskResult {
    /// JSON schema embedded verbatim into the Q&A prompt.
    pub fn schema_definition() -> &'static str {
        r#"{
  "answer": "concise answer string (max 3 sentences)",
  "confidence": "int (0-100 based on evidence strength)",
  "citations": ["specific evidence item 1", "specific evidence item 2"],
  "suggested_questions": ["follow-up question 1", "follow-up question 2"]
}"#
    }
}

/// Success/data/error envelope exposed to transport layers for the
/// classification call. Q&A deliberately has no envelope: its failures are
/// low-confidence canned answers, never transport errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisEnvelope<T> {
    pub success: bool,

    #[serde(default)]
    pub data: Option<T>,

    #[serde(default)]
    pub error: Option<String>,
}

impl<T> AnalysisEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}
