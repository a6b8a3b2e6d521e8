//! Stacksight Inference - Evidence-Grounded Stack Classification
//!
//! Turns heterogeneous website-reconnaissance evidence (DNS, TLS, HTTP,
//! crawl results) into a structured technology-stack inference and free-form
//! evidence-grounded answers. A hosted generative model does the reasoning
//! when a credential is configured; a deterministic heuristic covers every
//! other case. Neither engine ever raises past its boundary: missing
//! credentials, network failures, and malformed model output all resolve to
//! schema-complete results.

pub mod context;
pub mod engine;
pub mod evidence;
pub mod heuristics;
pub mod llm;
pub mod qa;
pub mod schemas;

pub use context::{ContextDocument, NO_EVIDENCE};
pub use engine::InferenceEngine;
pub use evidence::EvidenceSnapshot;
pub use heuristics::heuristic_inference;
pub use llm::{GeminiProvider, LLMConfig, LLMError, LLMProvider, MockLLMProvider};
pub use qa::QAGroundingEngine;
pub use schemas::{AnalysisEnvelope, AskResult, InferenceResult};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
