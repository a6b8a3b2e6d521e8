//! Model-path infrastructure: gateway, prompts, parsing, configuration.
//!
//! The provider abstraction keeps the hosted model swappable (and mockable in
//! tests) without ambient global state; the prompt builder and the parser
//! enforce the grounded, strict-JSON wire contract at both ends of the call.

pub mod config;
pub mod mock_provider;
pub mod parser;
pub mod prompts;
pub mod provider;

pub use config::LLMConfig;
pub use mock_provider::MockLLMProvider;
pub use prompts::{PromptBuilder, PromptTemplate};
pub use provider::{GeminiProvider, LLMError, LLMProvider, LLMRequest, LLMResponse};
