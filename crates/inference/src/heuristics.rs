//! Rule-based fallback inference, used whenever the model path is
//! unavailable or fails.

use crate::evidence::EvidenceSnapshot;
use crate::schemas::{
    Architecture, BackendStack, ConfidenceScores, FrontendStack, InferenceResult,
    InfrastructureStack,
};

/// Exact sentinel recommendation for unconfigured mode. Contract-stable:
/// callers match on this string to detect mock inference.
pub const UNCONFIGURED_RECOMMENDATION: &str =
    "Gemini AI key not configured — showing mock inference.";

// Fixed priors per axis: HTTP headers are strong frontend signal, backends
// usually hide behind a proxy or CDN. These constants are the reproducible
// baseline for the no-evidence/no-model scenario.
const OVERALL_PRIOR: u8 = 75;
const FRONTEND_PRIOR: u8 = 90;
const BACKEND_PRIOR: u8 = 40;
const INFRASTRUCTURE_PRIOR: u8 = 85;

/// Best-effort classification from directly-available fields only. Pure and
/// deterministic; reads the HTTP technology hints and the DNS provider, and
/// fills everything else with fixed placeholders.
pub fn heuristic_inference(snapshot: &EvidenceSnapshot) -> InferenceResult {
    let technologies = snapshot.http().map(|http| &http.technologies);

    let framework = technologies
        .and_then(|tech| tech.framework.clone())
        .unwrap_or_else(|| "Unknown / Custom SPA".to_string());
    let hosting = technologies
        .and_then(|tech| tech.hosting.clone())
        .unwrap_or_else(|| "Unknown Hosting".to_string());
    let cdn = snapshot
        .dns()
        .and_then(|dns| dns.provider.clone())
        .unwrap_or_else(|| "Unknown CDN".to_string());

    InferenceResult {
        architecture: Architecture {
            kind: "Modern Web Application".to_string(),
            frontend: FrontendStack {
                framework,
                rendering: "CSR/SSR Hybrid (implied)".to_string(),
            },
            backend: BackendStack {
                runtime: "Unknown (behind proxy)".to_string(),
                framework: None,
                database: "Unknown".to_string(),
            },
            infrastructure: InfrastructureStack {
                hosting,
                cdn,
                security: "WAF enabled (implied)".to_string(),
            },
        },
        confidence: ConfidenceScores {
            overall: OVERALL_PRIOR,
            frontend: FRONTEND_PRIOR,
            backend: BACKEND_PRIOR,
            infrastructure: INFRASTRUCTURE_PRIOR,
        },
        recommendations: vec![UNCONFIGURED_RECOMMENDATION.to_string()],
    }
}
