//! End-to-end contract tests for the classification and Q&A pipelines,
//! driven through the public API with the mock gateway.

use std::sync::Arc;

use stacksight_inference::{
    engine::FAILURE_PREFIX,
    heuristics::UNCONFIGURED_RECOMMENDATION,
    llm::parser,
    qa::DEFAULT_SUGGESTED_QUESTIONS,
    AskResult, ContextDocument, EvidenceSnapshot, InferenceEngine, MockLLMProvider,
    QAGroundingEngine, NO_EVIDENCE,
};

const EXAMPLE_EVIDENCE: &str = r#"{
    "dns": {"data": {"provider": "Cloudflare", "records": {"A": ["1.2.3.4"]}}},
    "http": {"data": {"status_code": 200, "headers": {"server": "nginx"},
        "technologies": {"framework": "React"}}}
}"#;

fn example_snapshot() -> EvidenceSnapshot {
    serde_json::from_str(EXAMPLE_EVIDENCE).unwrap()
}

#[test]
fn test_empty_snapshot_renders_no_evidence_sentinel() {
    let document = ContextDocument::build(&EvidenceSnapshot::default());
    assert_eq!(document.render(), NO_EVIDENCE);
}

#[test]
fn test_context_document_example_lines() {
    let document = ContextDocument::build(&example_snapshot());
    let rendered = document.render();

    for expected in [
        "[DNS] Provider/CDN: Cloudflare",
        "[DNS] IP Address(es): 1.2.3.4",
        "[HTTP] Status Code: 200",
        "[HTTP] Server Header: nginx",
        "[HTTP] Detected Framework: React",
    ] {
        assert!(rendered.contains(expected), "missing line: {expected}");
    }
}

#[test]
fn test_context_document_is_byte_identical_across_calls() {
    let snapshot = example_snapshot();
    let first = ContextDocument::build(&snapshot).render();
    let second = ContextDocument::build(&snapshot).render();
    assert_eq!(first.as_bytes(), second.as_bytes());
}

#[tokio::test]
async fn test_unconfigured_classification_baseline() {
    let engine = InferenceEngine::unconfigured();

    // Empty snapshot: the fully-placeholder baseline with exact sentinels.
    let result = engine.classify(&EvidenceSnapshot::default()).await;
    assert_eq!(result.architecture.frontend.framework, "Unknown / Custom SPA");
    assert_eq!(result.architecture.kind, "Modern Web Application");
    assert_eq!(
        result.recommendations,
        vec![UNCONFIGURED_RECOMMENDATION.to_string()]
    );

    // Example snapshot: direct fields are lifted, priors stay fixed.
    let result = engine.classify(&example_snapshot()).await;
    assert_eq!(result.architecture.frontend.framework, "React");
    assert_eq!(result.architecture.infrastructure.cdn, "Cloudflare");
    assert_eq!(result.confidence.overall, 75);
    assert_eq!(result.confidence.frontend, 90);
    assert_eq!(result.confidence.backend, 40);
    assert_eq!(result.confidence.infrastructure, 85);
}

#[tokio::test]
async fn test_unconfigured_classification_is_deterministic() {
    let engine = InferenceEngine::unconfigured();
    let snapshot = example_snapshot();

    let first = serde_json::to_string(&engine.classify(&snapshot).await).unwrap();
    let second = serde_json::to_string(&engine.classify(&snapshot).await).unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_gateway_is_invoked_exactly_once_per_request() {
    let provider = Arc::new(MockLLMProvider::failing());
    let engine = InferenceEngine::with_provider(provider.clone());

    let result = engine.classify(&example_snapshot()).await;

    // Single best-effort attempt, no retry, even on failure.
    assert_eq!(provider.call_count(), 1);
    assert_eq!(result.recommendations.len(), 1);
    assert!(result.recommendations[0].starts_with(FAILURE_PREFIX));
}

#[tokio::test]
async fn test_confidence_in_range_across_all_outcomes() {
    let snapshot = example_snapshot();

    let outcomes = [
        InferenceEngine::unconfigured().classify(&snapshot).await,
        InferenceEngine::with_provider(Arc::new(MockLLMProvider::failing()))
            .classify(&snapshot)
            .await,
        InferenceEngine::with_provider(Arc::new(MockLLMProvider::new()))
            .classify(&snapshot)
            .await,
    ];

    for result in outcomes {
        for value in [
            result.confidence.overall,
            result.confidence.frontend,
            result.confidence.backend,
            result.confidence.infrastructure,
        ] {
            assert!(value <= 100);
        }
    }
}

#[tokio::test]
async fn test_model_confidence_outside_range_is_clamped() {
    let overconfident = r#"{
        "architecture": {
            "type": "Modern Web Application",
            "frontend": {"framework": "React", "rendering": "CSR"},
            "backend": {"runtime": "Node.js", "framework": null, "database": "Unknown"},
            "infrastructure": {"hosting": "Vercel", "cdn": "Cloudflare", "security": "HSTS"}
        },
        "confidence": {"overall": 240, "frontend": 101, "backend": -3, "infrastructure": 85},
        "recommendations": []
    }"#;
    let provider = MockLLMProvider::new().with_response("SCAN EVIDENCE", overconfident);
    let engine = InferenceEngine::with_provider(Arc::new(provider));

    let result = engine.classify(&example_snapshot()).await;
    assert_eq!(result.confidence.overall, 100);
    assert_eq!(result.confidence.frontend, 100);
    assert_eq!(result.confidence.backend, 0);
    assert_eq!(result.confidence.infrastructure, 85);
}

#[test]
fn test_fenced_and_unfenced_payloads_parse_identically() {
    let payload = r#"{"answer": "Served by nginx.", "confidence": 75,
        "citations": [], "suggested_questions": []}"#;
    let fenced = format!("```json\n{payload}\n```");

    let bare: AskResult = parser::parse(payload).unwrap();
    let wrapped: AskResult = parser::parse(&fenced).unwrap();

    assert_eq!(
        serde_json::to_value(&bare).unwrap(),
        serde_json::to_value(&wrapped).unwrap()
    );
}

#[tokio::test]
async fn test_unconfigured_qa_contract() {
    let engine = QAGroundingEngine::unconfigured();
    let result = engine
        .ask("What CDN is used?", &EvidenceSnapshot::default())
        .await;

    assert_eq!(result.confidence, 0);
    assert!(result.citations.is_empty());
    assert_eq!(result.suggested_questions, DEFAULT_SUGGESTED_QUESTIONS.to_vec());
}

#[tokio::test]
async fn test_qa_success_path_with_fenced_output() {
    let engine = QAGroundingEngine::with_provider(Arc::new(MockLLMProvider::new().fenced()));
    let snapshot: EvidenceSnapshot =
        serde_json::from_str(r#"{"dns": {"data": {"provider": "Cloudflare"}}}"#).unwrap();

    let result = engine.ask("What CDN is used?", &snapshot).await;
    assert_eq!(result.answer, "The site is served through Cloudflare.");
    assert_eq!(result.citations, vec!["[DNS] Provider/CDN: Cloudflare"]);
}
