//! Deterministic rendering of an evidence snapshot into the context document
//! that grounds every model prompt.
//!
//! Rendering is a pure function of the snapshot: identical input yields
//! byte-identical output, in fixed section order (DNS, TLS, HTTP, CRAWL) and
//! fixed field order within each section. A section the collectors never
//! produced emits no lines at all; a section that is present but undisclosed
//! renders explicit placeholders so the model can tell the two apart.

use crate::evidence::EvidenceSnapshot;

/// Canonical sentinel for a snapshot with no usable evidence.
pub const NO_EVIDENCE: &str = "No scan evidence available.";

/// Third-party domain lists are truncated to bound prompt size.
pub const MAX_THIRD_PARTY_DOMAINS: usize = 10;

/// Ordered sequence of tagged evidence lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextDocument {
    lines: Vec<String>,
}

impl ContextDocument {
    pub fn build(snapshot: &EvidenceSnapshot) -> Self {
        let mut lines = Vec::new();

        if let Some(dns) = snapshot.dns() {
            lines.push(format!(
                "[DNS] Provider/CDN: {}",
                dns.provider.as_deref().unwrap_or("Unknown")
            ));
            if !dns.records.a.is_empty() {
                lines.push(format!("[DNS] IP Address(es): {}", dns.records.a.join(", ")));
            }
            if !dns.records.ns.is_empty() {
                lines.push(format!("[DNS] Nameservers: {}", dns.records.ns.join(", ")));
            }
        }

        if let Some(tls) = snapshot.tls() {
            lines.push(format!(
                "[TLS] Protocol: {}",
                tls.version.as_deref().unwrap_or("Unknown")
            ));
            lines.push(format!(
                "[TLS] Certificate Issuer: {}",
                tls.certificate_issuer.as_deref().unwrap_or("Unknown")
            ));
            lines.push(format!("[TLS] HSTS Enabled: {}", tls.hsts.unwrap_or(false)));
        }

        if let Some(http) = snapshot.http() {
            lines.push(match http.status_code {
                Some(code) => format!("[HTTP] Status Code: {code}"),
                None => "[HTTP] Status Code: Unknown".to_string(),
            });
            lines.push(format!(
                "[HTTP] Server Header: {}",
                http.header("server").unwrap_or("Not disclosed")
            ));
            lines.push(format!(
                "[HTTP] X-Powered-By: {}",
                http.header("x-powered-by").unwrap_or("Not disclosed")
            ));
            if let Some(framework) = &http.technologies.framework {
                lines.push(format!("[HTTP] Detected Framework: {framework}"));
            }
            if let Some(language) = &http.technologies.language {
                lines.push(format!("[HTTP] Detected Language: {language}"));
            }
        }

        if let Some(crawl) = snapshot.crawl() {
            if !crawl.third_party.is_empty() {
                let shown: Vec<&str> = crawl
                    .third_party
                    .iter()
                    .take(MAX_THIRD_PARTY_DOMAINS)
                    .map(String::as_str)
                    .collect();
                lines.push(format!("[CRAWL] Third-party domains: {}", shown.join(", ")));
            }
            lines.push(format!("[CRAWL] Scripts loaded: {}", crawl.resources.scripts));
            match crawl.performance.load_time_ms {
                Some(ms) if ms > 0 => {
                    lines.push(format!("[CRAWL] Page load time: {ms}ms"));
                }
                _ => {}
            }
        }

        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The digest text embedded into prompts, or the sentinel when empty.
    pub fn render(&self) -> String {
        if self.lines.is_empty() {
            NO_EVIDENCE.to_string()
        } else {
            self.lines.join("\n")
        }
    }

    /// Whether `needle` appears verbatim in the rendered document. Used to
    /// verify model-supplied citations against the evidence actually sent.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}
