//! Typed evidence model for a single scan target.
//!
//! Collectors report each phase as `{ data, error }`. Every section and every
//! field inside a section is optional: a phase that never ran, errored, or
//! disclosed nothing contributes `None` and must not fail anywhere downstream.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Wire envelope produced by an upstream collector for one phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseOutcome<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Default for PhaseOutcome<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
        }
    }
}

/// Combined DNS/TLS/HTTP/Crawl results for one target, as handed to the
/// engine after all phases have resolved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidenceSnapshot {
    pub dns: Option<PhaseOutcome<DnsEvidence>>,
    pub tls: Option<PhaseOutcome<TlsEvidence>>,
    pub http: Option<PhaseOutcome<HttpEvidence>>,
    pub crawl: Option<PhaseOutcome<CrawlEvidence>>,
}

impl EvidenceSnapshot {
    pub fn dns(&self) -> Option<&DnsEvidence> {
        self.dns.as_ref().and_then(|phase| phase.data.as_ref())
    }

    pub fn tls(&self) -> Option<&TlsEvidence> {
        self.tls.as_ref().and_then(|phase| phase.data.as_ref())
    }

    pub fn http(&self) -> Option<&HttpEvidence> {
        self.http.as_ref().and_then(|phase| phase.data.as_ref())
    }

    pub fn crawl(&self) -> Option<&CrawlEvidence> {
        self.crawl.as_ref().and_then(|phase| phase.data.as_ref())
    }

    /// True when no phase delivered any data.
    pub fn is_empty(&self) -> bool {
        self.dns().is_none() && self.tls().is_none() && self.http().is_none()
            && self.crawl().is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DnsEvidence {
    pub provider: Option<String>,
    pub records: DnsRecords,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DnsRecords {
    #[serde(rename = "A")]
    pub a: Vec<String>,

    #[serde(rename = "NS")]
    pub ns: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TlsEvidence {
    pub version: Option<String>,
    pub certificate_issuer: Option<String>,
    pub hsts: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpEvidence {
    pub status_code: Option<u16>,
    pub headers: HashMap<String, String>,
    pub technologies: DetectedTechnologies,
}

impl HttpEvidence {
    /// Case-insensitive header lookup; collectors disagree on casing.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectedTechnologies {
    pub framework: Option<String>,
    pub language: Option<String>,
    pub hosting: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlEvidence {
    pub third_party: Vec<String>,
    pub resources: ResourceCounts,
    pub performance: PerformanceMetrics,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceCounts {
    pub scripts: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceMetrics {
    pub load_time_ms: Option<u64>,
}
