//! CLI command implementations.
//!
//! - `infer`: classify the technology stack behind an evidence snapshot
//! - `ask`: answer a free-text question grounded in an evidence snapshot
//! - `context`: print the rendered context document for a snapshot

pub mod ask;
pub mod context;
pub mod infer;

use anyhow::{Context, Result};
use stacksight_inference::EvidenceSnapshot;
use std::path::Path;
use tracing::debug;

/// Load an evidence snapshot from a JSON file. Unknown fields are ignored,
/// missing sections default to absent.
pub fn load_snapshot(path: &Path) -> Result<EvidenceSnapshot> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read evidence snapshot: {}", path.display()))?;
    debug!(path = %path.display(), bytes = raw.len(), "loaded evidence snapshot");
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse evidence snapshot: {}", path.display()))
}
