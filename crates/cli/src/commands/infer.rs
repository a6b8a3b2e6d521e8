//! `infer` command: evidence snapshot in, stack classification out.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use stacksight_inference::{AnalysisEnvelope, InferenceEngine};
use std::path::PathBuf;

#[derive(Args)]
pub struct InferArgs {
    /// Path to the evidence snapshot JSON file
    pub input: PathBuf,

    /// Write the result to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Wrap the result in a success/data/error envelope
    #[arg(long)]
    pub envelope: bool,
}

pub async fn execute(args: InferArgs) -> Result<()> {
    let snapshot = super::load_snapshot(&args.input)?;

    let engine = InferenceEngine::from_env();
    if engine.is_configured() {
        eprintln!("{} classifying with hosted model...", "stacksight:".cyan());
    } else {
        eprintln!(
            "{} no API key configured, using heuristic analysis",
            "stacksight:".yellow()
        );
    }

    let result = engine.classify(&snapshot).await;

    let json = if args.envelope {
        render(&AnalysisEnvelope::ok(result), args.pretty)?
    } else {
        render(&result, args.pretty)?
    };

    match args.output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("failed to write result: {}", path.display()))?;
            eprintln!("{} result written to {}", "stacksight:".green(), path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}

fn render<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn snapshot_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_execute_writes_result_file() {
        let input = snapshot_file(
            r#"{"dns": {"data": {"provider": "Cloudflare"}},
                "http": {"data": {"technologies": {"framework": "React"}}}}"#,
        );
        let output = NamedTempFile::new().unwrap();

        let args = InferArgs {
            input: input.path().to_path_buf(),
            output: Some(output.path().to_path_buf()),
            pretty: false,
            envelope: false,
        };
        execute(args).await.unwrap();

        let written = std::fs::read_to_string(output.path()).unwrap();
        let result: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(result["architecture"]["frontend"]["framework"], "React");
    }

    #[tokio::test]
    async fn test_envelope_flag_wraps_result() {
        let input = snapshot_file("{}");
        let output = NamedTempFile::new().unwrap();

        let args = InferArgs {
            input: input.path().to_path_buf(),
            output: Some(output.path().to_path_buf()),
            pretty: true,
            envelope: true,
        };
        execute(args).await.unwrap();

        let written = std::fs::read_to_string(output.path()).unwrap();
        let result: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(result["success"], true);
        assert!(result["data"]["confidence"].is_object());
        assert!(result["error"].is_null());
    }

    #[tokio::test]
    async fn test_missing_input_is_an_error() {
        let args = InferArgs {
            input: PathBuf::from("/nonexistent/snapshot.json"),
            output: None,
            pretty: false,
            envelope: false,
        };
        let error = execute(args).await.unwrap_err();
        assert!(error.to_string().contains("failed to read"));
    }

    #[tokio::test]
    async fn test_malformed_input_is_an_error() {
        let input = snapshot_file("{not json");
        let args = InferArgs {
            input: input.path().to_path_buf(),
            output: None,
            pretty: false,
            envelope: false,
        };
        let error = execute(args).await.unwrap_err();
        assert!(error.to_string().contains("failed to parse"));
    }
}
