//! `ask` command: free-text question answered from an evidence snapshot.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use stacksight_inference::QAGroundingEngine;
use std::path::PathBuf;

#[derive(Args)]
pub struct AskArgs {
    /// The question to answer
    pub question: String,

    /// Path to the evidence snapshot JSON file
    pub input: PathBuf,

    /// Print the raw JSON result instead of formatted text
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: AskArgs) -> Result<()> {
    let snapshot = super::load_snapshot(&args.input)?;

    let engine = QAGroundingEngine::from_env();
    let result = engine.ask(&args.question, &snapshot).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{}", result.answer);
    println!();
    println!("{} {}%", "Confidence:".bold(), result.confidence);

    if !result.citations.is_empty() {
        println!("{}", "Citations:".bold());
        for citation in &result.citations {
            println!("  {citation}");
        }
    }

    if !result.suggested_questions.is_empty() {
        println!("{}", "You could also ask:".bold());
        for question in &result.suggested_questions {
            println!("  - {question}");
        }
    }

    Ok(())
}
