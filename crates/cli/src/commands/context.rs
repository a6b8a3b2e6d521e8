//! `context` command: show the tagged-line digest the model would see.

use anyhow::Result;
use clap::Args;
use stacksight_inference::ContextDocument;
use std::path::PathBuf;

#[derive(Args)]
pub struct ContextArgs {
    /// Path to the evidence snapshot JSON file
    pub input: PathBuf,
}

pub fn execute(args: ContextArgs) -> Result<()> {
    let snapshot = super::load_snapshot(&args.input)?;
    let document = ContextDocument::build(&snapshot);
    println!("{}", document.render());
    Ok(())
}
