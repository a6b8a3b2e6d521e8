use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
use commands::{ask::AskArgs, context::ContextArgs, infer::InferArgs};

#[derive(Parser)]
#[command(name = "stacksight")]
#[command(about = "Evidence-grounded technology-stack inference and Q&A")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify the technology stack behind an evidence snapshot
    Infer(InferArgs),

    /// Ask a free-text question grounded in an evidence snapshot
    Ask(AskArgs),

    /// Print the context document rendered from an evidence snapshot
    Context(ContextArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Infer(args) => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(commands::infer::execute(args))
        }
        Commands::Ask(args) => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(commands::ask::execute(args))
        }
        Commands::Context(args) => commands::context::execute(args),
    }
}
