//! Sasswatch CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "sasswatch")]
#[command(about = "Incremental SCSS dependency tracking and rebuild planning", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Stylesheet root directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Glob pattern selecting the stylesheet corpus (repeatable)
    #[arg(short, long, default_value = "**/*.scss")]
    glob: Vec<String>,

    /// Additional import search path, relative to the root (repeatable)
    #[arg(short = 'I', long = "include-path")]
    include_paths: Vec<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch the corpus and print the rebuild set for every change
    Watch {
        /// Delete the compiled .css sibling when a .scss source is removed
        #[arg(long)]
        delete_css: bool,
    },
    /// Build the import graph once and report it
    Scan {
        /// Emit the graph as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!("sasswatch={}", log_level)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Watch { delete_css } => {
            commands::watch(cli.root, cli.glob, cli.include_paths, delete_css).await
        }
        Commands::Scan { json } => commands::scan(cli.root, cli.glob, cli.include_paths, json),
        Commands::Version => {
            println!("sasswatch v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
