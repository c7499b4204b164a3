//! # quest-cli
//!
//! Command-line interface for Eternal Quest.
//!
//! A thin caller over `quest-goal`: every command loads the project's
//! tracker, performs one operation, and saves it again.
//! - `quest add simple|eternal|checklist|negative` — create a goal
//! - `quest record <name>` — record progress and show the points earned
//! - `quest list` — show goals, score and level
//! - `quest score` — print the total score

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use quest_goal::QuestConfig;
use tracing_subscriber::EnvFilter;

/// Eternal Quest — track goals and earn points.
#[derive(Parser)]
#[command(name = "quest", version, about)]
struct Cli {
    /// Project root directory (defaults to current directory).
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new goal.
    Add {
        #[command(subcommand)]
        kind: commands::goal::AddCommands,
    },
    /// Record an event against a goal (name match ignores case).
    Record {
        /// Goal name.
        name: String,
    },
    /// List all goals with score and level.
    List,
    /// Print the total score.
    Score,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't mix with command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("quest_goal=warn,quest_cli=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let project_root = cli.project_root.canonicalize().unwrap_or(cli.project_root);
    let config = QuestConfig::load(&project_root)?;
    tracing::debug!(data_file = %config.data_file.display(), "using quest config");

    match &cli.command {
        Commands::Add { kind } => commands::goal::add(kind, &config),
        Commands::Record { name } => commands::record::record(name, &config),
        Commands::List => commands::goal::list(&config),
        Commands::Score => commands::record::score(&config),
    }
}
