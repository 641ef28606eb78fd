//! Moodledger CLI - mood/spend insight engine
//!
//! Usage:
//!   moodledger insights -t txns.json -m moods.json   Compute ranked insights
//!   moodledger specs [ID]                            Inspect index specifications
//!   moodledger check                                 Validate the built-in spec set

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Insights {
            transactions,
            moods,
            annotations,
            now,
            json,
            limit,
        } => commands::cmd_insights(
            &transactions,
            &moods,
            annotations.as_deref(),
            now.as_deref(),
            json,
            limit,
        ),
        Commands::Specs { id } => match id {
            Some(id) => commands::cmd_specs_show(&id),
            None => commands::cmd_specs_list(),
        },
        Commands::Check => commands::cmd_check(),
    }
}
