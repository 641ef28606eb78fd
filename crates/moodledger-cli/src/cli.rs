//! CLI argument definitions using clap
//!
//! This module contains the clap structs and enums for parsing CLI
//! arguments. The command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Moodledger - see how your moods and your money move together
#[derive(Parser)]
#[command(name = "moodledger")]
#[command(about = "Mood/spend insight engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute ranked insights from record files
    Insights {
        /// JSON array of financial records
        #[arg(short, long)]
        transactions: PathBuf,

        /// JSON array of mood check-ins
        #[arg(short, long)]
        moods: PathBuf,

        /// JSON array of manual link annotations
        #[arg(short, long)]
        annotations: Option<PathBuf>,

        /// Freeze the computation time (RFC 3339); defaults to now
        #[arg(long)]
        now: Option<String>,

        /// Emit raw JSON instead of text
        #[arg(long)]
        json: bool,

        /// Show at most this many cards
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// List index specifications, or show one in full
    Specs {
        /// Specification id (e.g. late_night_leak)
        id: Option<String>,
    },

    /// Validate the built-in specification set and exit
    Check,
}
