//! Command line definition.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::schedule::MAX_DAILY_COMMITS;

#[derive(Debug, Parser)]
#[command(name = "gitstreak")]
#[command(about = "Analyze and fill GitHub contribution streaks with backdated commits", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to <config_dir>/gitstreak/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Do not pause between commits of the same date
    #[arg(long, global = true)]
    pub no_pacing: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a single backdated commit
    Commit {
        #[arg(short, long, help = "Path to the local repository")]
        repo: PathBuf,
        #[arg(short, long, help = "YYYY-MM-DD, optionally followed by HH:MM:SS")]
        date: String,
        #[arg(short, long)]
        message: Option<String>,
        #[arg(short, long, help = "File to modify, relative to the repository")]
        file: Option<String>,
        #[arg(long, help = "Content written to the file")]
        content: Option<String>,
        #[arg(long)]
        push: bool,
    },

    /// Backdate every date of a range, using COUNT as the per-date cap
    Bulk {
        #[arg(short, long)]
        repo: PathBuf,
        #[arg(long)]
        start_date: String,
        #[arg(long)]
        end_date: String,
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_DAILY_COMMITS)))]
        count: u32,
        #[arg(long)]
        push: bool,
    },

    /// Generate a natural-looking pattern over a range
    Natural {
        #[arg(short, long)]
        repo: PathBuf,
        #[arg(long)]
        start_date: String,
        #[arg(long)]
        end_date: String,
        #[arg(long, help = "GitHub user whose weekday pattern is imitated")]
        reference_user: Option<String>,
        #[arg(
            long,
            help = "Upper bound per date (defaults to the configured value)",
            value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_DAILY_COMMITS))
        )]
        max_daily_commits: Option<u32>,
        #[arg(long)]
        push: bool,
    },

    /// Report current and longest streaks plus recent gaps
    Analyze {
        #[arg(short, long, help = "GitHub user to analyze (defaults to you)")]
        username: Option<String>,
    },

    /// Fill the missing dates of the trailing window
    Fill {
        #[arg(short, long)]
        repo: PathBuf,
        #[arg(long, help = "How far back to look (defaults to the configured value)")]
        days_back: Option<u32>,
        #[arg(long)]
        push: bool,
    },

    /// Store a GitHub token and verify it
    Setup {
        #[arg(long)]
        token: Option<String>,
    },

    /// Suggest repositories to commit to
    Repos {
        #[arg(short, long)]
        language: Option<String>,
    },
}

impl Commands {
    /// Whether the subcommand needs GitHub credentials before it starts.
    pub fn needs_token(&self) -> bool {
        match self {
            Commands::Commit { .. } | Commands::Bulk { .. } | Commands::Setup { .. } => false,
            Commands::Natural { reference_user, .. } => reference_user.is_some(),
            Commands::Analyze { .. } | Commands::Fill { .. } | Commands::Repos { .. } => true,
        }
    }
}
