//! CLI module for healthmon
//!
//! Provides command-line interface for running and inspecting health checks.

pub mod history;
pub mod provision;
pub mod run;

use clap::{Parser, Subcommand};

/// healthmon - HTTP endpoint health checker with persistent results
#[derive(Parser, Debug)]
#[command(name = "healthmon")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    HEALTHMON_TABLE_NAME    Result table name (required, legacy: TABLE_NAME)
    HEALTHMON_DATABASE_URL  SQLite database URL (default: sqlite:healthmon.db)
    HEALTHMON_ENDPOINTS     JSON array of {name, url, expectedStatus}
    HEALTHMON_LOG_LEVEL     Log level (default: info)
    HEALTHMON_LOG_FORMAT    Log format: text or json (default: text)
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check every configured endpoint once and store the results
    Run(run::RunArgs),
    /// Create the result table
    Provision,
    /// Show stored results
    History(history::HistoryArgs),
}
