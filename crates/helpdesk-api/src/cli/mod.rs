//! CLI command definitions for the `helpdesk` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod ask;
pub mod stats;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// IT helpdesk chat assistant: HTTP API, analytics and one-shot questions.
#[derive(Parser)]
#[command(name = "helpdesk", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (defaults to `{data_dir}/config.toml`).
    #[arg(long, global = true, env = "HELPDESK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server.
    Serve {
        /// Address to bind (overrides `[server] host` / `HOST`).
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides `[server] port` / `PORT`).
        #[arg(long, short)]
        port: Option<u16>,

        /// Export tracing spans through OpenTelemetry (stdout exporter).
        #[arg(long)]
        otel: bool,
    },

    /// Create the database and apply migrations.
    InitDb,

    /// Show usage statistics.
    Stats {
        /// Show one user's activity instead of the summary report.
        #[arg(long, conflicts_with = "trends")]
        user: Option<String>,

        /// Show per-category trends over the last N days.
        #[arg(long, value_name = "DAYS")]
        trends: Option<u32>,
    },

    /// Ask a single question and print the reply.
    Ask {
        /// The question, as a user would type it in the chat.
        message: String,

        /// User id recorded with the exchange.
        #[arg(long, default_value = helpdesk_types::exchange::ANONYMOUS_USER)]
        user_id: String,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
