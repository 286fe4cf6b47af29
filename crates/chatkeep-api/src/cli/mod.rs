//! CLI definitions for the `chatkeep` binary.
//!
//! Server flags override `config.toml`; each can also be set through its
//! `CHATKEEP_*` environment variable.

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Persist chats and their messages behind a small REST API.
#[derive(Parser)]
#[command(name = "chatkeep", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all log output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Host to bind to.
        #[arg(long, env = "CHATKEEP_HOST")]
        host: Option<String>,

        /// Port to listen on.
        #[arg(short, long, env = "CHATKEEP_PORT")]
        port: Option<u16>,

        /// SQLite database URL, e.g. `sqlite://chats.db?mode=rwc`. Must point
        /// at a file.
        #[arg(long, env = "CHATKEEP_DATABASE_URL")]
        database_url: Option<String>,

        /// Export tracing spans through OpenTelemetry (stdout exporter).
        #[arg(long)]
        otel: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

impl Cli {
    /// Log filter derived from `--quiet` and `-v` flags.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "info",
            1 => "info,chatkeep=debug",
            _ => "trace",
        }
    }
}
