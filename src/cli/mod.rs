//! CLI interface for Sessiongate

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sessiongate")]
#[command(author = "Krakaw")]
#[command(version = "0.1.0")]
#[command(about = "Signed session cookies and a request verification gate", long_about = None)]
pub struct Cli {
    /// Path to sessiongate.toml (searched upward from the current directory by default)
    #[arg(short, long, global = true, env = "SESSIONGATE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new sessiongate.toml configuration file
    Init,

    /// Start the HTTP API server
    Serve {
        /// Host to bind to (defaults to [server].host)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (defaults to [server].port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Issue a session token for an identity
    Issue {
        /// Subject identifier to embed
        #[arg(long)]
        id: String,

        /// Email address to embed
        #[arg(long)]
        email: String,

        /// Token lifetime such as "1h" or "7d" (defaults to [auth].token_ttl)
        #[arg(short, long)]
        ttl: Option<String>,
    },

    /// Verify a session token and print the identity it carries
    Verify {
        /// The token to check
        token: String,
    },
}
