//! Command-line interface.

pub mod handle;
pub mod output;
pub mod validate;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::io::AsyncReadExt;

use crate::core::domain::Event;
use crate::error::Result;

/// ghsecret - sync a secret into GitHub Actions from CloudFormation.
#[derive(Parser)]
#[command(
    name = "ghsecret",
    about = "CloudFormation custom resource provider for GitHub Actions secrets",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the config file (defaults to ./ghsecret.toml if present)
    #[arg(long, global = true, env = "GHSECRET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Log output formats.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Handle one custom resource event and print the response document
    Handle {
        /// Event JSON file, or - for stdin
        #[arg(short, long, default_value = "-")]
        event: String,
        /// Also PUT the response to the event's ResponseURL
        #[arg(long)]
        respond: bool,
        /// Give up after this many seconds
        #[arg(long)]
        timeout: Option<u64>,
        /// GitHub REST API base URL
        #[arg(long, env = "GHSECRET_GITHUB_API_URL")]
        github_api_url: Option<String>,
        /// AWS region for Secrets Manager and SSM
        #[arg(long, env = "AWS_REGION")]
        region: Option<String>,
    },

    /// Decode and validate an event's resource properties without calling out
    Validate {
        /// Event JSON file, or - for stdin
        #[arg(short, long, default_value = "-")]
        event: String,
    },
}

/// Execute a command.
pub async fn execute(cli: Cli) -> Result<()> {
    use Command::*;

    match cli.command {
        Handle {
            event,
            respond,
            timeout,
            github_api_url,
            region,
        } => {
            let settings = handle::Settings {
                config: cli.config,
                github_api_url,
                region,
                respond,
                timeout,
            };
            handle::execute(&settings, &event).await
        }
        Validate { event } => validate::execute(&event).await,
    }
}

/// Read and decode an event from a file path or `-` for stdin.
pub async fn read_event(source: &str) -> Result<Event> {
    let raw = if source == "-" {
        let mut raw = String::new();
        tokio::io::stdin().read_to_string(&mut raw).await?;
        raw
    } else {
        tokio::fs::read_to_string(source).await?
    };
    Event::from_json(&raw)
}
