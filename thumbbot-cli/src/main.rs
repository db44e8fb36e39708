// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! thumbbot CLI - resolve social media links from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Resolve the first link in a message
//! thumbbot resolve "look at this https://x.com/user/status/123"
//!
//! # JSON output
//! thumbbot --format json --pretty resolve https://youtu.be/dQw4w9WgXcQ
//!
//! # Which adapter handles a link
//! thumbbot classify https://www.instagram.com/p/ABC123/
//!
//! # List adapters
//! thumbbot providers
//! ```

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use thumbbot_fetch::{Config, FetchSettings};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{classify, providers, resolve};

// ============================================================================
// CLI Definition
// ============================================================================

/// thumbbot CLI - social media link resolver.
#[derive(Parser)]
#[command(name = "thumbbot")]
#[command(about = "Resolve social media links into normalized posts and clips")]
#[command(long_about = r#"
thumbbot turns the first supported link in a message into a normalized post
(author, text, counts, media) or a downloaded voice clip.

Supported hosts:
  • X / Twitter (fxtwitter, vxtwitter fallback)
  • Instagram posts and reels (instagram)
  • YouTube videos (youtube)
  • Vocaroo clips (vocaroo)

Examples:
  thumbbot resolve "https://x.com/user/status/123"
  thumbbot --format json resolve "https://youtu.be/dQw4w9WgXcQ"
  thumbbot classify "https://voca.ro/abc123"
  thumbbot providers
"#)]
#[command(version)]
#[command(author = "Jan Feddersen")]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Configuration file (defaults to the user config directory).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the rate-limit retry count.
    #[arg(long, global = true)]
    pub max_retries: Option<u32>,

    /// Override the video size budget in bytes.
    #[arg(long, global = true, value_name = "BYTES")]
    pub size_budget: Option<u64>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the first supported link in a message.
    #[command(visible_alias = "r")]
    Resolve(resolve::ResolveArgs),

    /// Show which adapter handles a link.
    #[command(visible_alias = "c")]
    Classify(classify::ClassifyArgs),

    /// List available adapters.
    #[command(visible_alias = "p")]
    Providers,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// No supported link, or the adapter produced nothing.
    NotResolved = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Loads the config file, then applies environment and flag overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().context("Failed to load config")?,
    };
    config.apply_env();

    if let Some(retries) = cli.max_retries {
        config.max_retries = retries;
    }
    if let Some(budget) = cli.size_budget {
        config.size_budget_bytes = budget;
    }

    Ok(config)
}

/// Converts the effective config into fetch settings.
pub fn fetch_settings(config: &Config) -> Result<FetchSettings> {
    config.to_settings().context("Invalid configuration")
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool, level: &str) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("thumbbot=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("thumbbot={level}")))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e:#}");
            }
            return ExitCode::Error.into();
        }
    };

    setup_logging(cli.verbose, cli.quiet, &config.log_level);

    let result = match &cli.command {
        Commands::Resolve(args) => resolve::run(args, &cli, &config).await,
        Commands::Classify(args) => classify::run(args, &cli, &config).await,
        Commands::Providers => providers::run(&cli),
    };

    match result {
        Ok(code) => code.into(),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e:#}");
            }
            ExitCode::Error.into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolve_with_globals() {
        let cli = Cli::try_parse_from([
            "thumbbot",
            "resolve",
            "https://x.com/a/status/1",
            "--format",
            "json",
            "--max-retries",
            "7",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.max_retries, Some(7));
        match cli.command {
            Commands::Resolve(args) => assert_eq!(args.text, "https://x.com/a/status/1"),
            _ => panic!("expected resolve"),
        }
    }

    #[test]
    fn test_flag_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"max_retries": 2, "size_budget_bytes": 1000}"#).unwrap();

        let cli = Cli::try_parse_from([
            "thumbbot",
            "--config",
            path.to_str().unwrap(),
            "--size-budget",
            "5000",
            "providers",
        ])
        .unwrap();

        let config = load_config(&cli).unwrap();
        assert_eq!(config.size_budget_bytes, 5000);
        let settings = fetch_settings(&config).unwrap();
        assert_eq!(settings.size_budget, 5000);
    }

    #[test]
    fn test_command_required() {
        assert!(Cli::try_parse_from(["thumbbot"]).is_err());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitCode::Success as u8, 0);
        assert_eq!(ExitCode::Error as u8, 1);
        assert_eq!(ExitCode::NotResolved as u8, 2);
    }
}
