//! Resolve command - turn the first link of a message into content.

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use thumbbot_fetch::{CancellationToken, Config, FetchContext, HttpClient};
use thumbbot_providers::Resolver;
use tracing::{debug, info};

use crate::output::{JsonFormatter, ResolutionOutput, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat, fetch_settings};

/// Arguments for the resolve command.
#[derive(Debug, Clone, Args)]
pub struct ResolveArgs {
    /// Message text; only its first link is resolved.
    pub text: String,
}

/// Runs the resolve command.
pub async fn run(args: &ResolveArgs, cli: &Cli, config: &Config) -> Result<ExitCode> {
    let settings = fetch_settings(config)?;
    let http = HttpClient::try_with_timeout(settings.timeout)?;

    let cancel = CancellationToken::new();
    spawn_ctrl_c_handler(cancel.clone());

    let ctx = FetchContext::builder()
        .http(Arc::new(http))
        .settings(settings)
        .cancel(cancel)
        .build();
    let resolver = Resolver::new(ctx);

    info!("Resolving message");
    let Some(resolution) = resolver.resolve(&args.text).await else {
        if !cli.quiet {
            eprintln!("Nothing resolved");
        }
        return Ok(ExitCode::NotResolved);
    };

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_resolution(&resolution));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&ResolutionOutput::from(&resolution))?);
        }
    }

    Ok(ExitCode::Success)
}

/// Cancels `token` on the first Ctrl+C.
fn spawn_ctrl_c_handler(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("Interrupted, cancelling resolution");
            token.cancel();
        }
    });
}
