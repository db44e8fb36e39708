//! Classify command - show which adapter handles a link.

use anyhow::Result;
use clap::Args;
use thumbbot_fetch::{Config, HttpClient};
use thumbbot_providers::{ProviderRegistry, classify};

use crate::output::{ClassifyOutput, JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat, fetch_settings};

/// Arguments for the classify command.
#[derive(Debug, Clone, Args)]
pub struct ClassifyArgs {
    /// Link to classify; short links are expanded.
    pub url: String,
}

/// Runs the classify command.
pub async fn run(args: &ClassifyArgs, cli: &Cli, config: &Config) -> Result<ExitCode> {
    let settings = fetch_settings(config)?;
    let http = HttpClient::try_with_timeout(settings.timeout)?;

    let classified = classify(&args.url, &http).await?;
    let output = ClassifyOutput {
        input: args.url.clone(),
        url: classified.as_ref().map(|c| c.url.to_string()),
        provider: classified.as_ref().map(|c| c.kind),
        group: classified
            .as_ref()
            .and_then(|c| ProviderRegistry::get(c.kind))
            .map(|desc| desc.cli_name().to_string()),
    };

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_classified(&output));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&output)?);
        }
    }

    Ok(if classified.is_some() {
        ExitCode::Success
    } else {
        ExitCode::NotResolved
    })
}
