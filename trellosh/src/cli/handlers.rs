//! Command execution handlers

use anyhow::{Context, Result};
use trello_core::{default_config_path, TrelloApi};

use crate::client::TrelloClient;
use crate::config::{Layer, ShellConfig};
use crate::format::OutputFormat;
use crate::repl::Shell;

use super::commands::Cli;

/// Resolve settings: config file (unless `--no-config`), then the
/// environment, then flags.
pub fn resolve_config(cli: &Cli) -> Result<ShellConfig> {
    let mut layers = Vec::with_capacity(3);

    if !cli.no_config {
        let path = cli.config.clone().unwrap_or_else(default_config_path);
        layers.push(Layer::from_file(&path)?);
    }
    layers.push(Layer::from_env());
    layers.push(flag_layer(cli)?);

    Ok(ShellConfig::resolve(layers))
}

fn flag_layer(cli: &Cli) -> Result<Layer> {
    let mut layer = Layer::default();

    if let Some(url) = &cli.api_url {
        layer.set_api_url(url).context("Invalid --api-url")?;
    }
    if let Some(format) = cli.format {
        layer.set_format(format);
    }
    if let Some(timeout) = cli.timeout {
        layer.set_timeout(timeout).context("Invalid --timeout")?;
    }
    if cli.verbose {
        layer.set_verbose(true);
    }
    if let Some(path) = &cli.credentials {
        layer.set_credentials(path.clone());
    }
    if let Some(member) = &cli.member {
        layer.set_member(member);
    }

    Ok(layer)
}

/// Handle the interactive shell on stdin/stdout
pub async fn handle_shell(config: &ShellConfig) -> Result<()> {
    let credentials = config.credentials();
    let client = TrelloClient::with_config(&config.api_url, config.timeout, &credentials)?;

    run_shell(&client, credentials.member_or_current(), config.format).await
}

/// Run a shell session against any adapter on the process's stdio
pub async fn run_shell(api: &dyn TrelloApi, member: &str, format: OutputFormat) -> Result<()> {
    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout();

    Shell::new(api, format)
        .run(member, input, &mut out)
        .await
        .context("Failed to read commands from standard input")
}

/// Generate shell completion script
pub fn generate_completion(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}
