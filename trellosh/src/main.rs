//! trellosh
//!
//! Interactive shell for browsing Trello boards, lists and cards.

use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use trellosh::cli::{generate_completion, handle_shell, resolve_config, Cli, Commands};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Completion { shell }) = &cli.command {
        generate_completion(*shell);
        return Ok(());
    }

    // Priority chain: defaults, then file, env and flags
    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_tracing(config.verbose);

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    tracing::debug!(api_url = %config.api_url, format = %config.format, "starting shell");

    handle_shell(&config).await
}

/// Initialize tracing subscriber for logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
