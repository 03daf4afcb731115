//! CLI argument and subcommand definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::format::OutputFormat;

/// Interactive shell for Trello
#[derive(Parser, Debug)]
#[command(name = "trellosh")]
#[command(version, about = "Browse Trello boards, lists and cards from a shell", long_about = None)]
pub struct Cli {
    /// Trello API base URL (overrides config file)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Listing output format (overrides config file)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Request timeout in seconds (overrides config file)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Don't load config file
    #[arg(long)]
    pub no_config: bool,

    /// Config file path (default: ~/.config/trellosh/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Credentials file path (default: ~/.trelloshrc)
    #[arg(long)]
    pub credentials: Option<PathBuf>,

    /// Member whose boards to browse (overrides the credentials file)
    #[arg(short, long)]
    pub member: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive shell (default)
    Shell,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
