//! trellosh Library
//!
//! This library provides the core functionality for the trellosh shell.
//!
//! # Public API
//!
//! [`client::TrelloClient`] talks to the Trello REST API and implements
//! [`trello_core::TrelloApi`]. [`repl::Shell`] runs the interactive
//! navigation loop over any `TrelloApi`, reading commands from an async
//! reader and writing to any `std::io::Write`.
//!
//! ```no_run
//! use trellosh::client::TrelloClient;
//! use trellosh::format::OutputFormat;
//! use trellosh::repl::Shell;
//! use trello_core::Credentials;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let credentials = Credentials::default().with_application_key();
//! let client = TrelloClient::with_config("https://api.trello.com/1", 10, &credentials)?;
//!
//! let mut out = Vec::new();
//! Shell::new(&client, OutputFormat::Table)
//!     .run("me", "boards\nexit\n".as_bytes(), &mut out)
//!     .await?;
//! # Ok(())
//! # }
//! ```

// Internal CLI implementation - not part of public API
#[doc(hidden)]
pub mod cli;

/// HTTP client for the Trello REST API.
pub mod client;

/// Credentials loading and shell settings.
pub mod config;

/// Table and JSON rendering of listings.
pub mod format;

/// The interactive navigation shell.
pub mod repl;

#[cfg(test)]
pub mod test_utils;
