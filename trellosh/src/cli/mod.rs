//! CLI argument definitions and handlers
//!
//! This module organizes the CLI into logical submodules:
//! - [`commands`] - Argument and subcommand definitions
//! - [`handlers`] - Command execution handlers

mod commands;
mod handlers;

pub use commands::*;
pub use handlers::*;
