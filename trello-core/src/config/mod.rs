//! Configuration types for trellosh
//!
//! # Architecture
//!
//! Configuration is split into:
//! - [`Credentials`] - API key, secret, token and default member, read from
//!   `~/.trelloshrc` once at startup
//! - Shell settings (API URL, output format, timeout), which live in the
//!   `trellosh` crate and are resolved from TOML, environment and flags

mod credentials;
mod paths;

pub use credentials::{Credentials, APPLICATION_KEY};
pub use paths::{default_config_path, default_credentials_path, CREDENTIALS_FILE_NAME};
