//! trellosh Core Library
//!
//! Shared types, credentials handling and the Trello adapter trait.
//! This crate is used by the `trellosh` shell and by its test fakes.

pub mod api;
pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use api::{Endpoint, TrelloApi};
pub use config::{
    default_config_path, default_credentials_path, Credentials, APPLICATION_KEY,
    CREDENTIALS_FILE_NAME,
};
pub use error::*;
pub use types::*;
