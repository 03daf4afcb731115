//! Default path resolution for configuration files

use std::path::PathBuf;

/// Name of the credentials file in the user's home directory
pub const CREDENTIALS_FILE_NAME: &str = ".trelloshrc";

/// Returns the default path of the credentials file: `~/.trelloshrc`.
///
/// Falls back to the current directory when no home directory is known.
pub fn default_credentials_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CREDENTIALS_FILE_NAME)
}

/// Returns the default path for the optional shell settings file.
///
/// Uses XDG config directory if available:
/// - Linux/macOS: `~/.config/trellosh/config.toml`
/// - Fallback: `./trellosh/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("trellosh")
        .join("config.toml")
}
