//! Shell settings and credentials resolution
//!
//! Settings come from up to three [`Layer`]s: the TOML config file, the
//! `TRELLOSH_*` environment and the command-line flags. A value is
//! validated as it enters a layer, so [`ShellConfig::resolve`] only has to
//! pick the highest layer that set each field and fall back to defaults.

use anyhow::{anyhow, bail, ensure, Context, Result};
use reqwest::Url;
use serde::Deserialize;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use tracing::warn;
use trello_core::{default_credentials_path, Credentials};

use crate::client::DEFAULT_API_URL;
use crate::format::OutputFormat;

/// Trello REST API version the client speaks
const API_VERSION: &str = "1";

/// Accepted request timeouts, in seconds
const TIMEOUT_RANGE: RangeInclusive<u64> = 1..=300;

const DEFAULT_TIMEOUT: u64 = 10;

/// Fully resolved shell settings
#[derive(Debug, Clone, PartialEq)]
pub struct ShellConfig {
    /// Trello REST API base URL, without a trailing slash
    pub api_url: String,
    pub format: OutputFormat,
    pub verbose: bool,
    /// Request timeout in seconds
    pub timeout: u64,
    /// Location of the JSON credentials file
    pub credentials_path: PathBuf,
    /// Member to browse instead of the one named in the credentials file
    pub member: Option<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            format: OutputFormat::Table,
            verbose: false,
            timeout: DEFAULT_TIMEOUT,
            credentials_path: default_credentials_path(),
            member: None,
        }
    }
}

impl ShellConfig {
    /// Merge `layers`, given lowest priority first, over the defaults
    pub fn resolve(layers: impl IntoIterator<Item = Layer>) -> Self {
        let merged = layers
            .into_iter()
            .fold(Layer::default(), |lower, layer| layer.over(lower));
        let defaults = Self::default();

        Self {
            api_url: merged.api_url.unwrap_or(defaults.api_url),
            format: merged.format.unwrap_or(defaults.format),
            verbose: merged.verbose.unwrap_or(defaults.verbose),
            timeout: merged.timeout.unwrap_or(defaults.timeout),
            credentials_path: merged.credentials.unwrap_or(defaults.credentials_path),
            member: merged.member,
        }
    }

    /// Read the credentials file and apply the member override
    pub fn credentials(&self) -> Credentials {
        let mut credentials = load_credentials(&self.credentials_path);
        if let Some(member) = &self.member {
            credentials.member = member.clone();
        }
        credentials
    }
}

/// Load a credentials file, never failing.
///
/// A missing or malformed file prints one line and yields empty
/// credentials, without the application key. API calls made with them fail
/// later with an authorization error.
pub fn load_credentials(path: &Path) -> Credentials {
    match Credentials::load(path) {
        Ok(credentials) => credentials,
        Err(e) => {
            println!("{}", e);
            warn!(path = %path.display(), error = %e, "continuing without credentials");
            Credentials::default()
        }
    }
}

/// One source of settings. Unset fields defer to lower layers.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Layer {
    api_url: Option<String>,
    format: Option<OutputFormat>,
    verbose: Option<bool>,
    timeout: Option<u64>,
    credentials: Option<PathBuf>,
    member: Option<String>,
}

/// On-disk shape of the config file
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileSettings {
    api_url: Option<String>,
    output_format: Option<String>,
    verbose: Option<bool>,
    timeout: Option<u64>,
    credentials: Option<PathBuf>,
    member: Option<String>,
}

impl Layer {
    /// Settings from a TOML file. An absent file is an empty layer; an
    /// unreadable, malformed or invalid one is an error.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let file: FileSettings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Self::from_file_settings(file)
            .with_context(|| format!("Invalid value in config file {}", path.display()))
    }

    fn from_file_settings(file: FileSettings) -> Result<Self> {
        let mut layer = Self::default();
        if let Some(url) = file.api_url {
            layer.set_api_url(&url)?;
        }
        if let Some(format) = file.output_format {
            layer.set_format(format.parse::<OutputFormat>()?);
        }
        if let Some(verbose) = file.verbose {
            layer.set_verbose(verbose);
        }
        if let Some(timeout) = file.timeout {
            layer.set_timeout(timeout)?;
        }
        if let Some(path) = file.credentials {
            layer.set_credentials(path);
        }
        if let Some(member) = file.member {
            layer.set_member(&member);
        }
        Ok(layer)
    }

    /// Settings from `TRELLOSH_*` variables. Values that fail validation
    /// are skipped.
    pub fn from_env() -> Self {
        let mut layer = Self::default();

        if let Some(url) = env_value("TRELLOSH_API_URL") {
            skip_invalid("TRELLOSH_API_URL", layer.set_api_url(&url));
        }
        if let Some(format) = env_value("TRELLOSH_FORMAT") {
            let parsed = format.parse::<OutputFormat>().map(|f| layer.set_format(f));
            skip_invalid("TRELLOSH_FORMAT", parsed);
        }
        if let Some(verbose) = env_value("TRELLOSH_VERBOSE") {
            let parsed = parse_flag(&verbose).map(|v| layer.set_verbose(v));
            skip_invalid("TRELLOSH_VERBOSE", parsed);
        }
        if let Some(timeout) = env_value("TRELLOSH_TIMEOUT") {
            let parsed = timeout
                .parse::<u64>()
                .map_err(|e| anyhow!("{}: {}", timeout, e))
                .and_then(|secs| layer.set_timeout(secs));
            skip_invalid("TRELLOSH_TIMEOUT", parsed);
        }
        if let Some(path) = env_value("TRELLOSH_CREDENTIALS") {
            layer.set_credentials(PathBuf::from(path));
        }
        if let Some(member) = env_value("TRELLOSH_MEMBER") {
            layer.set_member(&member);
        }

        layer
    }

    pub fn set_api_url(&mut self, raw: &str) -> Result<()> {
        self.api_url = Some(parse_api_url(raw)?);
        Ok(())
    }

    pub fn set_format(&mut self, format: OutputFormat) {
        self.format = Some(format);
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = Some(verbose);
    }

    pub fn set_timeout(&mut self, secs: u64) -> Result<()> {
        ensure!(
            TIMEOUT_RANGE.contains(&secs),
            "timeout must be between {} and {} seconds, got {}",
            TIMEOUT_RANGE.start(),
            TIMEOUT_RANGE.end(),
            secs
        );
        self.timeout = Some(secs);
        Ok(())
    }

    pub fn set_credentials(&mut self, path: PathBuf) {
        self.credentials = Some(path);
    }

    /// Blank members are ignored so the credentials file still applies
    pub fn set_member(&mut self, member: &str) {
        let member = member.trim();
        if !member.is_empty() {
            self.member = Some(member.to_string());
        }
    }

    /// `self` with its unset fields taken from `lower`
    fn over(self, lower: Layer) -> Layer {
        Layer {
            api_url: self.api_url.or(lower.api_url),
            format: self.format.or(lower.format),
            verbose: self.verbose.or(lower.verbose),
            timeout: self.timeout.or(lower.timeout),
            credentials: self.credentials.or(lower.credentials),
            member: self.member.or(lower.member),
        }
    }
}

/// Check that `raw` points at a Trello REST v1 root and normalise it.
///
/// `https://api.trello.com/1/` becomes `https://api.trello.com/1`.
fn parse_api_url(raw: &str) -> Result<String> {
    let url = Url::parse(raw.trim()).with_context(|| format!("invalid API URL '{}'", raw))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => bail!("API URL must use http or https, not {}", scheme),
    }
    ensure!(url.host_str().is_some(), "API URL '{}' has no host", raw);
    ensure!(
        url.query().is_none() && url.fragment().is_none(),
        "API URL '{}' must not carry a query or fragment",
        raw
    );

    let version = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last());
    ensure!(
        version == Some(API_VERSION),
        "API URL '{}' must end with the API version path /{}",
        raw,
        API_VERSION
    );

    Ok(url.as_str().trim_end_matches('/').to_string())
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("expected a boolean, got '{}'", other)),
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn skip_invalid(name: &str, result: Result<()>) {
    if let Err(e) = result {
        warn!(variable = name, error = %e, "ignoring environment override");
    }
}
