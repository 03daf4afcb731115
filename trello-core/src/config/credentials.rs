//! Credentials file model
//!
//! The file is a JSON object with PascalCase keys:
//!
//! ```json
//! {"Key": "", "Secret": "...", "Token": "...", "Member": "me", "Organization": ""}
//! ```

use crate::error::{Result, TrelloError};
use crate::types::CURRENT_MEMBER;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Application key baked into trellosh. Always replaces the file's `Key`.
pub const APPLICATION_KEY: &str = "09f16319e72a2488397b119be7560215";

/// Access credentials and default identifiers
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Credentials {
    pub key: String,
    pub secret: String,
    pub token: String,
    pub member: String,
    pub organization: String,
}

impl Credentials {
    /// Read and decode the credentials file at `path`.
    ///
    /// Missing keys decode as empty strings. The application key is applied
    /// on success.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| TrelloError::CredentialsNotFound {
            path: path.to_path_buf(),
            source,
        })?;

        let credentials: Credentials =
            serde_json::from_slice(&bytes).map_err(|e| TrelloError::InvalidCredentials {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(credentials.with_application_key())
    }

    /// Replace whatever key was supplied with [`APPLICATION_KEY`]
    pub fn with_application_key(mut self) -> Self {
        self.key = APPLICATION_KEY.to_string();
        self
    }

    /// Member to browse: the configured one, or the token owner
    pub fn member_or_current(&self) -> &str {
        if self.member.trim().is_empty() {
            CURRENT_MEMBER
        } else {
            self.member.trim()
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(value: &str) -> &'static str {
            if value.is_empty() {
                ""
            } else {
                "<redacted>"
            }
        }

        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &redact(&self.secret))
            .field("token", &redact(&self.token))
            .field("member", &self.member)
            .field("organization", &self.organization)
            .finish()
    }
}
