//! Auth configuration types
//!
//! Runtime auth configuration for the two backends plus the credential
//! holder the authenticator caches.

use crate::error::{Error, Result};
use chrono::{DateTime, TimeDelta, Utc};

/// Authentication configuration
#[derive(Clone, Default)]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// TOPdesk operator login.
    ///
    /// A GET with Basic auth against the login endpoint returns the token as
    /// a plain text body. The token is valid for the life of the process.
    OperatorLogin {
        /// Full URL of `/tas/api/login/operator`
        login_url: String,
        /// Credential placed after `Basic ` and repeated as `APIKEY`
        api_key: String,
    },

    /// Zenya API token.
    ///
    /// A JSON POST of `{api_key, username}` returns the token as a JSON
    /// string. The token is refreshed once its lifetime has elapsed.
    ApiToken {
        /// Full URL of `/tokens`
        token_url: String,
        /// API key
        api_key: String,
        /// User the token is issued for
        username: String,
        /// Value for `x-api-version`
        api_version: String,
        /// Seconds before the token counts as expired
        lifetime_secs: u64,
    },
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthConfig::None => f.write_str("None"),
            AuthConfig::OperatorLogin { login_url, .. } => f
                .debug_struct("OperatorLogin")
                .field("login_url", login_url)
                .finish_non_exhaustive(),
            AuthConfig::ApiToken {
                token_url,
                username,
                api_version,
                lifetime_secs,
                ..
            } => f
                .debug_struct("ApiToken")
                .field("token_url", token_url)
                .field("username", username)
                .field("api_version", api_version)
                .field("lifetime_secs", lifetime_secs)
                .finish_non_exhaustive(),
        }
    }
}

/// Bearer credential with an optional expiration instant
#[derive(Clone)]
pub struct Credential {
    token: String,
    expires_at: Option<DateTime<Utc>>,
}

impl Credential {
    /// Create a credential
    pub fn new(token: impl Into<String>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    /// Create a credential that never expires
    pub fn permanent(token: impl Into<String>) -> Self {
        Self::new(token, None)
    }

    /// Create a credential that expires N seconds from now.
    ///
    /// Fails when the expiration instant is not representable.
    pub fn expires_in(token: impl Into<String>, seconds: i64) -> Result<Self> {
        let expires_at = TimeDelta::try_seconds(seconds)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .ok_or_else(|| {
                Error::invalid_value("token_lifetime_secs", format!("{seconds}s is out of range"))
            })?;
        Ok(Self::new(token, Some(expires_at)))
    }

    /// True once the current instant is at or past the expiration instant
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Utc::now() >= expires_at,
            None => false,
        }
    }

    /// Expiration instant, if the credential has one
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub(crate) fn token(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
