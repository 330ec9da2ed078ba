//! Backend configuration
//!
//! Settings for the two backends, loaded from the environment or from a
//! YAML/JSON file. A backend is optional: tools for an unconfigured backend
//! answer with an error sentinel instead of failing the whole process.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Hard upper bound TOPdesk accepts for `page_size`
pub const TOPDESK_MAX_PAGE_SIZE: u32 = 1000;

/// Lifetime the Zenya token endpoint grants, in seconds
pub const ZENYA_TOKEN_LIFETIME_SECS: u64 = 60;

/// Longest token lifetime a config may declare, in seconds
pub const MAX_TOKEN_LIFETIME_SECS: u64 = 86_400;

// ============================================================================
// Top-Level Settings
// ============================================================================

/// Complete configuration for both backends
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// TOPdesk (knowledge base, incidents)
    #[serde(default)]
    pub topdesk: Option<TopdeskConfig>,

    /// Zenya (documents, search)
    #[serde(default)]
    pub zenya: Option<ZenyaConfig>,
}

impl Settings {
    /// Load settings from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    ///
    /// A backend section is only produced when its `*_API_URL` is set; its
    /// remaining required variables are then mandatory.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| lookup(key).ok_or_else(|| Error::missing_field(key));
        let timeout = |key: &str| -> Result<u64> {
            match lookup(key) {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|_| Error::invalid_value(key, format!("not a number: {raw}"))),
                None => Ok(default_timeout_secs()),
            }
        };

        let topdesk = match lookup("TOPDESK_API_URL") {
            Some(api_url) => Some(TopdeskConfig {
                api_url,
                api_key: require("TOPDESK_API_KEY")?,
                timeout_secs: timeout("TOPDESK_TIMEOUT_SECS")?,
                page_size: default_page_size(),
            }),
            None => None,
        };

        let zenya = match lookup("ZENYA_API_URL") {
            Some(api_url) => Some(ZenyaConfig {
                api_url,
                api_key: require("ZENYA_API_KEY")?,
                username: require("ZENYA_USERNAME")?,
                timeout_secs: timeout("ZENYA_TIMEOUT_SECS")?,
                ..ZenyaConfig::default()
            }),
            None => None,
        };

        let settings = Self { topdesk, zenya };
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a YAML file, or JSON when the extension is `.json`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {e}",
                path.display()
            ))
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let settings: Self = if is_json {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Validate every configured backend
    pub fn validate(&self) -> Result<()> {
        if let Some(topdesk) = &self.topdesk {
            topdesk.validate()?;
        }
        if let Some(zenya) = &self.zenya {
            zenya.validate()?;
        }
        Ok(())
    }
}

// ============================================================================
// TOPdesk
// ============================================================================

/// TOPdesk connection settings
#[derive(Clone, Serialize, Deserialize)]
pub struct TopdeskConfig {
    /// Base URL, e.g. `https://example.topdesk.net`
    pub api_url: String,

    /// Application password credential, sent as-is in the Basic header
    pub api_key: String,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Page size for list endpoints (clamped to 1000)
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl TopdeskConfig {
    /// Create a config with default timeout and page size
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            timeout_secs: default_timeout_secs(),
            page_size: default_page_size(),
        }
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn validate(&self) -> Result<()> {
        validate_url("topdesk.api_url", &self.api_url)?;
        if self.api_key.trim().is_empty() {
            return Err(Error::missing_field("topdesk.api_key"));
        }
        if self.page_size == 0 || self.page_size > TOPDESK_MAX_PAGE_SIZE {
            return Err(Error::invalid_value(
                "topdesk.page_size",
                format!("must be between 1 and {TOPDESK_MAX_PAGE_SIZE}"),
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for TopdeskConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TopdeskConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .field("page_size", &self.page_size)
            .finish()
    }
}

// ============================================================================
// Zenya
// ============================================================================

/// Zenya connection settings
#[derive(Clone, Serialize, Deserialize)]
pub struct ZenyaConfig {
    /// Base API URL, e.g. `https://example.zenya.work/api`
    pub api_url: String,

    /// API key posted to the token endpoint
    pub api_key: String,

    /// User the token is issued for
    pub username: String,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Seconds a freshly acquired token is treated as valid
    #[serde(default = "default_token_lifetime_secs")]
    pub token_lifetime_secs: u64,

    /// Value for the `x-api-version` header
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Portal searched when a caller does not name one
    #[serde(default = "default_portal_id")]
    pub default_portal_id: u64,

    /// Search scope used by document search
    #[serde(default = "default_search_scope")]
    pub default_search_scope: String,
}

impl Default for ZenyaConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            api_key: String::new(),
            username: String::new(),
            timeout_secs: default_timeout_secs(),
            token_lifetime_secs: default_token_lifetime_secs(),
            api_version: default_api_version(),
            default_portal_id: default_portal_id(),
            default_search_scope: default_search_scope(),
        }
    }
}

impl ZenyaConfig {
    /// Create a config with default lifetime, version and search settings
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            username: username.into(),
            ..Self::default()
        }
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn validate(&self) -> Result<()> {
        validate_url("zenya.api_url", &self.api_url)?;
        if self.api_key.trim().is_empty() {
            return Err(Error::missing_field("zenya.api_key"));
        }
        if self.username.trim().is_empty() {
            return Err(Error::missing_field("zenya.username"));
        }
        if !(1..=MAX_TOKEN_LIFETIME_SECS).contains(&self.token_lifetime_secs) {
            return Err(Error::invalid_value(
                "zenya.token_lifetime_secs",
                format!("must be between 1 and {MAX_TOKEN_LIFETIME_SECS}"),
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for ZenyaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZenyaConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .field("username", &self.username)
            .field("timeout_secs", &self.timeout_secs)
            .field("token_lifetime_secs", &self.token_lifetime_secs)
            .field("api_version", &self.api_version)
            .field("default_portal_id", &self.default_portal_id)
            .field("default_search_scope", &self.default_search_scope)
            .finish()
    }
}

// ============================================================================
// Defaults & validation
// ============================================================================

fn default_timeout_secs() -> u64 {
    30
}

fn default_page_size() -> u32 {
    TOPDESK_MAX_PAGE_SIZE
}

fn default_token_lifetime_secs() -> u64 {
    ZENYA_TOKEN_LIFETIME_SECS
}

fn default_api_version() -> String {
    "5".to_string()
}

fn default_portal_id() -> u64 {
    119
}

fn default_search_scope() -> String {
    "in_portal".to_string()
}

/// Credentials only travel over `https`; plain `http` is limited to loopback
fn validate_url(field: &str, value: &str) -> Result<()> {
    let parsed = url::Url::parse(value)
        .map_err(|e| Error::invalid_value(field, format!("'{value}': {e}")))?;
    match parsed.scheme() {
        "https" => Ok(()),
        "http" if is_loopback(&parsed) => Ok(()),
        "http" => Err(Error::invalid_value(
            field,
            format!("'{value}' would send credentials unencrypted; use https"),
        )),
        other => Err(Error::invalid_value(
            field,
            format!("unsupported scheme '{other}'"),
        )),
    }
}

fn is_loopback(url: &url::Url) -> bool {
    match url.host() {
        Some(url::Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
        Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}
