//! Authenticator implementation
//!
//! Acquires tokens, caches them, and renders the per-backend headers.

use super::types::{AuthConfig, Credential};
use crate::error::{Error, Result};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

const CONTENT_TYPE_JSON: &str = "application/json";

/// Authenticator handles token acquisition and request headers
pub struct Authenticator {
    /// Auth configuration
    config: AuthConfig,
    /// Current credential; overwritten in place on refresh
    credential: Arc<RwLock<Option<Credential>>>,
    /// HTTP client for token requests
    http_client: Client,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Create an authenticator with a custom HTTP client
    pub fn with_client(config: AuthConfig, http_client: Client) -> Self {
        Self {
            config,
            credential: Arc::new(RwLock::new(None)),
            http_client,
        }
    }

    /// Perform one token request and store the result.
    ///
    /// Any status other than 200 is an authentication failure carrying the
    /// status code and response body.
    pub async fn acquire(&self) -> Result<()> {
        let credential = self.fetch_new_token().await?;
        *self.credential.write().await = Some(credential);
        Ok(())
    }

    /// True when no token was ever acquired or the current one has expired
    pub async fn is_expired(&self) -> bool {
        self.credential
            .read()
            .await
            .as_ref()
            .map_or(true, Credential::is_expired)
    }

    /// Headers required by the backend, refreshing the token first if needed
    pub async fn headers(&self) -> Result<HashMap<String, String>> {
        let mut headers = HashMap::new();

        match &self.config {
            AuthConfig::None => {}

            AuthConfig::OperatorLogin { api_key, .. } => {
                let token = self.get_or_refresh_token().await?;
                headers.insert("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string());
                headers.insert(
                    "Authorization".to_string(),
                    format!("TOKEN id=\"{token}\", APIKEY {api_key}"),
                );
            }

            AuthConfig::ApiToken { api_version, .. } => {
                let token = self.get_or_refresh_token().await?;
                headers.insert("Authorization".to_string(), format!("token {token}"));
                headers.insert("x-api-version".to_string(), api_version.clone());
                headers.insert("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string());
            }
        }

        Ok(headers)
    }

    /// Apply the backend headers to a request builder
    pub async fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        let mut req = req;
        for (key, value) in self.headers().await? {
            req = req.header(key, value);
        }
        Ok(req)
    }

    /// Get a valid token, refreshing if necessary
    async fn get_or_refresh_token(&self) -> Result<String> {
        {
            let cached = self.credential.read().await;
            if let Some(credential) = cached.as_ref() {
                if !credential.is_expired() {
                    return Ok(credential.token().to_string());
                }
            }
        }

        let mut cached = self.credential.write().await;

        // Another caller may have refreshed while we waited for the write lock
        if let Some(credential) = cached.as_ref() {
            if !credential.is_expired() {
                return Ok(credential.token().to_string());
            }
        }

        debug!("Token missing or expired, acquiring a new one");
        let credential = self.fetch_new_token().await?;
        let token = credential.token().to_string();
        *cached = Some(credential);

        Ok(token)
    }

    /// Fetch a new token based on auth type
    async fn fetch_new_token(&self) -> Result<Credential> {
        match &self.config {
            AuthConfig::OperatorLogin { login_url, api_key } => {
                self.fetch_operator_token(login_url, api_key).await
            }

            AuthConfig::ApiToken {
                token_url,
                api_key,
                username,
                api_version,
                lifetime_secs,
            } => {
                self.fetch_api_token(token_url, api_key, username, api_version, *lifetime_secs)
                    .await
            }

            AuthConfig::None => Err(Error::config(
                "Token acquisition not supported without an auth config",
            )),
        }
    }

    /// Log in as operator; the token is the raw response body
    async fn fetch_operator_token(&self, login_url: &str, api_key: &str) -> Result<Credential> {
        let response = self
            .http_client
            .get(login_url)
            .header("Content-Type", CONTENT_TYPE_JSON)
            .header("Authorization", format!("Basic {api_key}"))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if status != StatusCode::OK {
            return Err(Error::auth(status.as_u16(), body));
        }

        let token = body.trim();
        if token.is_empty() {
            return Err(Error::auth(status.as_u16(), body));
        }

        info!("Acquired operator token");
        Ok(Credential::permanent(token))
    }

    /// Request an API token; the token is a JSON string
    async fn fetch_api_token(
        &self,
        token_url: &str,
        api_key: &str,
        username: &str,
        api_version: &str,
        lifetime_secs: u64,
    ) -> Result<Credential> {
        let response = self
            .http_client
            .post(token_url)
            .header("x-api-version", api_version)
            .json(&json!({ "api_key": api_key, "username": username }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if status != StatusCode::OK {
            return Err(Error::auth(status.as_u16(), body));
        }

        // Anything but a non-empty JSON string is a failed login
        let token = match serde_json::from_str::<Value>(&body) {
            Ok(Value::String(token)) if !token.trim().is_empty() => token,
            _ => return Err(Error::auth(status.as_u16(), body)),
        };

        let seconds = i64::try_from(lifetime_secs).map_err(|_| {
            Error::invalid_value("token_lifetime_secs", format!("{lifetime_secs}s is out of range"))
        })?;
        let credential = Credential::expires_in(token, seconds)?;
        info!(lifetime_secs, "Acquired API token");
        Ok(credential)
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
