//! Zenya client implementation

use super::types::{
    content_item_params, download_endpoint, SearchRequest, CONTENT_ITEMS_ENDPOINT,
    CONTENT_PAGE_SIZE, SEARCH_ENDPOINT, TOKENS_ENDPOINT,
};
use crate::auth::AuthConfig;
use crate::config::ZenyaConfig;
use crate::error::{Error, Result};
use crate::http::{status_error, HttpClient, HttpClientConfig, RequestConfig};
use crate::normalize::{FieldPaths, NormalizedRecord};
use crate::pagination::{collect_pages_with, read_json, ContinuationSource, EmptyPageOffsetSource};
use crate::types::JsonValue;
use bytes::Bytes;
use reqwest::StatusCode;
use tracing::{debug, error, info, Level};

/// Client for the Zenya document API
#[derive(Debug)]
pub struct ZenyaClient {
    http: HttpClient,
    default_portal_id: u64,
    default_search_scope: String,
}

impl ZenyaClient {
    /// Build the client. No request is made until the first call, which
    /// acquires the first token.
    pub fn new(config: &ZenyaConfig) -> Result<Self> {
        let base_url = config.api_url.trim_end_matches('/').to_string();
        let auth = AuthConfig::ApiToken {
            token_url: format!("{base_url}{TOKENS_ENDPOINT}"),
            api_key: config.api_key.clone(),
            username: config.username.clone(),
            api_version: config.api_version.clone(),
            lifetime_secs: config.token_lifetime_secs,
        };
        let http_config = HttpClientConfig::builder()
            .base_url(base_url)
            .timeout(config.timeout())
            .build();

        Ok(Self {
            http: HttpClient::with_auth(http_config, auth)?,
            default_portal_id: config.default_portal_id,
            default_search_scope: config.default_search_scope.clone(),
        })
    }

    /// Force a token request
    pub async fn login(&self) -> Result<()> {
        match self.http.authenticator() {
            Some(auth) => auth.acquire().await,
            None => Err(Error::config("Zenya client has no authenticator")),
        }
    }

    /// Search request using the configured portal and scope.
    ///
    /// `portal_id` overrides the configured portal.
    pub fn search_request(
        &self,
        query: impl Into<String>,
        portal_id: Option<u64>,
    ) -> SearchRequest {
        SearchRequest::new(query)
            .portal_id(portal_id.unwrap_or(self.default_portal_id))
            .search_scope(self.default_search_scope.clone())
    }

    /// One raw, enveloped page of portal content items
    pub async fn load_content(&self, limit: u32, offset: u32) -> Result<JsonValue> {
        let config = RequestConfig::new()
            .query_params(&content_item_params())
            .query("limit", limit.to_string())
            .query("offset", offset.to_string());

        let response = self
            .http
            .get_with_config(CONTENT_ITEMS_ENDPOINT, config)
            .await?;
        if response.status() != StatusCode::OK {
            let err = status_error(response).await;
            error!("Content item request failed: {err}");
            return Err(err);
        }

        read_json(response, CONTENT_ITEMS_ENDPOINT).await
    }

    /// Walk every content item page and normalize the documents
    pub async fn collect_documents(
        &self,
        max_results: Option<usize>,
    ) -> Result<Vec<NormalizedRecord>> {
        let source = EmptyPageOffsetSource::new(
            &self.http,
            CONTENT_ITEMS_ENDPOINT,
            content_item_params(),
            CONTENT_PAGE_SIZE,
        );
        let paths = FieldPaths::content_item_defaults();

        let documents =
            collect_pages_with(&source, max_results, |item| paths.normalize(&item)).await?;
        debug!(count = documents.len(), "Document collection completed");
        Ok(documents)
    }

    /// Download a document's binary content
    pub async fn download_document(&self, document_id: &str) -> Result<Bytes> {
        let endpoint = download_endpoint(document_id);
        debug!(%endpoint, "Downloading document");

        let response = self.http.get(&endpoint).await?;
        if response.status() != StatusCode::OK {
            let err = status_error(response).await;
            error!(document_id, "Document download failed: {err}");
            return Err(err);
        }

        let content = response.bytes().await?;
        debug!(document_id, size = content.len(), "Downloaded document");
        Ok(content)
    }

    /// One raw page of search results
    pub async fn search(&self, request: &SearchRequest) -> Result<JsonValue> {
        let mut config = RequestConfig::new().query_params(&request.base_params());
        let token = request.continuation_token.as_deref();
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            config = config.query("continuationToken", token);
        }

        let response = self.http.get_with_config(SEARCH_ENDPOINT, config).await?;
        if response.status() != StatusCode::OK {
            let err = status_error(response).await;
            error!(query = %request.query, "Search request failed: {err}");
            return Err(err);
        }

        read_json(response, SEARCH_ENDPOINT).await
    }

    /// Follow continuation tokens and normalize every result.
    ///
    /// Raw items are kept on each record only while debug logging is on.
    pub async fn collect_search_results(
        &self,
        request: &SearchRequest,
        max_results: Option<usize>,
        paths: &FieldPaths,
    ) -> Result<Vec<NormalizedRecord>> {
        let source = ContinuationSource::new(&self.http, SEARCH_ENDPOINT, request.base_params())
            .with_start_token(request.continuation_token.clone());
        let keep_raw = tracing::enabled!(Level::DEBUG);

        let results = collect_pages_with(&source, max_results, |item| {
            paths.normalize_owned(item, keep_raw)
        })
        .await?;
        info!(query = %request.query, count = results.len(), "Search completed");
        Ok(results)
    }
}
