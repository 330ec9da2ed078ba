//! Pagination strategy implementations
//!
//! Each strategy turns a cursor into one request and reads the next cursor
//! back out of the response.

use super::types::{Page, PageSource};
use crate::config::TOPDESK_MAX_PAGE_SIZE;
use crate::error::{Error, Result};
use crate::http::{status_error, HttpClient, RequestConfig};
use crate::types::{JsonValue, QueryParams, Record};
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use tracing::{error, warn};

/// Longest slice of an unparseable body that gets logged
const LOGGED_BODY_LIMIT: usize = 500;

// ============================================================================
// Status-driven offset pagination
// ============================================================================

/// Offset pagination where the HTTP status says whether more pages follow.
///
/// TOPdesk list endpoints answer `206 Partial Content` while more records
/// remain and `200 OK` on the last page. Records sit under `item` in an
/// object body, or the body itself is the record list.
#[derive(Debug, Clone)]
pub struct StatusOffsetSource<'a> {
    client: &'a HttpClient,
    endpoint: String,
    base_params: QueryParams,
    page_size: u32,
}

impl<'a> StatusOffsetSource<'a> {
    /// Create a source; `page_size` is clamped to 1..=1000
    pub fn new(
        client: &'a HttpClient,
        endpoint: impl Into<String>,
        base_params: QueryParams,
        page_size: u32,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            base_params,
            page_size: page_size.clamp(1, TOPDESK_MAX_PAGE_SIZE),
        }
    }

    /// Effective page size after clamping
    pub fn page_size(&self) -> u32 {
        self.page_size
    }
}

#[async_trait]
impl PageSource for StatusOffsetSource<'_> {
    type Cursor = u32;

    fn first_cursor(&self) -> u32 {
        0
    }

    async fn fetch_page(&self, start: &u32) -> Result<Page<u32>> {
        let config = RequestConfig::new()
            .query_params(&self.base_params)
            .query("start", start.to_string())
            .query("page_size", self.page_size.to_string());

        let response = self.client.get_with_config(&self.endpoint, config).await?;
        let status = response.status();

        if status != StatusCode::OK && status != StatusCode::PARTIAL_CONTENT {
            let err = status_error(response).await;
            error!(endpoint = %self.endpoint, "Request failed: {err}");
            return Err(err);
        }

        let body = read_json(response, &self.endpoint).await?;
        let records = records_at(&body, "item");

        if status == StatusCode::PARTIAL_CONTENT {
            Ok(Page::more(records, start + self.page_size))
        } else {
            Ok(Page::last(records))
        }
    }
}

// ============================================================================
// Offset pagination ending on an empty page
// ============================================================================

/// Offset/limit pagination that runs until a page comes back empty.
///
/// Used for Zenya content items, which only ever answer `200`.
#[derive(Debug, Clone)]
pub struct EmptyPageOffsetSource<'a> {
    client: &'a HttpClient,
    endpoint: String,
    base_params: QueryParams,
    limit: u32,
}

impl<'a> EmptyPageOffsetSource<'a> {
    /// Create a source using `offset`/`limit` parameters and `data` records
    pub fn new(
        client: &'a HttpClient,
        endpoint: impl Into<String>,
        base_params: QueryParams,
        limit: u32,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            base_params,
            limit: limit.max(1),
        }
    }
}

#[async_trait]
impl PageSource for EmptyPageOffsetSource<'_> {
    type Cursor = u32;

    fn first_cursor(&self) -> u32 {
        0
    }

    async fn fetch_page(&self, offset: &u32) -> Result<Page<u32>> {
        let config = RequestConfig::new()
            .query_params(&self.base_params)
            .query("limit", self.limit.to_string())
            .query("offset", offset.to_string());

        let response = self.client.get_with_config(&self.endpoint, config).await?;
        if response.status() != StatusCode::OK {
            let err = status_error(response).await;
            error!(endpoint = %self.endpoint, "Request failed: {err}");
            return Err(err);
        }

        let body = read_json(response, &self.endpoint).await?;
        Ok(Page::more(
            records_at(&body, "data"),
            offset + self.limit,
        ))
    }
}

// ============================================================================
// Continuation-token pagination
// ============================================================================

/// Keys checked, in order, for the next continuation token
pub const CONTINUATION_TOKEN_KEYS: [&str; 2] = ["continuationToken", "nextContinuationToken"];

/// Pagination driven by an opaque token in the response payload.
///
/// The token is copied verbatim into the `continuationToken` parameter of
/// the next request. A missing or empty token ends the walk.
#[derive(Debug, Clone)]
pub struct ContinuationSource<'a> {
    client: &'a HttpClient,
    endpoint: String,
    base_params: QueryParams,
    start_token: Option<String>,
    token_param: String,
    record_key: String,
}

impl<'a> ContinuationSource<'a> {
    /// Create a source reading `items` and sending `continuationToken`
    pub fn new(client: &'a HttpClient, endpoint: impl Into<String>, base_params: QueryParams) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            base_params,
            start_token: None,
            token_param: "continuationToken".to_string(),
            record_key: "items".to_string(),
        }
    }

    /// Resume from a token returned by an earlier search
    #[must_use]
    pub fn with_start_token(mut self, token: Option<String>) -> Self {
        self.start_token = token.filter(|token| !token.is_empty());
        self
    }
}

#[async_trait]
impl PageSource for ContinuationSource<'_> {
    type Cursor = Option<String>;

    fn first_cursor(&self) -> Option<String> {
        self.start_token.clone()
    }

    async fn fetch_page(&self, token: &Option<String>) -> Result<Page<Option<String>>> {
        let mut config = RequestConfig::new().query_params(&self.base_params);
        if let Some(token) = token {
            config = config.query(&self.token_param, token.as_str());
        }

        let response = self.client.get_with_config(&self.endpoint, config).await?;
        if response.status() != StatusCode::OK {
            let err = status_error(response).await;
            error!(endpoint = %self.endpoint, "Request failed: {err}");
            return Err(err);
        }

        let body = read_json(response, &self.endpoint).await?;

        let records = match body.get(&self.record_key) {
            Some(JsonValue::Array(items)) => items.clone(),
            None | Some(JsonValue::Null) => Vec::new(),
            Some(other) => {
                warn!(
                    endpoint = %self.endpoint,
                    "Expected a list under '{}', got {}",
                    self.record_key,
                    json_kind(other)
                );
                Vec::new()
            }
        };

        match next_continuation_token(&body) {
            Some(next) => Ok(Page::more(records, Some(next))),
            None => Ok(Page::last(records)),
        }
    }
}

/// First non-empty continuation token in a search response.
///
/// An empty `continuationToken` falls through to `nextContinuationToken`.
pub fn next_continuation_token(body: &JsonValue) -> Option<String> {
    CONTINUATION_TOKEN_KEYS
        .iter()
        .filter_map(|key| body.get(key).and_then(JsonValue::as_str))
        .find(|token| !token.is_empty())
        .map(String::from)
}

// ============================================================================
// Helpers
// ============================================================================

/// Read a response body as JSON, mapping parse failures to `MalformedResponse`
pub(crate) async fn read_json(response: Response, endpoint: &str) -> Result<JsonValue> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| {
        let shown: String = text.chars().take(LOGGED_BODY_LIMIT).collect();
        error!(endpoint, body = %shown, "Invalid JSON response");
        Error::malformed(format!("{endpoint}: {e}"))
    })
}

/// Records of a page body.
///
/// Object bodies hold their records under `key`; list bodies are the records.
pub fn records_at(body: &JsonValue, key: &str) -> Vec<Record> {
    match body {
        JsonValue::Array(items) => items.clone(),
        JsonValue::Object(map) => match map.get(key) {
            Some(JsonValue::Array(items)) => items.clone(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "a list",
        JsonValue::Object(_) => "an object",
    }
}
