//! TOPdesk client implementation

use super::types::{
    KnowledgeQuery, INCIDENTS_ENDPOINT, KNOWLEDGE_ITEMS_ENDPOINT, KNOWLEDGE_ITEM_FIELDS,
    LOGIN_ENDPOINT, MODIFICATION_DATE_FIELDS, SINGLE_ITEM_FIELDS,
};
use crate::auth::AuthConfig;
use crate::config::TopdeskConfig;
use crate::error::{Error, Result};
use crate::http::{status_error, HttpClient, HttpClientConfig, RequestConfig};
use crate::pagination::{collect_pages, read_json, StatusOffsetSource};
use crate::query::SEARCH_TERM_PARAM;
use crate::types::{QueryParams, QueryParamsExt, Record};
use reqwest::StatusCode;
use tracing::{debug, error, info, warn};

/// Client for the TOPdesk knowledge base and incident API
#[derive(Debug)]
pub struct TopdeskClient {
    http: HttpClient,
    page_size: u32,
}

impl TopdeskClient {
    /// Build the client and log in.
    ///
    /// A failed login aborts construction with `Error::Auth`.
    pub async fn connect(config: &TopdeskConfig) -> Result<Self> {
        let client = Self::new(config)?;
        client.login().await?;
        Ok(client)
    }

    /// Build the client without contacting the backend.
    ///
    /// The operator token is then acquired on the first request.
    pub fn new(config: &TopdeskConfig) -> Result<Self> {
        let base_url = config.api_url.trim_end_matches('/').to_string();
        let auth = AuthConfig::OperatorLogin {
            login_url: format!("{base_url}{LOGIN_ENDPOINT}"),
            api_key: config.api_key.clone(),
        };
        let http_config = HttpClientConfig::builder()
            .base_url(base_url)
            .timeout(config.timeout())
            .build();

        Ok(Self {
            http: HttpClient::with_auth(http_config, auth)?,
            page_size: config.page_size,
        })
    }

    /// Acquire the operator token
    pub async fn login(&self) -> Result<()> {
        match self.http.authenticator() {
            Some(auth) => auth.acquire().await,
            None => Err(Error::config("TOPdesk client has no authenticator")),
        }
    }

    /// List knowledge items
    pub async fn load_knowledge_items(&self, query: &KnowledgeQuery) -> Result<Vec<Record>> {
        self.load_knowledge(query, KNOWLEDGE_ITEM_FIELDS).await
    }

    /// List knowledge items with only their creation and modification dates
    /// unless other fields are asked for
    pub async fn load_modification_dates(&self, query: &KnowledgeQuery) -> Result<Vec<Record>> {
        self.load_knowledge(query, MODIFICATION_DATE_FIELDS).await
    }

    async fn load_knowledge(
        &self,
        query: &KnowledgeQuery,
        default_fields: &str,
    ) -> Result<Vec<Record>> {
        let mut params = QueryParams::new();
        params
            .set("fields", query.effective_fields(default_fields))
            .set_opt("query", query.effective_query())
            .set_opt(
                SEARCH_TERM_PARAM,
                query.search_term.as_deref().filter(|t| !t.trim().is_empty()),
            );

        let source = StatusOffsetSource::new(
            &self.http,
            KNOWLEDGE_ITEMS_ENDPOINT,
            params,
            query.page_size.min(self.page_size),
        );
        let items = collect_pages(&source, query.limit).await?;
        info!(count = items.len(), "Loaded knowledge items");
        Ok(items)
    }

    /// Fetch one knowledge item by id or number.
    ///
    /// `404` and `400` mean "not found" and yield `None`; other failures are
    /// errors.
    pub async fn load_knowledge_item(
        &self,
        identifier: &str,
        fields: Option<&str>,
    ) -> Result<Option<Record>> {
        let endpoint = format!("{KNOWLEDGE_ITEMS_ENDPOINT}/{identifier}");
        let config = RequestConfig::new().query("fields", fields.unwrap_or(SINGLE_ITEM_FIELDS));

        let response = self.http.get_with_config(&endpoint, config).await?;
        match response.status() {
            StatusCode::OK => read_json(response, &endpoint).await.map(Some),
            StatusCode::NOT_FOUND => {
                warn!(identifier, "Knowledge item not found");
                Ok(None)
            }
            StatusCode::BAD_REQUEST => {
                let body = response.text().await.unwrap_or_default();
                warn!(identifier, %body, "Bad request for knowledge item, check the identifier");
                Ok(None)
            }
            _ => {
                let err = status_error(response).await;
                error!(identifier, "Knowledge item request failed: {err}");
                Err(err)
            }
        }
    }

    /// List incidents matching an optional FIQL query
    pub async fn load_incidents(
        &self,
        query: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<Record>> {
        let mut params = QueryParams::new();
        params.set_opt("query", query.filter(|q| !q.trim().is_empty()));
        debug!(?params, ?limit, "Loading incidents");

        let source =
            StatusOffsetSource::new(&self.http, INCIDENTS_ENDPOINT, params, self.page_size);
        let incidents = collect_pages(&source, limit).await?;
        info!(count = incidents.len(), "Loaded incidents");
        Ok(incidents)
    }
}
