//! Tool implementations
//!
//! Every tool catches failures from the layers below and returns a sentinel
//! in its own return shape, so callers only ever see JSON data.

use super::catalog::find_tool;
use super::types::{
    CallerIncidentsArgs, ContentArgs, DocumentArgs, DownloadedDocument, IncidentArgs,
    KnowledgeItemArgs, LimitArgs, ListDocumentsArgs, SearchDocumentsArgs, SearchKnowledgeArgs,
    DEFAULT_CONTENT_LIMIT, DEFAULT_DOCUMENT_SEARCH_LIMIT, DEFAULT_LIST_LIMIT, DEFAULT_SEARCH_LIMIT,
};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::normalize::FieldPaths;
use crate::query::{caller_query, identifier_query, IncidentStatus, CONCEPT_KNOWLEDGE_QUERY};
use crate::topdesk::{KnowledgeQuery, TopdeskClient};
use crate::types::{Backend, JsonValue};
use crate::zenya::ZenyaClient;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

/// Fields for knowledge search results
const SEARCH_FIELDS: &str = "title,description,content,keywords,creationDate,modificationDate";

/// Fields for recent and concept listings
const RECENT_FIELDS: &str = "title,description,creationDate,modificationDate";

/// Fields for full knowledge content
const CONTENT_FIELDS: &str =
    "title,description,content,keywords,translation.content,creationDate,modificationDate";

/// The callable tool surface over both backends.
///
/// A backend left unconfigured makes its tools answer with an error
/// sentinel.
#[derive(Debug, Default)]
pub struct Toolbox {
    topdesk: Option<TopdeskClient>,
    zenya: Option<ZenyaClient>,
}

impl Toolbox {
    /// Toolbox over already built clients
    pub fn new(topdesk: Option<TopdeskClient>, zenya: Option<ZenyaClient>) -> Self {
        Self { topdesk, zenya }
    }

    /// Build clients for every configured backend.
    ///
    /// TOPdesk logs in here, so a rejected login fails construction.
    pub async fn from_settings(settings: &Settings) -> Result<Self> {
        let topdesk = match &settings.topdesk {
            Some(config) => Some(TopdeskClient::connect(config).await?),
            None => None,
        };
        let zenya = settings.zenya.as_ref().map(ZenyaClient::new).transpose()?;
        Ok(Self::new(topdesk, zenya))
    }

    /// TOPdesk client, if configured
    pub fn topdesk(&self) -> Result<&TopdeskClient> {
        self.topdesk.as_ref().ok_or_else(|| not_configured(Backend::Topdesk))
    }

    /// Zenya client, if configured
    pub fn zenya(&self) -> Result<&ZenyaClient> {
        self.zenya.as_ref().ok_or_else(|| not_configured(Backend::Zenya))
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Call a tool by name with JSON arguments.
    ///
    /// Unknown tools and undecodable arguments produce sentinels too.
    pub async fn dispatch(&self, name: &str, args: JsonValue) -> JsonValue {
        let Some(spec) = find_tool(name) else {
            let err = Error::UnknownTool {
                name: name.to_string(),
            };
            warn!("{err}");
            return error_record(err.to_string());
        };

        debug!(tool = name, %args, "Dispatching tool");
        match self.call(name, args).await {
            Ok(value) => value,
            Err(e) => {
                warn!(tool = name, "Tool call rejected: {e}");
                spec.sentinel(e.to_string())
            }
        }
    }

    async fn call(&self, name: &str, args: JsonValue) -> Result<JsonValue> {
        let value = match name {
            "list_knowledge" => {
                let args: LimitArgs = decode(args)?;
                self.list_knowledge(args.limit.unwrap_or(DEFAULT_LIST_LIMIT))
                    .await
            }
            "list_public_knowledge" => {
                let args: LimitArgs = decode(args)?;
                self.list_public_knowledge(args.limit.unwrap_or(DEFAULT_LIST_LIMIT))
                    .await
            }
            "get_knowledge_by_id" => {
                let args: KnowledgeItemArgs = decode(args)?;
                self.get_knowledge_by_id(&args.identifier).await
            }
            "search_knowledge" => {
                let args: SearchKnowledgeArgs = decode(args)?;
                self.search_knowledge(
                    &args.search_term,
                    args.limit.unwrap_or(DEFAULT_SEARCH_LIMIT),
                )
                .await
            }
            "list_recent_knowledge" => {
                let args: LimitArgs = decode(args)?;
                self.list_recent_knowledge(args.limit.unwrap_or(DEFAULT_LIST_LIMIT))
                    .await
            }
            "list_concept_knowledge" => {
                let args: LimitArgs = decode(args)?;
                self.list_concept_knowledge(args.limit.unwrap_or(DEFAULT_SEARCH_LIMIT))
                    .await
            }
            "get_knowledge_content" => {
                let args: KnowledgeItemArgs = decode(args)?;
                self.get_knowledge_content(&args.identifier).await
            }
            "list_incidents_by_caller" => {
                let args: CallerIncidentsArgs = decode(args)?;
                let status = args.status.as_deref().unwrap_or(IncidentStatus::Open.as_str());
                self.list_incidents_by_caller(&args.email, status).await
            }
            "get_incident" => {
                let args: IncidentArgs = decode(args)?;
                self.get_incident(&args.number).await
            }
            "list_documents" => {
                let args: ListDocumentsArgs = decode(args)?;
                self.list_documents(args.max_results).await
            }
            "search_documents" => {
                let args: SearchDocumentsArgs = decode(args)?;
                self.search_documents(
                    &args.query,
                    args.max_results.unwrap_or(DEFAULT_DOCUMENT_SEARCH_LIMIT),
                    args.portal_id,
                )
                .await
            }
            "download_document" => {
                let args: DocumentArgs = decode(args)?;
                self.download_document(&args.document_id).await
            }
            "list_content" => {
                let args: ContentArgs = decode(args)?;
                self.list_content(
                    args.limit.unwrap_or(DEFAULT_CONTENT_LIMIT),
                    args.offset.unwrap_or(0),
                )
                .await
            }
            _ => {
                return Err(Error::UnknownTool {
                    name: name.to_string(),
                })
            }
        };
        Ok(value)
    }

    // ========================================================================
    // TOPdesk tools
    // ========================================================================

    /// Knowledge items with title, description and content
    pub async fn list_knowledge(&self, limit: usize) -> JsonValue {
        let result = async {
            let query = KnowledgeQuery::new().limit(limit);
            self.topdesk()?.load_knowledge_items(&query).await
        };
        list_result("Could not load knowledge items", result.await)
    }

    /// Publicly visible knowledge items
    pub async fn list_public_knowledge(&self, limit: usize) -> JsonValue {
        let result = async {
            let query = KnowledgeQuery::new().limit(limit).public_only(true);
            self.topdesk()?.load_knowledge_items(&query).await
        };
        list_result("Could not load public knowledge items", result.await)
    }

    /// One knowledge item, or a not-found sentinel
    pub async fn get_knowledge_by_id(&self, identifier: &str) -> JsonValue {
        let result = async { self.topdesk()?.load_knowledge_item(identifier, None).await };
        knowledge_item_result(identifier, result.await)
    }

    /// Free-text search over knowledge items
    pub async fn search_knowledge(&self, search_term: &str, limit: usize) -> JsonValue {
        let result = async {
            let query = KnowledgeQuery::new()
                .limit(limit)
                .fields(SEARCH_FIELDS)
                .search_term(search_term);
            self.topdesk()?.load_knowledge_items(&query).await
        };
        list_result("Could not search knowledge items", result.await)
    }

    /// Knowledge items with their creation and modification dates
    pub async fn list_recent_knowledge(&self, limit: usize) -> JsonValue {
        let result = async {
            let query = KnowledgeQuery::new().limit(limit).fields(RECENT_FIELDS);
            self.topdesk()?.load_modification_dates(&query).await
        };
        list_result("Could not load recent knowledge items", result.await)
    }

    /// Knowledge items still in concept status
    pub async fn list_concept_knowledge(&self, limit: usize) -> JsonValue {
        let result = async {
            let query = KnowledgeQuery::new()
                .limit(limit)
                .fields(RECENT_FIELDS)
                .query(CONCEPT_KNOWLEDGE_QUERY);
            self.topdesk()?.load_modification_dates(&query).await
        };
        list_result("Could not load concept knowledge items", result.await)
    }

    /// One knowledge item with its full content
    pub async fn get_knowledge_content(&self, identifier: &str) -> JsonValue {
        let result = async {
            self.topdesk()?
                .load_knowledge_item(identifier, Some(CONTENT_FIELDS))
                .await
        };
        knowledge_item_result(identifier, result.await)
    }

    /// Incidents reported by `email`; `status` is `open` or `closed`
    pub async fn list_incidents_by_caller(&self, email: &str, status: &str) -> JsonValue {
        let result = async {
            let status: IncidentStatus = status.parse()?;
            let query = caller_query(email, status);
            self.topdesk()?.load_incidents(Some(&query), None).await
        };
        list_result("Could not load incidents", result.await)
    }

    /// One incident by number, or a not-found sentinel
    pub async fn get_incident(&self, number: &str) -> JsonValue {
        let result = async {
            let query = identifier_query(number);
            self.topdesk()?.load_incidents(Some(&query), Some(1)).await
        };
        match result.await {
            Ok(incidents) => match incidents.into_iter().next() {
                Some(incident) => incident,
                None => {
                    warn!(number, "Incident not found");
                    error_record(format!("Incident {number} not found"))
                }
            },
            Err(e) => {
                warn!(number, "Incident lookup failed: {e}");
                error_record(format!("Could not load incident {number}: {e}"))
            }
        }
    }

    // ========================================================================
    // Zenya tools
    // ========================================================================

    /// Documents from every portal content page, normalized
    pub async fn list_documents(&self, max_results: Option<usize>) -> JsonValue {
        let result = async { self.zenya()?.collect_documents(max_results).await };
        list_result("Could not load documents", result.await)
    }

    /// Search documents; `portal_id` falls back to the configured portal
    pub async fn search_documents(
        &self,
        query: &str,
        max_results: usize,
        portal_id: Option<u64>,
    ) -> JsonValue {
        let result = async {
            let zenya = self.zenya()?;
            let request = zenya.search_request(query, portal_id);
            let paths = FieldPaths::search_defaults();
            zenya
                .collect_search_results(&request, Some(max_results), &paths)
                .await
        };
        list_result("Could not search documents", result.await)
    }

    /// Document content as base64
    pub async fn download_document(&self, document_id: &str) -> JsonValue {
        let result = async {
            let content = self.zenya()?.download_document(document_id).await?;
            Ok::<_, Error>(DownloadedDocument {
                document_id: document_id.to_string(),
                size_bytes: content.len(),
                content_base64: base64::engine::general_purpose::STANDARD.encode(&content),
            })
        };
        record_result(
            &format!("Could not download document {document_id}"),
            result.await,
        )
    }

    /// One raw page of portal content items
    pub async fn list_content(&self, limit: u32, offset: u32) -> JsonValue {
        let result = async { self.zenya()?.load_content(limit, offset).await };
        record_result("Could not load content items", result.await)
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn not_configured(backend: Backend) -> Error {
    Error::config(format!("{backend} is not configured"))
}

/// Decode tool arguments; `null` counts as no arguments
fn decode<T: DeserializeOwned>(args: JsonValue) -> Result<T> {
    let args = if args.is_null() { json!({}) } else { args };
    serde_json::from_value(args).map_err(|e| Error::invalid_argument("args", e.to_string()))
}

fn error_record(message: impl Into<String>) -> JsonValue {
    json!({ "error": message.into() })
}

fn list_result<T: Serialize>(context: &str, result: Result<Vec<T>>) -> JsonValue {
    let value = result.and_then(|items| serde_json::to_value(items).map_err(Error::from));
    match value {
        Ok(value) => value,
        Err(e) => {
            warn!("{context}: {e}");
            JsonValue::Array(vec![error_record(format!("{context}: {e}"))])
        }
    }
}

fn record_result<T: Serialize>(context: &str, result: Result<T>) -> JsonValue {
    let value = result.and_then(|record| serde_json::to_value(record).map_err(Error::from));
    match value {
        Ok(value) => value,
        Err(e) => {
            warn!("{context}: {e}");
            error_record(format!("{context}: {e}"))
        }
    }
}

fn knowledge_item_result(identifier: &str, result: Result<Option<JsonValue>>) -> JsonValue {
    match result {
        Ok(Some(item)) => item,
        Ok(None) => error_record(format!("Knowledge item {identifier} not found")),
        Err(e) => {
            warn!(identifier, "Knowledge item lookup failed: {e}");
            error_record(format!("Could not load knowledge item {identifier}: {e}"))
        }
    }
}
