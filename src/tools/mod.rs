//! Tool surface
//!
//! Thirteen operations an agent can call. Each takes a small argument set,
//! runs a backend fetch and always answers with JSON: the records on
//! success, or an `{"error": ...}` sentinel (wrapped in a list for list
//! tools) on any failure.
//!
//! [`CATALOG`] describes every tool for registration with an agent;
//! [`Toolbox::dispatch`] calls a tool by name with JSON arguments.

mod catalog;
mod toolbox;
mod types;

pub use catalog::{find_tool, CATALOG};
pub use toolbox::Toolbox;
pub use types::{
    CallerIncidentsArgs, ContentArgs, DocumentArgs, DownloadedDocument, IncidentArgs,
    KnowledgeItemArgs, LimitArgs, ListDocumentsArgs, ParamKind, ParamSpec, ReturnShape,
    SearchDocumentsArgs, SearchKnowledgeArgs, ToolSpec, DEFAULT_CONTENT_LIMIT,
    DEFAULT_DOCUMENT_SEARCH_LIMIT, DEFAULT_LIST_LIMIT, DEFAULT_SEARCH_LIMIT,
};
