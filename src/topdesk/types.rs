//! TOPdesk request types

use crate::config::TOPDESK_MAX_PAGE_SIZE;

/// Operator login endpoint
pub const LOGIN_ENDPOINT: &str = "/tas/api/login/operator";

/// Knowledge base list endpoint; single items live below it
pub const KNOWLEDGE_ITEMS_ENDPOINT: &str = "/services/knowledge-base-v1/knowledgeItems";

/// Incident list endpoint
pub const INCIDENTS_ENDPOINT: &str = "/tas/api/incidents";

/// Fields requested when listing knowledge items
pub const KNOWLEDGE_ITEM_FIELDS: &str =
    "title,description,content,keywords,creationDate,modificationDate,translation.content";

/// Fields requested when listing modification dates
pub const MODIFICATION_DATE_FIELDS: &str = "creationDate,modificationDate";

/// Fields requested for a single knowledge item
pub const SINGLE_ITEM_FIELDS: &str =
    "content,title,description,keywords,translation.creationDate,translation.modificationDate";

/// Field needed to apply the public filter
const VISIBILITY_FIELD: &str = "visibility";

/// Filter and paging options for knowledge item listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeQuery {
    /// Maximum number of items returned; `None` fetches everything
    pub limit: Option<usize>,
    /// Comma-separated field list; `None` uses the endpoint default
    pub fields: Option<String>,
    /// FIQL filter
    pub query: Option<String>,
    /// Free-text search term
    pub search_term: Option<String>,
    /// Only publicly visible items
    pub public_only: bool,
    /// Items per request, clamped to 1000
    pub page_size: u32,
}

impl Default for KnowledgeQuery {
    fn default() -> Self {
        Self {
            limit: None,
            fields: None,
            query: None,
            search_term: None,
            public_only: false,
            page_size: TOPDESK_MAX_PAGE_SIZE,
        }
    }
}

impl KnowledgeQuery {
    /// Query with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of items
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Request specific fields
    #[must_use]
    pub fn fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    /// Filter with a FIQL expression
    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Free-text search
    #[must_use]
    pub fn search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    /// Restrict to public items
    #[must_use]
    pub fn public_only(mut self, public_only: bool) -> Self {
        self.public_only = public_only;
        self
    }

    /// Set the page size
    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Field list to send, adding `visibility` for public-only listings
    pub(crate) fn effective_fields(&self, default: &str) -> String {
        let fields = self.fields.as_deref().unwrap_or(default);
        let has_visibility = fields
            .split(',')
            .any(|field| field.trim() == VISIBILITY_FIELD);
        if self.public_only && !has_visibility {
            format!("{fields},{VISIBILITY_FIELD}")
        } else {
            fields.to_string()
        }
    }

    /// FIQL query to send, with the public clause ANDed on when requested
    pub(crate) fn effective_query(&self) -> Option<String> {
        if self.public_only {
            Some(crate::query::with_public_filter(self.query.as_deref()))
        } else {
            self.query.clone().filter(|q| !q.trim().is_empty())
        }
    }
}
