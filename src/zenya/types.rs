//! Zenya request types

use crate::types::{QueryParams, QueryParamsExt};

/// Token endpoint
pub const TOKENS_ENDPOINT: &str = "/tokens";

/// Portal content item listing
pub const CONTENT_ITEMS_ENDPOINT: &str = "/portals/content_items";

/// Dedicated search endpoint
pub const SEARCH_ENDPOINT: &str = "/search";

/// Content items per page when collecting documents
pub const CONTENT_PAGE_SIZE: u32 = 50;

/// Download path for a document
pub fn download_endpoint(document_id: &str) -> String {
    format!("/documents/{document_id}/download")
}

/// Fixed parameters of every content item request
pub(crate) fn content_item_params() -> QueryParams {
    let mut params = QueryParams::new();
    params
        .set("include_content_type", "true")
        .set("content_type_ids", "1")
        .set("envelope", "true")
        .set("include_sub_type_field", "true");
    params
}

/// Parameters for the `/search` endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    /// Search text
    pub query: String,
    /// Portal to search in
    pub portal_id: Option<u64>,
    /// `in_portal` or `outside_portal`
    pub search_scope: Option<String>,
    /// Collection to search in
    pub collection_id: Option<u64>,
    /// Token of the page to fetch
    pub continuation_token: Option<String>,
    /// Any further parameters, sent verbatim
    pub extra_params: QueryParams,
}

impl SearchRequest {
    /// Search for `query` with no portal, scope or collection
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Restrict to a portal
    #[must_use]
    pub fn portal_id(mut self, portal_id: u64) -> Self {
        self.portal_id = Some(portal_id);
        self
    }

    /// Set the search scope
    #[must_use]
    pub fn search_scope(mut self, scope: impl Into<String>) -> Self {
        self.search_scope = Some(scope.into());
        self
    }

    /// Restrict to a collection
    #[must_use]
    pub fn collection_id(mut self, collection_id: u64) -> Self {
        self.collection_id = Some(collection_id);
        self
    }

    /// Fetch the page a previous response pointed to
    #[must_use]
    pub fn continuation_token(mut self, token: impl Into<String>) -> Self {
        self.continuation_token = Some(token.into());
        self
    }

    /// Add an extra parameter
    #[must_use]
    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.extra_params.set(key, value);
        self
    }

    /// Query parameters without the continuation token.
    ///
    /// Extra parameters are applied last and may override the named ones.
    pub fn base_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .set("searchText", &self.query)
            .set_opt("portalId", self.portal_id)
            .set_opt(
                "searchScope",
                self.search_scope.as_deref().filter(|s| !s.is_empty()),
            )
            .set_opt("collectionId", self.collection_id);
        params.extend(self.extra_params.clone());
        params
    }
}
