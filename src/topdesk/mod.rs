//! TOPdesk backend
//!
//! Knowledge base listings, single-item lookup and incident listings.
//! Lists are walked with [`StatusOffsetSource`](crate::pagination::StatusOffsetSource):
//! TOPdesk answers `206` while more pages remain.
//!
//! The operator token is fetched once when the client connects and is used
//! for the life of the process.

mod client;
mod types;

pub use client::TopdeskClient;
pub use types::{
    KnowledgeQuery, INCIDENTS_ENDPOINT, KNOWLEDGE_ITEMS_ENDPOINT, KNOWLEDGE_ITEM_FIELDS,
    LOGIN_ENDPOINT, MODIFICATION_DATE_FIELDS, SINGLE_ITEM_FIELDS,
};
