//! Query builders
//!
//! Turn structured filters (email, status, identifier, visibility) into the
//! FIQL subset TOPdesk accepts in its `query` parameter.
//!
//! ```
//! use deskbridge::query::{caller_query, IncidentStatus};
//!
//! let query = caller_query("a@b.com", IncidentStatus::Open);
//! assert_eq!(
//!     query,
//!     "caller.emailAddress=='a@b.com' and processingStatus.name=out=(Afgehandeld,Gesloten)"
//! );
//! ```

mod fiql;
mod types;

pub use fiql::{
    and, caller_clause, caller_query, identifier_query, status_clause, with_public_filter, AND,
    CONCEPT_KNOWLEDGE_QUERY, PUBLIC_KNOWLEDGE_CLAUSE, SEARCH_TERM_PARAM,
};
pub use types::{IncidentStatus, CLOSED_PROCESSING_STATES};
