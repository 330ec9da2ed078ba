//! FIQL clause construction

use super::types::{IncidentStatus, CLOSED_PROCESSING_STATES};

/// Conjunction used between clauses
pub const AND: &str = " and ";

/// Clause restricting knowledge items to publicly visible ones
pub const PUBLIC_KNOWLEDGE_CLAUSE: &str = "visibility.publicKnowledgeItem==true";

/// Knowledge items still in concept status
pub const CONCEPT_KNOWLEDGE_QUERY: &str = "status.name==in=(Concept)";

/// Query parameter carrying a free-text knowledge search.
///
/// Free-text search is a separate backend capability and is never folded
/// into the FIQL `query` parameter.
pub const SEARCH_TERM_PARAM: &str = "search_term";

/// Exact match on an incident or knowledge number.
///
/// The value is quoted as-is; embedded quotes are not escaped.
pub fn identifier_query(number: &str) -> String {
    format!("number=='{number}'")
}

/// Exact match on the caller's email address
pub fn caller_clause(email: &str) -> String {
    format!("caller.emailAddress=='{email}'")
}

/// Processing status clause for an incident status filter
pub fn status_clause(status: IncidentStatus) -> String {
    format!(
        "processingStatus.name{}({})",
        status.operator(),
        CLOSED_PROCESSING_STATES.join(",")
    )
}

/// Incidents reported by `email` in the given status
pub fn caller_query(email: &str, status: IncidentStatus) -> String {
    and([caller_clause(email), status_clause(status)])
}

/// AND the public-visibility clause onto an optional existing query
pub fn with_public_filter(query: Option<&str>) -> String {
    match query.map(str::trim).filter(|q| !q.is_empty()) {
        Some(existing) => and([existing, PUBLIC_KNOWLEDGE_CLAUSE]),
        None => PUBLIC_KNOWLEDGE_CLAUSE.to_string(),
    }
}

/// Join non-empty clauses with `and`
pub fn and<I, S>(clauses: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    clauses
        .into_iter()
        .filter(|clause| !clause.as_ref().trim().is_empty())
        .map(|clause| clause.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(AND)
}
