//! Zenya backend
//!
//! Portal content items, document downloads and the dedicated search
//! endpoint. The API token expires after a fixed lifetime and is refreshed
//! lazily on the first request after expiry.
//!
//! Content items are walked offset by offset until a page comes back empty;
//! search results follow continuation tokens. Both are normalized into
//! [`NormalizedRecord`](crate::normalize::NormalizedRecord)s.

mod client;
mod types;

pub use client::ZenyaClient;
pub use types::{
    download_endpoint, SearchRequest, CONTENT_ITEMS_ENDPOINT, CONTENT_PAGE_SIZE, SEARCH_ENDPOINT,
    TOKENS_ENDPOINT,
};

#[cfg(test)]
mod tests;
