//! Pagination module
//!
//! Supports: status-driven offset, empty-page offset, continuation token
//!
//! # Overview
//!
//! Every strategy implements [`PageSource`]: given a cursor it fetches one
//! page and reports the next cursor or completion. [`collect_pages`] is the
//! single aggregation loop over any source, so limit handling, empty-page
//! termination and malformed-page recovery behave the same for both
//! backends.

mod collector;
mod strategies;
mod types;

pub use collector::{collect_pages, collect_pages_with};
pub use strategies::{
    next_continuation_token, records_at, ContinuationSource, EmptyPageOffsetSource,
    StatusOffsetSource, CONTINUATION_TOKEN_KEYS,
};
pub(crate) use strategies::read_json;
pub use types::{NextPage, Page, PageSource};
