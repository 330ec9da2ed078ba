//! Pagination types and traits
//!
//! Defines the page-source abstraction shared by every strategy.

use crate::error::Result;
use crate::types::Record;
use async_trait::async_trait;

/// What follows the page just fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage<C> {
    /// More pages available at this cursor
    Continue(C),
    /// No more pages
    Done,
}

impl<C> NextPage<C> {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue(_))
    }
}

/// One page of records plus the cursor-advance signal
#[derive(Debug, Clone)]
pub struct Page<C> {
    /// Records in backend order
    pub records: Vec<Record>,
    /// Where the next page starts, if anywhere
    pub next: NextPage<C>,
}

impl<C> Page<C> {
    /// Create a page that has a successor
    pub fn more(records: Vec<Record>, cursor: C) -> Self {
        Self {
            records,
            next: NextPage::Continue(cursor),
        }
    }

    /// Create the final page
    pub fn last(records: Vec<Record>) -> Self {
        Self {
            records,
            next: NextPage::Done,
        }
    }
}

/// A list endpoint walked one page at a time.
///
/// Strategies differ only in how they build the request for a cursor and
/// how they read the next cursor out of the response. The aggregation loop
/// in [`collect_pages`](super::collect_pages) is shared.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Offset, token, or whatever the backend advances with
    type Cursor: Clone + Send + Sync + std::fmt::Debug;

    /// Cursor for the first request
    fn first_cursor(&self) -> Self::Cursor;

    /// Fetch the page at `cursor`.
    ///
    /// Unparseable bodies must surface as `Error::MalformedResponse` so the
    /// collector can stop with partial results.
    async fn fetch_page(&self, cursor: &Self::Cursor) -> Result<Page<Self::Cursor>>;
}
