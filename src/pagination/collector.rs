//! The aggregation loop
//!
//! Walks any [`PageSource`] sequentially, one request in flight at a time.

use super::types::{NextPage, Page, PageSource};
use crate::error::Result;
use crate::types::Record;
use tracing::{debug, warn};

/// Collect every record the source yields, up to `limit`.
///
/// - `Some(0)` returns immediately without a request.
/// - The result is truncated to exactly `limit`, mid-page if needed, and no
///   further page is requested once the cap is hit.
/// - An empty page ends the walk whatever cursor it carried.
/// - A malformed page ends the walk and keeps what was collected; any other
///   error aborts with no partial result.
pub async fn collect_pages<S>(source: &S, limit: Option<usize>) -> Result<Vec<Record>>
where
    S: PageSource + ?Sized,
{
    collect_pages_with(source, limit, |record| record).await
}

/// Like [`collect_pages`], mapping each record as it is accepted
pub async fn collect_pages_with<S, T, F>(
    source: &S,
    limit: Option<usize>,
    mut map: F,
) -> Result<Vec<T>>
where
    S: PageSource + ?Sized,
    F: FnMut(Record) -> T + Send,
{
    let mut collected = Vec::new();

    if limit == Some(0) {
        debug!("Limit is zero, skipping request");
        return Ok(collected);
    }

    let mut cursor = source.first_cursor();
    let mut page_count = 0u32;

    loop {
        let Page { records, next } = match source.fetch_page(&cursor).await {
            Ok(page) => page,
            Err(e) if e.is_malformed() => {
                warn!(
                    page = page_count + 1,
                    collected = collected.len(),
                    "Stopping pagination on malformed page: {e}"
                );
                break;
            }
            Err(e) => return Err(e),
        };
        page_count += 1;

        debug!(page = page_count, ?cursor, records = records.len(), "Fetched page");

        if records.is_empty() {
            break;
        }

        for record in records {
            collected.push(map(record));
            if limit.is_some_and(|limit| collected.len() >= limit) {
                debug!(pages = page_count, "Result limit reached");
                return Ok(collected);
            }
        }

        match next {
            NextPage::Continue(next_cursor) => cursor = next_cursor,
            NextPage::Done => break,
        }
    }

    debug!(
        pages = page_count,
        records = collected.len(),
        "Pagination complete"
    );
    Ok(collected)
}
