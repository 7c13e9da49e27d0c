//! Accumulating paged responses.

use passivetotal_core::{Paginated, Result};
use std::future::Future;
use tracing::{debug, warn};

/// Page cap applied when the caller does not set one
pub const DEFAULT_MAX_PAGES: u32 = 1000;

/// Fetch pages starting at page 0 and accumulate their records.
///
/// Stops when a page comes back empty, when a page is shorter than the
/// first one, when the accumulated count reaches the total reported by the
/// API, or after `max_pages` pages ([`DEFAULT_MAX_PAGES`] when `None`).
pub async fn collect_pages<P, F, Fut>(max_pages: Option<u32>, mut fetch: F) -> Result<Vec<P::Item>>
where
    P: Paginated,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<P>>,
{
    let max_pages = max_pages.unwrap_or(DEFAULT_MAX_PAGES);
    let mut items = Vec::new();
    let mut page_size = None;
    let mut page = 0;

    while page < max_pages {
        let response = fetch(page).await?;
        let total = response.total();
        let batch = response.into_items();
        let len = batch.len();

        if len == 0 {
            break;
        }
        items.extend(batch);
        debug!(page, accumulated = items.len(), ?total, "collected page");

        if total.is_some_and(|t| items.len() >= t) {
            break;
        }
        if *page_size.get_or_insert(len) > len {
            break;
        }
        page += 1;
    }

    if page == max_pages {
        warn!(max_pages, accumulated = items.len(), "page limit reached");
    }

    Ok(items)
}
