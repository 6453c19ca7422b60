//! Concurrent fetching of paged collections.
//!
//! The first page tells us `totalPages`; the rest are requested with bounded
//! concurrency and reassembled in page order.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

use futures::stream::{FuturesUnordered, StreamExt};
use log::debug;

use super::pagination::Page;
use crate::error::Result;

/// Default cap on in-flight page requests
pub const DEFAULT_MAX_CONCURRENT: usize = 4;

type PageFuture<T> = Pin<Box<dyn Future<Output = (usize, Result<Page<T>>)> + Send>>;

/// Fetch the given page indexes, at most `max_concurrent` at a time.
///
/// Items come back in page order regardless of arrival order. The first
/// failing page aborts the whole fetch.
pub async fn fetch_remaining_pages<T, F, Fut>(
    remaining_pages: Vec<usize>,
    fetch_page: F,
    max_concurrent: usize,
) -> Result<Vec<T>>
where
    T: Send + 'static,
    F: Fn(usize) -> Fut,
    Fut: Future<Output = Result<Page<T>>> + Send + 'static,
{
    if remaining_pages.is_empty() {
        return Ok(Vec::new());
    }

    debug!(
        "Fetching {} remaining pages, {} at a time",
        remaining_pages.len(),
        max_concurrent
    );

    let make_future = |page: usize| -> PageFuture<T> {
        let fut = fetch_page(page);
        Box::pin(async move { (page, fut.await) })
    };

    let mut by_page: BTreeMap<usize, Vec<T>> = BTreeMap::new();
    let mut futures: FuturesUnordered<PageFuture<T>> = FuturesUnordered::new();
    let mut pending = remaining_pages.into_iter();

    for page in pending.by_ref().take(max_concurrent.max(1)) {
        futures.push(make_future(page));
    }

    while let Some((page, result)) = futures.next().await {
        let items = result?.content;
        debug!("Page {} returned {} items", page, items.len());
        by_page.insert(page, items);

        if let Some(next) = pending.next() {
            futures.push(make_future(next));
        }
    }

    Ok(by_page.into_values().flatten().collect())
}

/// Fetch page 0, then every page after it.
pub async fn fetch_all_pages<T, F, Fut>(fetch_page: F, max_concurrent: usize) -> Result<Vec<T>>
where
    T: Send + 'static,
    F: Fn(usize) -> Fut,
    Fut: Future<Output = Result<Page<T>>> + Send + 'static,
{
    let first = fetch_page(0).await?;
    let remaining = first.remaining_pages();
    let mut items = first.content;

    items.extend(fetch_remaining_pages(remaining, fetch_page, max_concurrent).await?);
    debug!("Fetched {} items in total", items.len());
    Ok(items)
}
