//! Drives the extractor across a bounded sequence of listing pages.

use std::time::Duration;

use glossy_core::ScrapedProduct;

use crate::client::PageClient;
use crate::error::ScraperError;
use crate::extract::{extract_products, CompiledSelectors};
use crate::stores::StoreConfig;

/// Visits pages `1..=max(page_count, 1)` of one store in ascending order and
/// returns the concatenation of every page's records, in page order.
///
/// A failure on a single page (fetch error, timeout, unresolvable page URL)
/// is logged and contributes zero records; the remaining pages still run.
/// `delay_ms` is slept after every page except the last, giving the source
/// server room between requests.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidSelector`] or
/// [`ScraperError::InvalidLinkPattern`] when the store's configuration does
/// not compile — a store-level failure, handled by the orchestrator.
pub async fn scrape_store(
    client: &PageClient,
    store: &StoreConfig,
    page_count: u32,
    delay_ms: u64,
    category: &str,
) -> Result<Vec<ScrapedProduct>, ScraperError> {
    let compiled = CompiledSelectors::for_store(store)?;
    let pages = page_count.max(1);
    let mut all_records: Vec<ScrapedProduct> = Vec::new();

    for page in 1..=pages {
        let url = (store.page_url)(&store.base_url, page);
        tracing::info!(store = %store.name, page, pages, url = %url, "scraping page");

        match client.fetch_page(&url).await {
            Ok(body) => match extract_products(&body, store, &compiled, &url, category) {
                Ok((records, extraction_debug)) => {
                    tracing::info!(
                        store = %store.name,
                        page,
                        debug = %extraction_debug,
                        total = all_records.len() + records.len(),
                        "page done"
                    );
                    all_records.extend(records);
                }
                Err(e) => {
                    tracing::warn!(
                        store = %store.name,
                        page,
                        error = %e,
                        "extraction failed; treating page as empty"
                    );
                }
            },
            Err(e) => {
                tracing::warn!(
                    store = %store.name,
                    page,
                    error = %e,
                    "page fetch failed; treating page as empty"
                );
            }
        }

        if page < pages && delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
    }

    Ok(all_records)
}
