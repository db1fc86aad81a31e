//! Multi-store orchestration: one sequential pass over the configuration set.

use std::time::Duration;

use glossy_core::{AppConfig, ScrapedProduct};

use crate::client::PageClient;
use crate::paginate::scrape_store;
use crate::stores::StoreConfig;

/// Run-wide scrape settings, lifted from [`AppConfig`].
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    pub pages_per_store: u32,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub inter_page_delay_ms: u64,
    pub inter_store_delay_ms: u64,
    pub category: String,
}

impl ScrapeOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            pages_per_store: config.scraper_pages_per_store,
            request_timeout_secs: config.scraper_request_timeout_secs,
            user_agent: config.scraper_user_agent.clone(),
            inter_page_delay_ms: config.scraper_inter_page_delay_ms,
            inter_store_delay_ms: config.scraper_inter_store_delay_ms,
            category: config.scraper_category.clone(),
        }
    }
}

/// Per-store outcome for the run summary.
#[derive(Debug, Clone)]
pub struct StoreRunSummary {
    pub store: String,
    pub records: usize,
    pub succeeded: bool,
}

/// Everything a scrape run produced: the validated records plus per-store
/// summaries for reporting.
#[derive(Debug)]
pub struct HarvestReport {
    pub products: Vec<ScrapedProduct>,
    pub stores: Vec<StoreRunSummary>,
}

/// Scrapes every configured store in order and returns the validated records.
///
/// Each store gets a fresh [`PageClient`] — an isolated session torn down
/// when the store's scope ends, whether it succeeded or failed. A store
/// whose session cannot be built or whose run fails contributes zero records;
/// the remaining stores still run. A fixed delay separates stores.
///
/// The returned records are the concatenation in store order, then page
/// order, then document order within a page, with the final validity filter
/// applied (non-empty name, positive price).
pub async fn harvest_all(stores: &[StoreConfig], options: &ScrapeOptions) -> HarvestReport {
    let mut all_products: Vec<ScrapedProduct> = Vec::new();
    let mut summaries: Vec<StoreRunSummary> = Vec::new();

    for (index, store) in stores.iter().enumerate() {
        tracing::info!(store = %store.name, pages = options.pages_per_store, "starting store");

        let outcome = run_one_store(store, options).await;
        let summary = match outcome {
            Ok(records) => {
                let summary = StoreRunSummary {
                    store: store.name.clone(),
                    records: records.len(),
                    succeeded: true,
                };
                all_products.extend(records);
                summary
            }
            Err(e) => {
                tracing::error!(
                    store = %store.name,
                    error = %e,
                    "store failed; continuing with remaining stores"
                );
                StoreRunSummary {
                    store: store.name.clone(),
                    records: 0,
                    succeeded: false,
                }
            }
        };
        summaries.push(summary);

        if index + 1 < stores.len() && options.inter_store_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(options.inter_store_delay_ms)).await;
        }
    }

    let before = all_products.len();
    all_products.retain(ScrapedProduct::is_valid);
    if all_products.len() < before {
        tracing::warn!(
            dropped = before - all_products.len(),
            "final filter removed records that escaped extraction checks"
        );
    }

    HarvestReport {
        products: all_products,
        stores: summaries,
    }
}

/// One store, one session: the `PageClient` built here is dropped on every
/// exit path of this function.
async fn run_one_store(
    store: &StoreConfig,
    options: &ScrapeOptions,
) -> Result<Vec<ScrapedProduct>, crate::error::ScraperError> {
    let client = PageClient::new(options.request_timeout_secs, &options.user_agent)?;
    scrape_store(
        &client,
        store,
        options.pages_per_store,
        options.inter_page_delay_ms,
        &options.category,
    )
    .await
}
