pub mod client;
pub mod error;
pub mod extract;
pub mod harvest;
pub mod link;
pub mod paginate;
pub mod price;
pub mod stores;

pub use client::PageClient;
pub use error::ScraperError;
pub use extract::{extract_products, CompiledSelectors, ExtractionDebug};
pub use harvest::{harvest_all, HarvestReport, ScrapeOptions, StoreRunSummary};
pub use link::LinkRule;
pub use paginate::scrape_store;
pub use price::parse_price;
pub use stores::{default_stores, find_store, Selectors, StoreConfig};
