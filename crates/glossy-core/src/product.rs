use serde::{Deserialize, Serialize};

/// Names longer than this are truncated at extraction time.
pub const MAX_NAME_LEN: usize = 200;

/// Names shorter than this (after trimming) are rejected at extraction time.
pub const MIN_NAME_LEN: usize = 3;

/// A product listing extracted from one storefront page, normalized into the
/// store-agnostic shape the upload path persists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapedProduct {
    /// Display name, trimmed and truncated to [`MAX_NAME_LEN`] characters.
    pub name: String,
    /// Price in the store's native currency units.
    ///
    /// Boundary note: this is a scrape-time `f64` convenience type.
    /// Persistence converts to `NUMERIC(10,2)` in the DB layer, so values are
    /// rounded to two decimal places at write time.
    pub price: f64,
    /// Fixed identifier of the source store (e.g. `"YesStyle"`).
    pub store: String,
    /// Absolute URL to the product image.
    pub image_url: String,
    /// Classification label assigned per scraping run, not read off the page.
    pub category: String,
    /// Absolute URL to the product detail page.
    pub link: String,
}

impl ScrapedProduct {
    /// Final validity filter applied by the orchestrator before upload:
    /// extraction already rejects these, so a `false` here means a bug
    /// upstream rather than a bad page.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
            && self.price > 0.0
            && !self.image_url.is_empty()
            && !self.link.is_empty()
    }
}

/// Truncate a product name to [`MAX_NAME_LEN`], respecting char boundaries.
#[must_use]
pub fn truncate_name(name: &str) -> String {
    if name.chars().count() <= MAX_NAME_LEN {
        name.to_owned()
    } else {
        name.chars().take(MAX_NAME_LEN).collect()
    }
}
