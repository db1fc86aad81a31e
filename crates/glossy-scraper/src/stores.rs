//! The per-store configuration set.
//!
//! Store-specific selectors and parsers live here as plain data consumed by
//! one generic extraction routine — when a storefront changes its markup,
//! this is the only file that needs to change.

use crate::link::LinkRule;
use crate::price::parse_price;

/// CSS selectors locating the product fields inside a listing page.
#[derive(Debug, Clone)]
pub struct Selectors {
    /// One element per product listing.
    pub container: String,
    pub name: String,
    pub price: String,
    pub image: String,
    /// Anchor within the container; `None` when the container itself is the
    /// anchor (see [`LinkRule::ContainerHref`]).
    pub link: Option<String>,
}

/// Everything the pipeline needs to scrape one storefront.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Fixed identifier stamped on every record (e.g. `"YesStyle"`).
    pub name: String,
    /// First listing page; subsequent pages are derived by [`Self::page_url`].
    pub base_url: String,
    pub selectors: Selectors,
    pub link_rule: LinkRule,
    /// Builds the URL for a 1-based page number. Page 1 maps to the bare
    /// base URL.
    pub page_url: fn(&str, u32) -> String,
    pub price_parser: fn(&str) -> f64,
}

fn query_page_url(base: &str, page: u32) -> String {
    if page <= 1 {
        base.to_owned()
    } else {
        format!("{base}?page={page}")
    }
}

fn current_page_url(base: &str, page: u32) -> String {
    if page <= 1 {
        base.to_owned()
    } else {
        format!("{base}?currentPage={page}")
    }
}

fn yes_style() -> StoreConfig {
    StoreConfig {
        name: "YesStyle".to_owned(),
        base_url: "https://www.yesstyle.com/en/beauty-skin-care/list.html/bcc.15544_bpt.46"
            .to_owned(),
        selectors: Selectors {
            container: r#"a[class*="itemContainer"]"#.to_owned(),
            name: r#"div[class*="itemContent"]"#.to_owned(),
            price: r#"b[class*="itemPrice"]"#.to_owned(),
            image: "img".to_owned(),
            link: None,
        },
        link_rule: LinkRule::ContainerHref,
        page_url: query_page_url,
        price_parser: parse_price,
    }
}

fn chicor() -> StoreConfig {
    StoreConfig {
        name: "Chicor".to_owned(),
        base_url: "https://www.chicor.com/display/category/skincare".to_owned(),
        selectors: Selectors {
            container: r#"li[class*="prd-item"]"#.to_owned(),
            name: ".prd-name".to_owned(),
            price: ".prd-price".to_owned(),
            image: "img".to_owned(),
            link: Some("a".to_owned()),
        },
        // Chicor anchors carry the detail page as a JS call, not a plain href.
        link_rule: LinkRule::JsCall {
            attr: "href".to_owned(),
            function: "fnGoodsView".to_owned(),
            path_template: "/display/goods/view?goodsNo={0}&shopNo={1}".to_owned(),
        },
        page_url: current_page_url,
        price_parser: parse_price,
    }
}

/// The full configuration set, in the order stores are scraped.
#[must_use]
pub fn default_stores() -> Vec<StoreConfig> {
    vec![yes_style(), chicor()]
}

/// Looks up a configured store by name, case-insensitively.
#[must_use]
pub fn find_store(stores: &[StoreConfig], name: &str) -> Option<StoreConfig> {
    stores
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(name))
        .cloned()
}
