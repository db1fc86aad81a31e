//! Selector-driven extraction of product records from a fetched listing page.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use glossy_core::{product::truncate_name, ScrapedProduct, MIN_NAME_LEN};

use crate::error::ScraperError;
use crate::link::{self, LinkRule};
use crate::stores::StoreConfig;

/// Per-page diagnostic counts: containers found, rejections per missing
/// field, and accepted records. Diagnostics only — nothing branches on them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionDebug {
    pub found_containers: usize,
    pub no_name: usize,
    pub no_price: usize,
    pub no_image: usize,
    pub no_link: usize,
    pub success: usize,
}

impl std::fmt::Display for ExtractionDebug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "containers={} no_name={} no_price={} no_image={} no_link={} success={}",
            self.found_containers,
            self.no_name,
            self.no_price,
            self.no_image,
            self.no_link,
            self.success
        )
    }
}

/// A store's selectors and link pattern, parsed once per store run instead of
/// once per container.
pub struct CompiledSelectors {
    container: Selector,
    name: Selector,
    price: Selector,
    image: Selector,
    link: Option<Selector>,
    js_call: Option<regex::Regex>,
}

impl CompiledSelectors {
    /// Compiles a store's selector set and (when configured) its JS-call
    /// link pattern.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] or
    /// [`ScraperError::InvalidLinkPattern`] — a configuration bug, surfaced
    /// as a whole-store failure rather than per page.
    pub fn for_store(store: &StoreConfig) -> Result<Self, ScraperError> {
        let parse = |raw: &str| -> Result<Selector, ScraperError> {
            Selector::parse(raw).map_err(|e| ScraperError::InvalidSelector {
                store: store.name.clone(),
                selector: raw.to_owned(),
                reason: e.to_string(),
            })
        };

        let link = match &store.selectors.link {
            Some(raw) => Some(parse(raw)?),
            None => None,
        };

        let js_call = match &store.link_rule {
            LinkRule::JsCall { function, .. } => Some(link::js_call_regex(function).map_err(
                |e| ScraperError::InvalidLinkPattern {
                    store: store.name.clone(),
                    pattern: function.clone(),
                    reason: e.to_string(),
                },
            )?),
            _ => None,
        };

        Ok(Self {
            container: parse(&store.selectors.container)?,
            name: parse(&store.selectors.name)?,
            price: parse(&store.selectors.price)?,
            image: parse(&store.selectors.image)?,
            link,
            js_call,
        })
    }
}

/// Extracts all product records from one listing page.
///
/// Each container is handled independently: a missing or malformed field
/// rejects that record, bumps the matching counter, and extraction moves on
/// to the next container — a single bad entry never aborts the page. The
/// page itself is never mutated; this is a read-only pass over parsed HTML.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidPageUrl`] if `page_url` cannot be parsed —
/// without a valid page URL, relative image/link paths cannot be resolved.
pub fn extract_products(
    html: &str,
    store: &StoreConfig,
    compiled: &CompiledSelectors,
    page_url: &str,
    category: &str,
) -> Result<(Vec<ScrapedProduct>, ExtractionDebug), ScraperError> {
    let page = Url::parse(page_url).map_err(|e| ScraperError::InvalidPageUrl {
        url: page_url.to_owned(),
        reason: e.to_string(),
    })?;

    let document = Html::parse_document(html);
    let mut records = Vec::new();
    let mut debug = ExtractionDebug::default();

    for container in document.select(&compiled.container) {
        debug.found_containers += 1;

        let Some(name) = extract_name(container, &compiled.name) else {
            debug.no_name += 1;
            continue;
        };

        let price = extract_price(container, &compiled.price, store.price_parser);
        if price <= 0.0 {
            debug.no_price += 1;
            continue;
        }

        let Some(image_url) = extract_image(container, &compiled.image, &page) else {
            debug.no_image += 1;
            continue;
        };

        let Some(link) = extract_link(container, compiled, store, &page) else {
            debug.no_link += 1;
            continue;
        };

        records.push(ScrapedProduct {
            name,
            price,
            store: store.name.clone(),
            image_url,
            category: category.to_owned(),
            link,
        });
        debug.success += 1;
    }

    Ok((records, debug))
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_owned()
}

fn extract_name(container: ElementRef<'_>, selector: &Selector) -> Option<String> {
    let el = container.select(selector).next()?;
    let name = element_text(el);
    if name.chars().count() < MIN_NAME_LEN {
        return None;
    }
    Some(truncate_name(&name))
}

fn extract_price(
    container: ElementRef<'_>,
    selector: &Selector,
    price_parser: fn(&str) -> f64,
) -> f64 {
    container
        .select(selector)
        .next()
        .map(|el| price_parser(&element_text(el)))
        .unwrap_or(0.0)
}

/// Prefers `src`, falling back to the lazy-load attribute `data-src` for
/// stores that defer image loading until scroll.
fn extract_image(container: ElementRef<'_>, selector: &Selector, page: &Url) -> Option<String> {
    let el = container.select(selector).next()?;
    let raw = el
        .value()
        .attr("src")
        .filter(|s| !s.trim().is_empty())
        .or_else(|| el.value().attr("data-src").filter(|s| !s.trim().is_empty()))?;
    link::resolve_href(raw, page)
}

fn extract_link(
    container: ElementRef<'_>,
    compiled: &CompiledSelectors,
    store: &StoreConfig,
    page: &Url,
) -> Option<String> {
    match &store.link_rule {
        LinkRule::ContainerHref => {
            let raw = container.value().attr("href")?;
            link::resolve_href(raw, page)
        }
        LinkRule::ChildHref => {
            let el = container.select(compiled.link.as_ref()?).next()?;
            let raw = el.value().attr("href")?;
            link::resolve_href(raw, page)
        }
        LinkRule::JsCall {
            attr,
            path_template,
            ..
        } => {
            // The anchor is the configured child when present, otherwise the
            // container itself.
            let raw = match compiled.link.as_ref() {
                Some(sel) => container.select(sel).next()?.value().attr(attr)?,
                None => container.value().attr(attr)?,
            };
            link::reconstruct_js_link(raw, compiled.js_call.as_ref()?, path_template, page)
        }
    }
}
