//! Per-store product-link resolution.
//!
//! Most stores expose a plain `href` somewhere in the product container, but
//! some encode the detail page as a JavaScript call in an `href`-like
//! attribute (`fnGoodsView('100123','S001')`). Each shape is isolated behind
//! a [`LinkRule`] so one store's markup change cannot affect another, and the
//! fragile call-expression parsing can be unit-tested against fixed snippets.

use regex::Regex;
use url::Url;

/// How a store's product link is located and rebuilt.
#[derive(Debug, Clone)]
pub enum LinkRule {
    /// The container element is itself the product anchor; take its `href`.
    ContainerHref,
    /// A child anchor selected by [`Selectors::link`](crate::stores::Selectors)
    /// carries a plain `href`.
    ChildHref,
    /// The anchor's attribute embeds `function('arg1','arg2')`; both
    /// arguments are parsed out and interpolated into `path_template`
    /// (placeholders `{0}` and `{1}`), resolved against the page origin.
    JsCall {
        attr: String,
        function: String,
        path_template: String,
    },
}

/// Builds the capture regex for a [`LinkRule::JsCall`] function name.
///
/// Matches `function('arg1','arg2')` with optional `javascript:` prefix and
/// whitespace around the arguments.
pub(crate) fn js_call_regex(function: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"(?:javascript:)?\s*{}\(\s*'([^']*)'\s*,\s*'([^']*)'\s*\)",
        regex::escape(function)
    ))
}

/// Rebuilds an absolute detail-page URL from a JS-call attribute value.
///
/// Returns `None` when the call expression does not match — the extractor
/// counts that container as `no_link` and moves on.
pub(crate) fn reconstruct_js_link(
    raw: &str,
    pattern: &Regex,
    path_template: &str,
    page_url: &Url,
) -> Option<String> {
    let caps = pattern.captures(raw)?;
    if caps[1].is_empty() {
        return None;
    }
    let path = path_template.replace("{0}", &caps[1]).replace("{1}", &caps[2]);
    page_url.join(&path).ok().map(Into::into)
}

/// Resolves a plain `href` against the page URL, absolutizing relative paths.
pub(crate) fn resolve_href(raw: &str, page_url: &Url) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || raw.starts_with("javascript:") || raw == "#" {
        return None;
    }
    page_url.join(raw).ok().map(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Url {
        Url::parse("https://www.chicor.com/display/category/skincare?currentPage=2")
            .expect("fixture URL")
    }

    #[test]
    fn js_call_link_is_reconstructed_against_origin() {
        let re = js_call_regex("fnGoodsView").unwrap();
        let link = reconstruct_js_link(
            "javascript:fnGoodsView('100123','S001')",
            &re,
            "/display/goods/view?goodsNo={0}&shopNo={1}",
            &page(),
        );
        assert_eq!(
            link.as_deref(),
            Some("https://www.chicor.com/display/goods/view?goodsNo=100123&shopNo=S001")
        );
    }

    #[test]
    fn js_call_without_javascript_prefix_matches() {
        let re = js_call_regex("fnGoodsView").unwrap();
        let link = reconstruct_js_link(
            "fnGoodsView('42', 'S9')",
            &re,
            "/display/goods/view?goodsNo={0}&shopNo={1}",
            &page(),
        );
        assert_eq!(
            link.as_deref(),
            Some("https://www.chicor.com/display/goods/view?goodsNo=42&shopNo=S9")
        );
    }

    #[test]
    fn js_call_with_wrong_function_returns_none() {
        let re = js_call_regex("fnGoodsView").unwrap();
        assert!(reconstruct_js_link(
            "javascript:fnBrandView('100123','S001')",
            &re,
            "/display/goods/view?goodsNo={0}&shopNo={1}",
            &page(),
        )
        .is_none());
    }

    #[test]
    fn js_call_with_empty_first_arg_returns_none() {
        let re = js_call_regex("fnGoodsView").unwrap();
        assert!(reconstruct_js_link(
            "javascript:fnGoodsView('','S001')",
            &re,
            "/display/goods/view?goodsNo={0}&shopNo={1}",
            &page(),
        )
        .is_none());
    }

    #[test]
    fn malformed_call_expression_returns_none() {
        let re = js_call_regex("fnGoodsView").unwrap();
        assert!(reconstruct_js_link(
            "javascript:fnGoodsView(100123)",
            &re,
            "/display/goods/view?goodsNo={0}&shopNo={1}",
            &page(),
        )
        .is_none());
    }

    #[test]
    fn relative_href_is_absolutized() {
        let link = resolve_href("/en/info/prod/1234.html", &page());
        assert_eq!(
            link.as_deref(),
            Some("https://www.chicor.com/en/info/prod/1234.html")
        );
    }

    #[test]
    fn absolute_href_passes_through() {
        let link = resolve_href("https://other.example.com/p/9", &page());
        assert_eq!(link.as_deref(), Some("https://other.example.com/p/9"));
    }

    #[test]
    fn empty_href_returns_none() {
        assert!(resolve_href("", &page()).is_none());
        assert!(resolve_href("   ", &page()).is_none());
    }

    #[test]
    fn bare_javascript_href_returns_none() {
        assert!(resolve_href("javascript:void(0)", &page()).is_none());
        assert!(resolve_href("#", &page()).is_none());
    }
}
