//! HTTP client for fetching storefront listing pages.

use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;

/// One isolated browsing session against the scraped storefronts.
///
/// A fresh `PageClient` is built per store by the orchestrator and dropped
/// when that store's run ends, so cookies and connection state never leak
/// across stores. Maps 404 and other non-2xx responses to typed errors.
/// There is deliberately no retry here: a failed page is logged and skipped
/// by the pagination driver.
pub struct PageClient {
    client: Client,
}

impl PageClient {
    /// Creates a `PageClient` with configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches one listing page and returns the response body as HTML text.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::NotFound`] — HTTP 404.
    /// - [`ScraperError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`ScraperError::Http`] — network failure, timeout, or TLS failure.
    pub async fn fetch_page(&self, url: &str) -> Result<String, ScraperError> {
        let referer = page_origin(url);

        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(reqwest::header::REFERER, &referer)
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScraperError::NotFound {
                url: url.to_owned(),
            });
        }

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.text().await?;
        Ok(body)
    }
}

/// Extracts the `scheme://host[:port]` origin of a page URL, falling back to
/// the URL itself when it does not parse. Used as the `Referer` value.
#[must_use]
pub fn page_origin(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(parsed) => parsed.origin().ascii_serialization(),
        Err(_) => url.to_owned(),
    }
}
