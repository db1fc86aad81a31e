use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("page not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid page URL \"{url}\": {reason}")]
    InvalidPageUrl { url: String, reason: String },

    #[error("invalid selector \"{selector}\" for store {store}: {reason}")]
    InvalidSelector {
        store: String,
        selector: String,
        reason: String,
    },

    #[error("invalid link pattern \"{pattern}\" for store {store}: {reason}")]
    InvalidLinkPattern {
        store: String,
        pattern: String,
        reason: String,
    },
}
