//! Error types for the search library.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while building or running a search.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The locale code has no preset in the locale table.
    #[error("Unknown lang {0}")]
    UnknownLocale(String),

    /// `search` was called without query text and none was set before.
    #[error("Nothing to search")]
    EmptySearchRequest,

    /// Transport-level failure (connect, TLS, timeout, redirect loop).
    #[error("Connection error: {0}")]
    Connection(#[from] reqwest::Error),

    /// Google answered with its anti-bot challenge page instead of results.
    #[error("Google returned a captcha page for {url}")]
    CaptchaDetected {
        /// The search URL that was blocked.
        url: String,
    },

    /// A setter received a value outside its accepted range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The proxy descriptor could not be turned into a client proxy.
    #[error("Invalid proxy: {0}")]
    Proxy(String),

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Invalid search configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// URL parsing error.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl SearchError {
    /// Returns true when the remote service blocked the client with a captcha.
    pub fn is_captcha(&self) -> bool {
        matches!(self, Self::CaptchaDetected { .. })
    }
}
