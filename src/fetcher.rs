//! Page fetcher abstraction for retrieving result pages.

use std::time::Duration;

use async_trait::async_trait;

use crate::proxy::ProxyConfig;
use crate::Result;

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Source encoding assumed when the response does not declare one.
pub const DEFAULT_ENCODING: &str = "UTF-8";

/// Everything needed to issue one search GET.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// Fully built search URL.
    pub url: String,
    /// `User-Agent` header; omitted when `None`.
    pub user_agent: Option<String>,
    /// `Accept-Language` header.
    pub accept_language: String,
    /// Proxy to route this request through.
    pub proxy: Option<ProxyConfig>,
    /// Whole-request timeout.
    pub timeout: Duration,
    /// Encoding label used to decode the body when the response carries no
    /// charset.
    pub encoding: String,
}

impl FetchRequest {
    /// Creates a request with default timeout and encoding.
    pub fn new(url: impl Into<String>, accept_language: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            user_agent: None,
            accept_language: accept_language.into(),
            proxy: None,
            timeout: DEFAULT_TIMEOUT,
            encoding: DEFAULT_ENCODING.to_string(),
        }
    }
}

/// Trait for fetching the HTML of a search results page.
///
/// Implementations follow redirects and return the decoded body regardless
/// of the HTTP status: Google serves its captcha page with an error status,
/// and telling it apart is the caller's job.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Performs the request and returns the decoded body.
    async fn fetch(&self, request: &FetchRequest) -> Result<String>;
}
