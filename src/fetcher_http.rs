//! HTTP-based page fetcher using reqwest.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::redirect::Policy;
use reqwest::Client;
use tracing::{debug, warn};

use crate::fetcher::{FetchRequest, PageFetcher};
use crate::{Result, SearchError};

const MAX_REDIRECTS: usize = 10;

/// A page fetcher that issues plain HTTP GETs via reqwest.
///
/// reqwest binds proxies to the client, so a client is built per request.
#[derive(Debug, Default, Clone)]
pub struct HttpFetcher;

impl HttpFetcher {
    /// Creates a new `HttpFetcher`.
    pub fn new() -> Self {
        Self
    }

    fn client_for(&self, request: &FetchRequest) -> Result<Client> {
        let mut builder = Client::builder()
            .timeout(request.timeout)
            .redirect(Policy::limited(MAX_REDIRECTS));

        if let Some(proxy) = &request.proxy {
            debug!("Using proxy: {}", proxy);
            builder = builder.proxy(proxy.to_reqwest()?);
        }

        Ok(builder.build()?)
    }

    fn headers_for(request: &FetchRequest) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(ua) = &request.user_agent {
            let value = HeaderValue::from_str(ua)
                .map_err(|e| SearchError::InvalidParameter(format!("user agent: {}", e)))?;
            headers.insert(USER_AGENT, value);
        }
        let value = HeaderValue::from_str(&request.accept_language)
            .map_err(|e| SearchError::InvalidParameter(format!("accept language: {}", e)))?;
        headers.insert(ACCEPT_LANGUAGE, value);
        Ok(headers)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<String> {
        let client = self.client_for(request)?;
        let headers = Self::headers_for(request)?;

        debug!("GET {}", request.url);
        let response = client.get(&request.url).headers(headers).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} answered with status {}", request.url, status);
        }

        let html = response.text_with_charset(&request.encoding).await?;
        Ok(html)
    }
}
