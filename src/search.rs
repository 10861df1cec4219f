//! Search execution.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::SearchConfig;
use crate::fetcher::{FetchRequest, PageFetcher, DEFAULT_ENCODING, DEFAULT_TIMEOUT};
use crate::fetcher_http::HttpFetcher;
use crate::proxy::ProxyConfig;
use crate::user_agent::UserAgentPool;
use crate::{GoogleUrl, ResultDocument, Result, SearchError};

/// Runs Google searches: builds the URL, fetches the page, and classifies it.
///
/// One request per call, no retries. A `Search` is not meant to be shared
/// between concurrent callers; give each caller its own.
pub struct Search {
    url: GoogleUrl,
    user_agents: UserAgentPool,
    fetcher: Arc<dyn PageFetcher>,
    timeout: Duration,
    encoding: String,
}

impl Search {
    /// Creates a search over plain HTTP with default settings.
    pub fn new() -> Self {
        Self::with_fetcher(Arc::new(HttpFetcher::new()))
    }

    /// Creates a search that fetches pages through `fetcher`.
    pub fn with_fetcher(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            url: GoogleUrl::new(),
            user_agents: UserAgentPool::new(),
            fetcher,
            timeout: DEFAULT_TIMEOUT,
            encoding: DEFAULT_ENCODING.to_string(),
        }
    }

    /// Creates a search over plain HTTP from a validated configuration.
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        Self::from_config_with_fetcher(config, Arc::new(HttpFetcher::new()))
    }

    /// Creates a search from a configuration and a custom fetcher.
    pub fn from_config_with_fetcher(
        config: &SearchConfig,
        fetcher: Arc<dyn PageFetcher>,
    ) -> Result<Self> {
        config.validate()?;

        let mut search = Self::with_fetcher(fetcher);
        search
            .url
            .set_results_language_filter(config.results_language_filter)
            .set_locale(&config.locale, true)?
            .set_page_size(config.page_size)?
            .set_autocomplete(config.autocomplete)
            .set_personalized(config.personalized);
        if let Some(domain) = &config.domain {
            search.url.set_domain(domain);
        }
        if let Some(agents) = &config.user_agents {
            search.user_agents.set_all(agents);
        }
        search.timeout = Duration::from_secs(config.timeout_seconds);
        search.encoding = config.encoding.clone();
        Ok(search)
    }

    /// Returns the URL builder.
    pub fn url(&self) -> &GoogleUrl {
        &self.url
    }

    /// Returns the URL builder for changing locale, page, location, ...
    pub fn url_mut(&mut self) -> &mut GoogleUrl {
        &mut self.url
    }

    /// Returns the User-Agent pool.
    pub fn user_agents_mut(&mut self) -> &mut UserAgentPool {
        &mut self.user_agents
    }

    /// Replaces the User-Agent pool, e.g. with one using a seeded RNG.
    pub fn set_user_agents(&mut self, pool: UserAgentPool) {
        self.user_agents = pool;
    }

    /// Sets the request timeout.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sets the encoding label assumed for bodies without a charset.
    pub fn set_encoding(&mut self, encoding: impl Into<String>) {
        self.encoding = encoding.into();
    }

    /// Returns the fallback body encoding.
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    /// Searches Google and returns the parsed result page.
    ///
    /// `query` replaces the stored query text when given. Fails with
    /// [`SearchError::EmptySearchRequest`] before any network activity when
    /// there is nothing to search, [`SearchError::Connection`] on transport
    /// failure, and [`SearchError::CaptchaDetected`] when Google serves its
    /// challenge page.
    pub async fn search(
        &mut self,
        query: Option<&str>,
        proxy: Option<&ProxyConfig>,
    ) -> Result<ResultDocument> {
        match query {
            Some(text) => {
                self.url.set_query_text(text);
            }
            None if self.url.query_text().map_or(true, str::is_empty) => {
                return Err(SearchError::EmptySearchRequest);
            }
            None => {}
        }

        let url = self.url.build_url();
        let user_agent = self.user_agents.pick_random().map(str::to_string);
        debug!("Searching {} (user agent: {:?})", url, user_agent);

        let request = FetchRequest {
            url: url.clone(),
            user_agent,
            accept_language: self.url.accept_language().to_string(),
            proxy: proxy.cloned(),
            timeout: self.timeout,
            encoding: self.encoding.clone(),
        };

        let html = self.fetcher.fetch(&request).await?;

        let document = ResultDocument::parse(
            self.url.query_text().unwrap_or_default(),
            url,
            self.url.page_index(),
            self.url.page_size(),
            html,
        );

        if document.is_captcha() {
            warn!("Captcha page returned for {}", document.url());
            return Err(SearchError::CaptchaDetected {
                url: document.url().to_string(),
            });
        }

        Ok(document)
    }
}

impl Default for Search {
    fn default() -> Self {
        Self::new()
    }
}
