//! Google search URL builder.
//!
//! [`GoogleUrl`] holds the query parameters, the country domain and the
//! Accept-Language value of the active locale, and renders them into a
//! search URL on every read.

use std::fmt;

use tracing::debug;

use crate::locale::{self, LocalePreset};
use crate::location::Location;
use crate::query::{SearchQuery, DEFAULT_PAGE_SIZE};
use crate::{Result, SearchError};

/// Largest page size Google honours.
pub const MAX_PAGE_SIZE: u32 = 100;

const DEFAULT_DOMAIN: &str = "com";

/// Builder for Google search URLs.
///
/// Setters mutate in place and return `&mut Self` so calls can be chained:
///
/// ```
/// use google_url::GoogleUrl;
///
/// let mut url = GoogleUrl::new();
/// url.set_lang("fr")?.set_query_text("chat");
/// assert!(url.build_url().starts_with("https://www.google.fr/search?q=chat"));
/// # Ok::<(), google_url::SearchError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GoogleUrl {
    query: SearchQuery,
    domain: String,
    accept_language: String,
    results_language_filter: bool,
}

impl GoogleUrl {
    /// Creates a builder with English defaults on `google.com`.
    pub fn new() -> Self {
        Self {
            query: SearchQuery::default(),
            domain: DEFAULT_DOMAIN.to_string(),
            accept_language: LocalePreset::english().accept_language.to_string(),
            results_language_filter: true,
        }
    }

    /// Restores every parameter to its default.
    pub fn reset(&mut self) -> &mut Self {
        *self = Self::new();
        self
    }

    /// Returns whether `iso` has a locale preset.
    pub fn is_locale_available(iso: &str) -> bool {
        locale::is_available(iso)
    }

    /// Applies the locale preset for `iso`.
    ///
    /// Sets `hl`, `lr` (cleared instead when the results-language filter is
    /// off) and the Accept-Language value. The domain is switched to the
    /// preset's domain when `also_set_domain` is true. An unknown code leaves
    /// the builder untouched.
    pub fn set_locale(&mut self, iso: &str, also_set_domain: bool) -> Result<&mut Self> {
        let preset = LocalePreset::lookup(iso)?;

        self.query.hl = Some(preset.interface_language.to_string());
        self.query.lr = self
            .results_language_filter
            .then(|| preset.results_language.to_string());
        self.accept_language = preset.accept_language.to_string();

        if also_set_domain {
            self.set_domain(preset.domain);
        }

        debug!("Locale set to {} (domain {})", preset.iso, self.domain);
        Ok(self)
    }

    /// Shorthand for `set_locale(iso, true)`.
    pub fn set_lang(&mut self, iso: &str) -> Result<&mut Self> {
        self.set_locale(iso, true)
    }

    /// Enables or disables the `lr` results-language parameter.
    ///
    /// Disabling clears `lr` right away. Enabling does not bring it back
    /// until the next [`set_locale`](Self::set_locale).
    pub fn set_results_language_filter(&mut self, enabled: bool) -> &mut Self {
        self.results_language_filter = enabled;
        if !enabled {
            self.query.lr = None;
        }
        self
    }

    /// Returns whether the results-language filter is enabled.
    pub fn results_language_filter(&self) -> bool {
        self.results_language_filter
    }

    /// Sets the Google domain suffix (`"com"`, `"fr"`, `"co.uk"`).
    ///
    /// Surrounding dots and whitespace are stripped; an empty result is kept
    /// as-is.
    pub fn set_domain(&mut self, domain: &str) -> &mut Self {
        self.domain = domain
            .trim_matches(|c: char| c == '.' || c.is_whitespace())
            .to_string();
        self
    }

    /// Returns the domain suffix.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Returns the Accept-Language value of the active locale.
    pub fn accept_language(&self) -> &str {
        &self.accept_language
    }

    /// Sets the text to search for. Does not run a search.
    pub fn set_query_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.query.q = Some(text.into());
        self
    }

    /// Returns the query text, if any.
    pub fn query_text(&self) -> Option<&str> {
        self.query.q.as_deref()
    }

    /// Selects the zero-based result page: `start = n * page_size`.
    pub fn set_page_index(&mut self, n: u32) -> &mut Self {
        self.query.start = u64::from(self.query.num) * u64::from(n);
        self
    }

    /// Returns `start / page_size`.
    ///
    /// This is plain division, so the value is only guaranteed integral when
    /// the offset was produced by [`set_page_index`](Self::set_page_index)
    /// under the current page size.
    pub fn page_index(&self) -> f64 {
        self.query.start as f64 / f64::from(self.query.num)
    }

    /// Changes the number of results per page while keeping the page index.
    ///
    /// `n` must be within `1..=100`.
    pub fn set_page_size(&mut self, n: u32) -> Result<&mut Self> {
        if n == 0 || n > MAX_PAGE_SIZE {
            return Err(SearchError::InvalidParameter(format!(
                "page size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, n
            )));
        }

        let page = self.page_index();
        self.query.num = n;
        // Offset is exactly `n * page`; rounding only absorbs f64 error.
        self.query.start = (f64::from(n) * page).round() as u64;
        Ok(self)
    }

    /// Returns the number of results per page.
    pub fn page_size(&self) -> u32 {
        self.query.num
    }

    /// Returns the result offset.
    pub fn offset(&self) -> u64 {
        self.query.start
    }

    /// Turns search suggestions (`complete`) on or off.
    pub fn set_autocomplete(&mut self, enabled: bool) -> &mut Self {
        self.query.complete = enabled;
        self
    }

    /// Turns personalized results (`pws`) on or off.
    pub fn set_personalized(&mut self, enabled: bool) -> &mut Self {
        self.query.pws = enabled;
        self
    }

    /// Localizes results to `location`.
    ///
    /// A location that cannot be encoded is ignored and the previous `uule`
    /// is kept.
    pub fn set_location(&mut self, location: &Location) -> &mut Self {
        match location.uule() {
            Ok(uule) => self.query.uule = Some(uule),
            Err(e) => debug!("Ignoring location {:?}: {}", location, e),
        }
        self
    }

    /// Sets a raw `uule` token.
    pub fn set_uule(&mut self, token: impl Into<String>) -> &mut Self {
        self.query.uule = Some(token.into());
        self
    }

    /// Removes the location.
    pub fn clear_location(&mut self) -> &mut Self {
        self.query.uule = None;
        self
    }

    /// Returns the current query parameters.
    pub fn params(&self) -> &SearchQuery {
        &self.query
    }

    /// Renders the full search URL.
    pub fn build_url(&self) -> String {
        format!(
            "https://www.google.{}/search?{}",
            self.domain,
            self.query.to_query_string()
        )
    }
}

impl Default for GoogleUrl {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GoogleUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build_url())
    }
}
