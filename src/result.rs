//! Organic results extracted from a result page.

use serde::{Deserialize, Serialize};

/// A single organic search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Absolute rank across pages, starting at 1.
    pub position: u64,
    /// Result URL.
    pub url: String,
    /// Result title.
    pub title: String,
    /// Result description/snippet.
    pub content: String,
}

impl SearchResult {
    /// Creates a new search result.
    pub fn new(
        position: u64,
        url: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            position,
            url: url.into(),
            title: title.into(),
            content: content.into(),
        }
    }

    /// Returns the host part of the URL, if it parses.
    pub fn host(&self) -> Option<String> {
        url::Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
    }
}
