//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] gathers everything a [`Search`](crate::Search) needs at
//! construction time. It deserializes from JSON with every field optional, so
//! a config file only lists what it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::google_url::MAX_PAGE_SIZE;
use crate::locale::LocalePreset;
use crate::query::DEFAULT_PAGE_SIZE;
use crate::{Result, SearchError};

/// Configuration for a [`Search`](crate::Search).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Locale preset code (`"en"`, `"fr"`, ...).
    pub locale: String,
    /// Domain override. `None` uses the locale preset's domain.
    pub domain: Option<String>,
    /// Whether to send the `lr` results-language parameter.
    pub results_language_filter: bool,
    /// Results per page, 1 to 100.
    pub page_size: u32,
    /// HTTP request timeout in seconds.
    pub timeout_seconds: u64,
    /// Encoding label assumed for response bodies without a charset.
    pub encoding: String,
    /// Custom User-Agent list. `None` uses the built-in list.
    pub user_agents: Option<Vec<String>>,
    /// Request search suggestions (`complete=1`).
    pub autocomplete: bool,
    /// Request personalized results (`pws=1`).
    pub personalized: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            domain: None,
            results_language_filter: true,
            page_size: DEFAULT_PAGE_SIZE,
            timeout_seconds: 30,
            encoding: "UTF-8".to_string(),
            user_agents: None,
            autocomplete: false,
            personalized: false,
        }
    }
}

impl SearchConfig {
    /// Parses a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SearchError::Config(e.to_string()))
    }

    /// Reads and parses a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| SearchError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Validates this configuration, returning an error if any field is invalid.
    pub fn validate(&self) -> Result<()> {
        LocalePreset::lookup(&self.locale)
            .map_err(|_| SearchError::Config(format!("unknown locale '{}'", self.locale)))?;
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(SearchError::Config(format!(
                "page_size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.encoding.trim().is_empty() {
            return Err(SearchError::Config("encoding must not be empty".into()));
        }
        if let Some(agents) = &self.user_agents {
            if agents.iter().all(|a| a.trim().is_empty()) {
                return Err(SearchError::Config(
                    "user_agents must contain at least one non-blank entry".into(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = SearchConfig::default();
        assert_eq!(config.locale, "en");
        assert!(config.domain.is_none());
        assert!(config.results_language_filter);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.encoding, "UTF-8");
        assert!(config.user_agents.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config = SearchConfig::from_json(r#"{"locale":"fr","page_size":50}"#).unwrap();
        assert_eq!(config.locale, "fr");
        assert_eq!(config.page_size, 50);
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn malformed_json_rejected() {
        let err = SearchConfig::from_json("{locale:").unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }

    #[test]
    fn missing_file_rejected() {
        let err = SearchConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("here.json"));
    }

    #[test]
    fn unknown_locale_rejected() {
        let config = SearchConfig {
            locale: "xx".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("locale"));
    }

    #[test]
    fn page_size_out_of_range_rejected() {
        for page_size in [0, 101] {
            let config = SearchConfig {
                page_size,
                ..Default::default()
            };
            assert!(config.validate().unwrap_err().to_string().contains("page_size"));
        }
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = SearchConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("timeout_seconds"));
    }

    #[test]
    fn blank_encoding_rejected() {
        let config = SearchConfig {
            encoding: "  ".into(),
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("encoding"));
    }

    #[test]
    fn blank_user_agents_rejected() {
        let config = SearchConfig {
            user_agents: Some(vec![" ".into(), String::new()]),
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("user_agents"));
    }
}
