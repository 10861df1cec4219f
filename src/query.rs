//! Search query parameters.

use serde::{Deserialize, Serialize};

use crate::locale::LocalePreset;

/// Default number of results per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// The query-string parameters sent to Google.
///
/// Optional fields are left out of the query string when `None`; they are
/// never rendered as an empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text query (`q`).
    pub q: Option<String>,
    /// Offset of the first result (`start`).
    pub start: u64,
    /// Results per page (`num`).
    pub num: u32,
    /// Search suggestions (`complete`).
    pub complete: bool,
    /// Personalized search (`pws`).
    pub pws: bool,
    /// Interface language (`hl`).
    pub hl: Option<String>,
    /// Results language filter (`lr`), e.g. `lang_fr`.
    pub lr: Option<String>,
    /// Encoded location (`uule`).
    pub uule: Option<String>,
}

impl Default for SearchQuery {
    fn default() -> Self {
        let en = LocalePreset::english();
        Self {
            q: None,
            start: 0,
            num: DEFAULT_PAGE_SIZE,
            complete: false,
            pws: false,
            hl: Some(en.interface_language.to_string()),
            lr: Some(en.results_language.to_string()),
            uule: None,
        }
    }
}

impl SearchQuery {
    /// Creates the default parameter set with the given query text.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            q: Some(query.into()),
            ..Default::default()
        }
    }

    /// Sets the results per page.
    pub fn with_num(mut self, num: u32) -> Self {
        self.num = num;
        self
    }

    /// Sets the result offset.
    pub fn with_start(mut self, start: u64) -> Self {
        self.start = start;
        self
    }

    /// Returns the present parameters in their fixed order.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(8);
        if let Some(q) = &self.q {
            pairs.push(("q", q.clone()));
        }
        pairs.push(("start", self.start.to_string()));
        pairs.push(("num", self.num.to_string()));
        pairs.push(("complete", flag(self.complete).to_string()));
        pairs.push(("pws", flag(self.pws).to_string()));
        if let Some(hl) = &self.hl {
            pairs.push(("hl", hl.clone()));
        }
        if let Some(lr) = &self.lr {
            pairs.push(("lr", lr.clone()));
        }
        if let Some(uule) = &self.uule {
            pairs.push(("uule", uule.clone()));
        }
        pairs
    }

    /// Serializes the parameters as `application/x-www-form-urlencoded`.
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs())
            .finish()
    }
}

fn flag(value: bool) -> u8 {
    u8::from(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_default() {
        let query = SearchQuery::default();
        assert!(query.q.is_none());
        assert_eq!(query.start, 0);
        assert_eq!(query.num, 10);
        assert!(!query.complete);
        assert!(!query.pws);
        assert_eq!(query.hl.as_deref(), Some("en"));
        assert_eq!(query.lr.as_deref(), Some("lang_en"));
        assert!(query.uule.is_none());
    }

    #[test]
    fn test_search_query_new() {
        let query = SearchQuery::new("test query");
        assert_eq!(query.q.as_deref(), Some("test query"));
    }

    #[test]
    fn test_query_string_default_order() {
        let query = SearchQuery::new("rust");
        assert_eq!(
            query.to_query_string(),
            "q=rust&start=0&num=10&complete=0&pws=0&hl=en&lr=lang_en"
        );
    }

    #[test]
    fn test_query_string_omits_absent() {
        let query = SearchQuery {
            hl: None,
            lr: None,
            ..Default::default()
        };
        let qs = query.to_query_string();
        assert_eq!(qs, "start=0&num=10&complete=0&pws=0");
        assert!(!qs.contains("q="));
        assert!(!qs.contains("lr="));
    }

    #[test]
    fn test_query_string_encoding() {
        let query = SearchQuery::new("rust & café");
        assert!(query.to_query_string().starts_with("q=rust+%26+caf%C3%A9&"));
    }

    #[test]
    fn test_query_string_flags_and_uule() {
        let mut query = SearchQuery::new("a").with_num(20).with_start(40);
        query.complete = true;
        query.pws = true;
        query.uule = Some("w+CAIQICIFUGFyaXM".to_string());
        assert_eq!(
            query.to_query_string(),
            "q=a&start=40&num=20&complete=1&pws=1&hl=en&lr=lang_en&uule=w%2BCAIQICIFUGFyaXM"
        );
    }

    #[test]
    fn test_search_query_serialization() {
        let query = SearchQuery::new("test");
        let json = serde_json::to_string(&query).unwrap();
        assert!(json.contains("\"q\":\"test\""));
        assert!(json.contains("\"num\":10"));
    }
}
