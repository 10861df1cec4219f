//! Parsed Google result page.
//!
//! [`ResultDocument`] keeps the decoded HTML together with the search context
//! (query, URL, page) and the captcha verdict computed at parse time. Result
//! extraction re-parses the HTML on demand, which keeps the document `Send`.

use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

use crate::{Result, SearchError, SearchResult};

/// Elements that only appear on Google's anti-bot challenge page.
const CAPTCHA_SELECTORS: &[&str] = &[
    "#captcha",
    "#captcha-form",
    "input[name=\"captcha\"]",
    "form[action*=\"/sorry/\"]",
    "form[action*=\"CaptchaRedirect\"]",
    "#recaptcha",
    "div.g-recaptcha",
    "iframe[src*=\"recaptcha\"]",
    "a[href*=\"/sorry/index\"]",
    "script[src*=\"recaptcha/api\"]",
];

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| SearchError::Parse(format!("Failed to parse selector {}: {:?}", css, e)))
}

fn result_stats_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Thousands separators vary by locale: "1,234", "1.234", "1 234".
    RE.get_or_init(|| {
        Regex::new(r"\d{1,3}(?:[,.\u{a0}\u{202f} ]\d{3})+|\d+").expect("result counter regex")
    })
}

fn text_of(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns true when the page is a captcha / "unusual traffic" page.
///
/// Matches elements and attributes only; page text echoes the query.
pub fn detect_captcha(html: &str) -> bool {
    let document = Html::parse_document(html);
    is_captcha_tree(&document)
}

fn is_captcha_tree(document: &Html) -> bool {
    CAPTCHA_SELECTORS
        .iter()
        .filter_map(|css| Selector::parse(css).ok())
        .any(|sel| document.select(&sel).next().is_some())
}

/// A fetched and parsed Google result page.
#[derive(Debug, Clone, Serialize)]
pub struct ResultDocument {
    query: String,
    url: String,
    page: f64,
    page_size: u32,
    captcha: bool,
    #[serde(skip)]
    html: String,
}

impl ResultDocument {
    /// Parses `html` and evaluates the captcha heuristic.
    pub fn parse(
        query: impl Into<String>,
        url: impl Into<String>,
        page: f64,
        page_size: u32,
        html: impl Into<String>,
    ) -> Self {
        let html = html.into();
        let captcha = detect_captcha(&html);
        Self {
            query: query.into(),
            url: url.into(),
            page,
            page_size,
            captcha,
            html,
        }
    }

    /// Returns true when Google served its challenge page.
    pub fn is_captcha(&self) -> bool {
        self.captcha
    }

    /// The query text that was searched.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The URL that was requested.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Zero-based page index at search time.
    pub fn page(&self) -> f64 {
        self.page
    }

    /// Requested number of results per page.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// The decoded page HTML.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Extracts the organic results.
    ///
    /// Positions are absolute: the first result of page 2 with ten results
    /// per page is position 21.
    pub fn results(&self) -> Result<Vec<SearchResult>> {
        let document = Html::parse_document(&self.html);

        let container_selector = selector("div.g")?;
        let title_selector = selector("h3")?;
        let link_selector = selector("a[href]")?;
        let snippet_selector = selector("div[data-sncf], div.VwiC3b, span.st")?;

        let offset = (self.page * f64::from(self.page_size)).max(0.0) as u64;
        let mut results = Vec::new();

        for element in document.select(&container_selector) {
            // Nested div.g blocks are reached through their parent.
            if element
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|a| a.value().name() == "div" && a.value().classes().any(|c| c == "g"))
            {
                continue;
            }

            let title = match element.select(&title_selector).next() {
                Some(el) => text_of(el),
                None => continue,
            };

            let url = match element
                .select(&link_selector)
                .filter_map(|a| a.value().attr("href"))
                .find_map(resolve_link)
            {
                Some(url) => url,
                None => continue,
            };

            let content = element
                .select(&snippet_selector)
                .next()
                .map(text_of)
                .unwrap_or_default();

            if !title.is_empty() {
                let position = offset + results.len() as u64 + 1;
                results.push(SearchResult::new(position, url, title, content));
            }
        }

        Ok(results)
    }

    /// Parses the "About 1,234 results" counter.
    pub fn total_results(&self) -> Option<u64> {
        let document = Html::parse_document(&self.html);
        let stats = selector("#result-stats").ok()?;
        let text = document.select(&stats).next().map(text_of)?;
        let digits: String = result_stats_regex()
            .find(&text)?
            .as_str()
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        digits.parse().ok()
    }
}

/// Turns a result anchor into an external URL, skipping Google's own links.
fn resolve_link(href: &str) -> Option<String> {
    if let Some(rest) = href.strip_prefix("/url?") {
        return rest
            .split('&')
            .find_map(|kv| kv.strip_prefix("q=").or_else(|| kv.strip_prefix("url=")))
            .and_then(|q| urlencoding::decode(q).ok())
            .map(|q| q.into_owned())
            .filter(|q| q.starts_with("http"));
    }
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(html: &str) -> ResultDocument {
        ResultDocument::parse("rust", "https://www.google.com/search?q=rust", 0.0, 10, html)
    }

    const RESULTS_PAGE: &str = r#"
        <html>
        <body>
            <div id="result-stats">About 1,230,000 results <nobr>(0.42 seconds)</nobr></div>
            <div class="g">
                <a href="https://www.rust-lang.org/">
                    <h3>Rust Programming Language</h3>
                </a>
                <div class="VwiC3b">A language empowering everyone to build reliable software.</div>
            </div>
            <div class="g">
                <a href="/url?q=https://doc.rust-lang.org/book/%3Fx%3D1&amp;sa=U">
                    <h3>The Rust Programming Language Book</h3>
                </a>
                <div data-sncf="1">The official Rust book.</div>
            </div>
            <div class="g">
                <a href="/search?q=related"><h3>Related Search</h3></a>
            </div>
        </body>
        </html>
    "#;

    #[test]
    fn test_parse_keeps_context() {
        let d = ResultDocument::parse(
            "chat",
            "https://www.google.fr/search?q=chat",
            2.0,
            20,
            "<html></html>",
        );
        assert_eq!(d.query(), "chat");
        assert_eq!(d.url(), "https://www.google.fr/search?q=chat");
        assert_eq!(d.page(), 2.0);
        assert_eq!(d.page_size(), 20);
        assert!(!d.is_captcha());
    }

    #[test]
    fn test_results_extraction() {
        let results = doc(RESULTS_PAGE).results().unwrap();
        assert_eq!(results.len(), 2);

        assert_eq!(results[0].position, 1);
        assert_eq!(results[0].title, "Rust Programming Language");
        assert_eq!(results[0].url, "https://www.rust-lang.org/");
        assert_eq!(
            results[0].content,
            "A language empowering everyone to build reliable software."
        );

        assert_eq!(results[1].position, 2);
        assert_eq!(results[1].url, "https://doc.rust-lang.org/book/?x=1");
        assert_eq!(results[1].content, "The official Rust book.");
    }

    #[test]
    fn test_results_absolute_positions() {
        let d = ResultDocument::parse("rust", "u", 2.0, 10, RESULTS_PAGE);
        let results = d.results().unwrap();
        assert_eq!(results[0].position, 21);
        assert_eq!(results[1].position, 22);
    }

    #[test]
    fn test_results_skip_nested_and_missing_title() {
        let html = r#"<html><body>
            <div class="g">
                <div class="g"><a href="https://inner.example/"><h3>Inner</h3></a></div>
            </div>
            <div class="g"><a href="https://example.com">No h3 here</a></div>
        </body></html>"#;
        let results = doc(html).results().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].url, "https://inner.example/");
    }

    #[test]
    fn test_results_empty_page() {
        assert!(doc("<html><body></body></html>").results().unwrap().is_empty());
    }

    #[test]
    fn test_total_results() {
        assert_eq!(doc(RESULTS_PAGE).total_results(), Some(1_230_000));

        let html = r#"<div id="result-stats">Environ 4 560 résultats</div>"#;
        assert_eq!(doc(html).total_results(), Some(4_560));

        let html = r#"<div id="result-stats">7 results</div>"#;
        assert_eq!(doc(html).total_results(), Some(7));

        assert_eq!(doc("<html></html>").total_results(), None);
    }

    #[test]
    fn test_captcha_by_form() {
        let html = r#"<html><body>
            <form id="captcha-form" action="index" method="post">
                <div id="recaptcha" class="g-recaptcha"></div>
            </form>
        </body></html>"#;
        assert!(doc(html).is_captcha());
    }

    #[test]
    fn test_captcha_by_input() {
        let html = r#"<html><body onload="e=document.getElementById('captcha');if(e){e.focus();}">
            <form action="CaptchaRedirect" method="get"><input name="captcha" type="text"></form>
        </body></html>"#;
        assert!(doc(html).is_captcha());
    }

    #[test]
    fn test_captcha_by_sorry_marker() {
        let html = r#"<html><body>
            <a href="/sorry/index?continue=https://www.google.com/search">blocked</a>
        </body></html>"#;
        assert!(detect_captcha(html));
    }

    #[test]
    fn test_captcha_by_recaptcha_script() {
        let html = r#"<html><head>
            <script src="https://www.google.com/recaptcha/api.js" async defer></script>
        </head><body></body></html>"#;
        assert!(detect_captcha(html));
    }

    #[test]
    fn test_echoed_captcha_query_not_captcha() {
        let html = r#"<html><head><title>/sorry/index - Google Search</title></head><body>
            <form action="/search"><input name="q" value="/sorry/index"></form>
            <div class="g">
                <a href="https://example.com/recaptcha"><h3>www.google.com/recaptcha/api docs</h3></a>
                <div class="VwiC3b">Requests to /sorry/index come from www.google.com/recaptcha/api.</div>
            </div>
        </body></html>"#;
        assert!(!detect_captcha(html));
        assert_eq!(doc(html).results().unwrap().len(), 1);
    }

    #[test]
    fn test_captcha_by_recaptcha_iframe() {
        let html = r#"<html><body>
            <iframe src="https://www.google.com/recaptcha/enterprise/anchor"></iframe>
        </body></html>"#;
        assert!(doc(html).is_captcha());
    }

    #[test]
    fn test_normal_page_not_captcha() {
        assert!(!doc(RESULTS_PAGE).is_captcha());
    }

    #[test]
    fn test_resolve_link() {
        assert_eq!(
            resolve_link("https://example.com/a").as_deref(),
            Some("https://example.com/a")
        );
        assert_eq!(
            resolve_link("/url?sa=t&url=https%3A%2F%2Fexample.com%2F&ved=x").as_deref(),
            Some("https://example.com/")
        );
        assert!(resolve_link("/search?q=related").is_none());
        assert!(resolve_link("/url?q=/settings").is_none());
        assert!(resolve_link("#").is_none());
    }

    #[test]
    fn test_document_is_send() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ResultDocument>();
    }
}
