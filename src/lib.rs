//! # google-url
//!
//! Builds Google search URLs, fetches the result page, and tells real
//! results apart from Google's anti-bot challenge page.
//!
//! - Typed query parameters (`q`, `start`, `num`, `hl`, `lr`, `uule`, ...)
//! - Locale presets bundling interface language, results language, country
//!   domain and Accept-Language
//! - Random User-Agent selection with an injectable random source
//! - Per-request proxies
//! - Captcha detection and organic result extraction
//!
//! ## Example
//!
//! ```rust,no_run
//! use google_url::{Search, SearchError};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut search = Search::new();
//!     search.url_mut().set_lang("fr")?;
//!
//!     match search.search(Some("chat"), None).await {
//!         Ok(doc) => {
//!             for result in doc.results()? {
//!                 println!("{}. {}: {}", result.position, result.title, result.url);
//!             }
//!         }
//!         Err(SearchError::CaptchaDetected { url }) => eprintln!("blocked on {}", url),
//!         Err(e) => return Err(e.into()),
//!     }
//!     Ok(())
//! }
//! ```

mod document;
mod error;
mod google_url;
mod query;
mod result;
mod search;

pub mod config;
pub mod fetcher;
pub mod fetcher_http;
pub mod locale;
pub mod location;
pub mod proxy;
pub mod user_agent;

pub use config::SearchConfig;
pub use document::{detect_captcha, ResultDocument};
pub use error::{Result, SearchError};
pub use fetcher::{FetchRequest, PageFetcher};
pub use google_url::{GoogleUrl, MAX_PAGE_SIZE};
pub use locale::LocalePreset;
pub use location::Location;
pub use proxy::{ProxyAuth, ProxyConfig, ProxyProtocol};
pub use query::{SearchQuery, DEFAULT_PAGE_SIZE};
pub use result::SearchResult;
pub use search::Search;
pub use user_agent::UserAgentPool;
