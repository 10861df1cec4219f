//! Example: Basic Google search with the default English locale.

use google_url::{Search, SearchError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing for debug output
    tracing_subscriber::fmt::init();

    let mut search = Search::new();
    search.url_mut().set_query_text("rust programming language");

    println!("Searching: {}", search.url());
    println!();

    let document = match search.search(None, None).await {
        Ok(document) => document,
        Err(SearchError::CaptchaDetected { url }) => {
            eprintln!("Google answered with a captcha page for {}", url);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(total) = document.total_results() {
        println!("About {} results", total);
        println!();
    }

    for result in document.results()?.iter().take(10) {
        println!("{}. {}", result.position, result.title);
        println!("   URL: {}", result.url);
        if !result.content.is_empty() {
            let snippet = if result.content.chars().count() > 100 {
                format!("{}...", result.content.chars().take(100).collect::<String>())
            } else {
                result.content.clone()
            };
            println!("   {}", snippet);
        }
        println!();
    }

    Ok(())
}
