//! Example: Localized search with a location, a custom User-Agent pool and
//! an optional proxy taken from the `SEARCH_PROXY` environment variable.

use google_url::{Location, ProxyConfig, Search, UserAgentPool};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut search = Search::new();

    // French interface and results, served from google.fr
    search
        .url_mut()
        .set_lang("fr")?
        .set_page_size(20)?
        .set_page_index(1)
        .set_location(&Location::canonical("Paris,Ile-de-France,France"));

    let mut agents = UserAgentPool::empty();
    agents.add("Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0");
    search.set_user_agents(agents);

    let proxy = std::env::var("SEARCH_PROXY")
        .ok()
        .map(|p| p.parse::<ProxyConfig>())
        .transpose()?;
    if let Some(proxy) = &proxy {
        println!("Using proxy: {}", proxy);
    }

    let document = search.search(Some("boulangerie"), proxy.as_ref()).await?;

    println!(
        "Page {} ({} per page): {}",
        document.page(),
        document.page_size(),
        document.url()
    );
    println!();

    for result in document.results()? {
        println!("{}. {} ({})", result.position, result.title, result.host().unwrap_or_default());
        println!("   {}", result.url);
    }

    Ok(())
}
