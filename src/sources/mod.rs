//! Source adapters for fetching AI news from various outlets.
//!
//! Each submodule wraps one outlet behind the [`NewsSource`] trait, fetching
//! a feed or page, extracting items, and normalizing them into
//! [`crate::models::NewsItem`] records. Adapters tolerate per-entry problems
//! (a card with no headline, an entry with no link) by skipping the entry;
//! only transport and document-level decode failures surface as errors, and
//! those are handled by the retry wrapper upstream.
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | arXiv cs.AI | [`arxiv`] | RSS feed | Newest papers, summaries truncated |
//! | Hugging Face | [`huggingface`] | HTML scraping | Blog post cards |
//! | Product Hunt | [`producthunt`] | HTML scraping | AI topic page, keyword-filtered |
//! | Reddit | [`reddit`] | Atom feeds | r/MachineLearning and r/ClaudeAI |
//! | AI News | [`ainews`] | HTML scraping | Front-page article cards |
//! | Crescendo | [`crescendo`] | HTML scraping | Curated news roundup page |
//!
//! # Common Patterns
//!
//! Adapters share one lazily-built HTTP client (custom user agent, 30 s
//! timeout) and expose a `with_*_url` constructor so tests can point them at
//! a local mock server. Parsing lives in plain functions over the fetched
//! text, testable without any network.

use crate::fetch::FetchError;
use once_cell::sync::Lazy;
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub mod ainews;
pub mod arxiv;
pub mod crescendo;
pub mod feed;
pub mod huggingface;
pub mod producthunt;
pub mod reddit;

use crate::fetch::NewsSource;

static HTTP: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(concat!("ai_news_wire/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .build()
        .expect("Failed to create HTTP client")
});

/// GET `url` and return the response body, mapping transport problems and
/// non-success statuses into [`FetchError`].
pub(crate) async fn get_text(url: &str) -> Result<String, FetchError> {
    let response = HTTP.get(url).send().await?.error_for_status()?;
    Ok(response.text().await?)
}

/// Resolve a possibly-relative `href` against the page it came from.
pub(crate) fn resolve_link(base: &Url, href: &str) -> Option<String> {
    base.join(href).ok().map(|resolved| resolved.to_string())
}

/// The production source set, in the order their sections appear in the
/// snapshot.
pub fn default_sources() -> Vec<Box<dyn NewsSource>> {
    vec![
        Box::new(arxiv::ArxivSource::default()),
        Box::new(huggingface::HuggingFaceSource::default()),
        Box::new(producthunt::ProductHuntSource::default()),
        Box::new(reddit::RedditSource::default()),
        Box::new(ainews::AiNewsSource::default()),
        Box::new(crescendo::CrescendoSource::default()),
    ]
}
