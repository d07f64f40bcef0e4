//! arXiv cs.AI adapter.
//!
//! arXiv publishes an RSS 2.0 feed of newly announced papers per category.
//! The feed is large and regenerated daily, so only the newest entries are
//! kept and abstracts are truncated for snapshot-sized summaries.

use crate::fetch::{FetchError, NewsSource};
use crate::models::NewsItem;
use crate::sources::feed::{normalize_published, parse_rss};
use crate::sources::get_text;
use crate::utils::{clean_text, truncate_summary};
use async_trait::async_trait;
use tracing::info;

const FEED_URL: &str = "http://export.arxiv.org/rss/cs.AI";
const MAX_ITEMS: usize = 20;
const SUMMARY_CHARS: usize = 250;
const NAME: &str = "arxiv";

pub struct ArxivSource {
    feed_url: String,
}

impl Default for ArxivSource {
    fn default() -> Self {
        Self {
            feed_url: FEED_URL.to_string(),
        }
    }
}

impl ArxivSource {
    /// Point the adapter at a different feed URL. Tests use this with a
    /// local mock server.
    pub fn with_feed_url(feed_url: impl Into<String>) -> Self {
        Self {
            feed_url: feed_url.into(),
        }
    }
}

#[async_trait]
impl NewsSource for ArxivSource {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn fetch(&self) -> Result<Vec<NewsItem>, FetchError> {
        let xml = get_text(&self.feed_url).await?;
        let items = items_from_feed(&xml)?;
        info!(count = items.len(), source = NAME, "Parsed arXiv feed");
        Ok(items)
    }
}

fn items_from_feed(xml: &str) -> Result<Vec<NewsItem>, FetchError> {
    let entries = parse_rss(xml)?;
    Ok(entries
        .into_iter()
        .take(MAX_ITEMS)
        .map(|entry| NewsItem {
            title: clean_text(&entry.title),
            summary: truncate_summary(&entry.summary, SUMMARY_CHARS),
            link: entry.link,
            published: normalize_published(entry.published.as_deref()),
            source: NAME.to_string(),
        })
        .collect())
}
