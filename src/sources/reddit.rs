//! Reddit adapter over subreddit Atom feeds.
//!
//! Reddit serves an Atom feed per subreddit at `/r/<name>/.rss`. Two
//! AI-focused subreddits are polled; each contributes up to ten posts, and
//! titles are prefixed with the subreddit so readers can tell threads apart
//! once items are merged under the single `reddit` key. A feed that fails to
//! download or decode is logged and skipped, so one broken subreddit never
//! empties the other.

use crate::fetch::{FetchError, NewsSource};
use crate::models::NewsItem;
use crate::sources::feed::{normalize_published, parse_atom};
use crate::sources::get_text;
use crate::utils::{clean_text, strip_html, truncate_summary};
use async_trait::async_trait;
use tracing::{error, info, warn};

const SUBREDDITS: &[(&str, &str)] = &[
    ("machinelearning", "https://www.reddit.com/r/MachineLearning/.rss"),
    ("claudeai", "https://www.reddit.com/r/ClaudeAI/.rss"),
];
const MAX_PER_SUBREDDIT: usize = 10;
const SUMMARY_CHARS: usize = 250;
const NAME: &str = "reddit";

pub struct RedditSource {
    feeds: Vec<(String, String)>,
}

impl Default for RedditSource {
    fn default() -> Self {
        Self {
            feeds: SUBREDDITS
                .iter()
                .map(|(sub, url)| (sub.to_string(), url.to_string()))
                .collect(),
        }
    }
}

impl RedditSource {
    /// Replace the polled feeds with `(subreddit, url)` pairs.
    pub fn with_feeds(feeds: Vec<(String, String)>) -> Self {
        Self { feeds }
    }
}

#[async_trait]
impl NewsSource for RedditSource {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn fetch(&self) -> Result<Vec<NewsItem>, FetchError> {
        let mut all_items = Vec::new();
        for (subreddit, url) in &self.feeds {
            let xml = match get_text(url).await {
                Ok(xml) => xml,
                Err(e) => {
                    error!(subreddit = %subreddit, error = %e, "Failed to fetch subreddit feed");
                    continue;
                }
            };
            match items_from_feed(subreddit, &xml) {
                Ok(items) => {
                    info!(subreddit = %subreddit, count = items.len(), "Parsed subreddit feed");
                    all_items.extend(items);
                }
                Err(e) => {
                    warn!(subreddit = %subreddit, error = %e, "Failed to decode subreddit feed");
                }
            }
        }
        info!(count = all_items.len(), source = NAME, "Parsed Reddit feeds");
        Ok(all_items)
    }
}

fn items_from_feed(subreddit: &str, xml: &str) -> Result<Vec<NewsItem>, FetchError> {
    let entries = parse_atom(xml)?;
    Ok(entries
        .into_iter()
        .take(MAX_PER_SUBREDDIT)
        .map(|entry| {
            let title = clean_text(&entry.title);
            let summary_source = if entry.summary.is_empty() {
                title.clone()
            } else {
                strip_html(&entry.summary)
            };
            NewsItem {
                title: format!("[r/{subreddit}] {title}"),
                summary: truncate_summary(&summary_source, SUMMARY_CHARS),
                link: entry.link,
                published: normalize_published(entry.published.as_deref()),
                source: NAME.to_string(),
            }
        })
        .collect())
}
