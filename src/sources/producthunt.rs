//! Product Hunt adapter for the artificial-intelligence topic page.
//!
//! Product Hunt renders product cards with `data-test` hooks; those are the
//! primary anchor, with a class-based fallback for markup changes. The topic
//! page mixes in editorial blocks, so items must additionally pass the
//! [`is_ai_related`] keyword filter before they are kept.

use crate::fetch::{FetchError, NewsSource};
use crate::models::NewsItem;
use crate::sources::{get_text, resolve_link};
use crate::utils::{clean_text, is_ai_related, truncate_summary};
use async_trait::async_trait;
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::info;
use url::Url;

const TOPIC_URL: &str = "https://www.producthunt.com/topics/artificial-intelligence";
const MAX_ITEMS: usize = 15;
const SUMMARY_CHARS: usize = 200;
const NAME: &str = "producthunt";

static CARD_ATTR: Lazy<Regex> = Lazy::new(|| Regex::new(r"post|product").unwrap());
static CARD_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"post|product|item").unwrap());
static TITLE_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"name|title").unwrap());
static DESC_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"tagline|description").unwrap());

pub struct ProductHuntSource {
    page_url: String,
}

impl Default for ProductHuntSource {
    fn default() -> Self {
        Self {
            page_url: TOPIC_URL.to_string(),
        }
    }
}

impl ProductHuntSource {
    pub fn with_page_url(page_url: impl Into<String>) -> Self {
        Self {
            page_url: page_url.into(),
        }
    }
}

#[async_trait]
impl NewsSource for ProductHuntSource {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn fetch(&self) -> Result<Vec<NewsItem>, FetchError> {
        let base = Url::parse(&self.page_url).map_err(|e| FetchError::Parse(e.to_string()))?;
        let html = get_text(&self.page_url).await?;
        let items = parse_topic_page(&html, &base);
        info!(count = items.len(), source = NAME, "Parsed Product Hunt topic page");
        Ok(items)
    }
}

fn parse_topic_page(html: &str, base: &Url) -> Vec<NewsItem> {
    let document = Html::parse_document(html);
    let attr_sel = Selector::parse("article[data-test], div[data-test]").unwrap();
    let class_sel = Selector::parse("article[class], div[class]").unwrap();
    let named_title_sel = Selector::parse("h2[class], h3[class], a[class]").unwrap();
    let plain_title_sel = Selector::parse("h2, h3").unwrap();
    let link_sel = Selector::parse("a[href]").unwrap();
    let classed_sel = Selector::parse("p[class], div[class]").unwrap();

    let cards: Vec<ElementRef> = document
        .select(&attr_sel)
        .filter(|el| {
            el.value()
                .attr("data-test")
                .is_some_and(|v| CARD_ATTR.is_match(v))
        })
        .take(MAX_ITEMS)
        .collect();
    let cards = if cards.is_empty() {
        document
            .select(&class_sel)
            .filter(|el| {
                el.value()
                    .attr("class")
                    .is_some_and(|class| CARD_CLASS.is_match(class))
            })
            .take(MAX_ITEMS)
            .collect()
    } else {
        cards
    };

    let mut items = Vec::new();
    for card in cards {
        let title_el = card
            .select(&named_title_sel)
            .find(|el| {
                el.value()
                    .attr("class")
                    .is_some_and(|class| TITLE_CLASS.is_match(class))
            })
            .or_else(|| card.select(&plain_title_sel).next());
        let Some(title_el) = title_el else {
            continue;
        };
        let title = clean_text(&title_el.text().collect::<String>());
        if title.is_empty() {
            continue;
        }

        // Product pages live under /posts/; prefer those links over
        // maker profiles and topic cross-links inside the same card.
        let href = card
            .select(&link_sel)
            .filter_map(|a| a.value().attr("href"))
            .find(|href| href.contains("/posts/"))
            .or_else(|| {
                card.select(&link_sel)
                    .next()
                    .and_then(|a| a.value().attr("href"))
            });
        let Some(link) = href.and_then(|href| resolve_link(base, href)) else {
            continue;
        };

        let summary_raw = card
            .select(&classed_sel)
            .find(|el| {
                el.value()
                    .attr("class")
                    .is_some_and(|class| DESC_CLASS.is_match(class))
            })
            .map(|el| el.text().collect::<String>())
            .unwrap_or_else(|| format!("New AI product on Product Hunt: {title}"));
        let summary = truncate_summary(&summary_raw, SUMMARY_CHARS);

        if !is_ai_related(&format!("{title} {summary}")) {
            continue;
        }

        items.push(NewsItem {
            title,
            summary,
            link,
            published: Utc::now().to_rfc3339(),
            source: NAME.to_string(),
        });
    }
    items
}
