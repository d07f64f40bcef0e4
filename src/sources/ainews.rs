//! Adapter for artificialintelligence-news.com front-page articles.

use crate::fetch::{FetchError, NewsSource};
use crate::models::NewsItem;
use crate::sources::{get_text, resolve_link};
use crate::utils::{clean_text, truncate_summary};
use async_trait::async_trait;
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::info;
use url::Url;

const SITE_URL: &str = "https://www.artificialintelligence-news.com";
const MAX_ITEMS: usize = 15;
const SUMMARY_CHARS: usize = 250;
const NAME: &str = "ai_news";

static CARD_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"post|article|entry").unwrap());
static TITLE_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"title|headline").unwrap());
static SUMMARY_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"excerpt|summary|description").unwrap());

pub struct AiNewsSource {
    page_url: String,
}

impl Default for AiNewsSource {
    fn default() -> Self {
        Self {
            page_url: SITE_URL.to_string(),
        }
    }
}

impl AiNewsSource {
    pub fn with_page_url(page_url: impl Into<String>) -> Self {
        Self {
            page_url: page_url.into(),
        }
    }
}

#[async_trait]
impl NewsSource for AiNewsSource {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn fetch(&self) -> Result<Vec<NewsItem>, FetchError> {
        let base = Url::parse(&self.page_url).map_err(|e| FetchError::Parse(e.to_string()))?;
        let html = get_text(&self.page_url).await?;
        let items = parse_front_page(&html, &base);
        info!(count = items.len(), source = NAME, "Parsed AI News front page");
        Ok(items)
    }
}

fn parse_front_page(html: &str, base: &Url) -> Vec<NewsItem> {
    let document = Html::parse_document(html);
    let card_sel = Selector::parse("article[class], div[class]").unwrap();
    let named_title_sel = Selector::parse("h1[class], h2[class], h3[class]").unwrap();
    let plain_title_sel = Selector::parse("h1, h2, h3").unwrap();
    let link_sel = Selector::parse("a[href]").unwrap();
    let classed_sel = Selector::parse("p[class], div[class]").unwrap();
    let para_sel = Selector::parse("p").unwrap();

    let mut items = Vec::new();
    let cards = document
        .select(&card_sel)
        .filter(|el| {
            el.value()
                .attr("class")
                .is_some_and(|class| CARD_CLASS.is_match(class))
        })
        .take(MAX_ITEMS);

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

        // The headline usually wraps its own link; fall back to the first
        // link anywhere in the card.
        let href = title_el
            .select(&link_sel)
            .next()
            .or_else(|| card.select(&link_sel).next())
            .and_then(|a| a.value().attr("href"));
        let Some(link) = href.and_then(|href| resolve_link(base, href)) else {
            continue;
        };

        let summary_text = card
            .select(&classed_sel)
            .find(|el| {
                el.value()
                    .attr("class")
                    .is_some_and(|class| SUMMARY_CLASS.is_match(class))
            })
            .or_else(|| card.select(&para_sel).next())
            .map(|el| el.text().collect::<String>())
            .unwrap_or_else(|| title.clone());

        items.push(NewsItem {
            title,
            summary: truncate_summary(&summary_text, SUMMARY_CHARS),
            link,
            published: Utc::now().to_rfc3339(),
            source: NAME.to_string(),
        });
    }
    items
}
