//! Hugging Face blog adapter.
//!
//! The blog has no public feed, so this scrapes the post cards off the
//! landing page. Cards are `<article>` elements today; a class-based
//! fallback catches the markup the page used previously.

use crate::fetch::{FetchError, NewsSource};
use crate::models::NewsItem;
use crate::sources::{get_text, resolve_link};
use crate::utils::{clean_text, truncate_summary};
use async_trait::async_trait;
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::info;
use url::Url;

const BLOG_URL: &str = "https://huggingface.co/blog";
const MAX_ITEMS: usize = 15;
const SUMMARY_CHARS: usize = 250;
const NAME: &str = "huggingface";

static CARD_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"blog|post|article").unwrap());
static SUMMARY_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"description|summary|excerpt").unwrap());

pub struct HuggingFaceSource {
    page_url: String,
}

impl Default for HuggingFaceSource {
    fn default() -> Self {
        Self {
            page_url: BLOG_URL.to_string(),
        }
    }
}

impl HuggingFaceSource {
    pub fn with_page_url(page_url: impl Into<String>) -> Self {
        Self {
            page_url: page_url.into(),
        }
    }
}

#[async_trait]
impl NewsSource for HuggingFaceSource {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn fetch(&self) -> Result<Vec<NewsItem>, FetchError> {
        let base = Url::parse(&self.page_url).map_err(|e| FetchError::Parse(e.to_string()))?;
        let html = get_text(&self.page_url).await?;
        let items = parse_blog_page(&html, &base);
        info!(count = items.len(), source = NAME, "Parsed Hugging Face blog");
        Ok(items)
    }
}

fn parse_blog_page(html: &str, base: &Url) -> Vec<NewsItem> {
    let document = Html::parse_document(html);
    let article_sel = Selector::parse("article").unwrap();
    let fallback_sel = Selector::parse("div[class]").unwrap();
    let heading_sel = Selector::parse("h2, h3, h4").unwrap();
    let link_sel = Selector::parse("a[href]").unwrap();
    let classed_sel = Selector::parse("p[class], div[class]").unwrap();
    let para_sel = Selector::parse("p").unwrap();

    let cards: Vec<ElementRef> = document.select(&article_sel).take(MAX_ITEMS).collect();
    let cards = if cards.is_empty() {
        document
            .select(&fallback_sel)
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
        let Some(title_el) = card.select(&heading_sel).next() else {
            continue;
        };
        let title = clean_text(&title_el.text().collect::<String>());
        if title.is_empty() {
            continue;
        }

        let Some(link) = card
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
            .and_then(|href| resolve_link(base, href))
        else {
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
