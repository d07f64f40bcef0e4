//! Adapter for the Crescendo AI curated news page.

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

const PAGE_URL: &str = "https://crescendo.ai/news";
const MAX_ITEMS: usize = 15;
const SUMMARY_CHARS: usize = 250;
const NAME: &str = "crescendo";

static CARD_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"news|post|item|card").unwrap());
static SUMMARY_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"description|summary|excerpt").unwrap());

pub struct CrescendoSource {
    page_url: String,
}

impl Default for CrescendoSource {
    fn default() -> Self {
        Self {
            page_url: PAGE_URL.to_string(),
        }
    }
}

impl CrescendoSource {
    pub fn with_page_url(page_url: impl Into<String>) -> Self {
        Self {
            page_url: page_url.into(),
        }
    }
}

#[async_trait]
impl NewsSource for CrescendoSource {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn fetch(&self) -> Result<Vec<NewsItem>, FetchError> {
        let base = Url::parse(&self.page_url).map_err(|e| FetchError::Parse(e.to_string()))?;
        let html = get_text(&self.page_url).await?;
        let items = parse_news_page(&html, &base);
        info!(count = items.len(), source = NAME, "Parsed Crescendo news page");
        Ok(items)
    }
}

fn parse_news_page(html: &str, base: &Url) -> Vec<NewsItem> {
    let document = Html::parse_document(html);
    let card_sel = Selector::parse("article[class], div[class]").unwrap();
    let title_sel = Selector::parse("h1, h2, h3, h4").unwrap();
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
        let Some(title_el) = card.select(&title_sel).next() else {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_news_cards_and_resolves_links() {
        let html = r#"<html><body>
            <div class="news-card">
                <h3>Funding round closes</h3>
                <p class="description">A lab raised a large round.</p>
                <a href="/news/funding-round">read</a>
            </div>
            <div class="news-card">
                <h4>Benchmark shake-up</h4>
                <a href="https://crescendo.ai/news/benchmarks">read</a>
            </div>
        </body></html>"#;

        let base = Url::parse(PAGE_URL).unwrap();
        let items = parse_news_page(html, &base);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Funding round closes");
        assert_eq!(items[0].link, "https://crescendo.ai/news/funding-round");
        assert_eq!(items[0].summary, "A lab raised a large round.");
        assert_eq!(items[1].title, "Benchmark shake-up");
        assert_eq!(items[1].summary, "Benchmark shake-up");
    }

    #[test]
    fn test_headingless_cards_are_skipped() {
        let html = r#"<html><body>
            <div class="card"><p>Just a teaser with no headline.</p></div>
        </body></html>"#;

        let base = Url::parse(PAGE_URL).unwrap();
        assert!(parse_news_page(html, &base).is_empty());
    }
}
