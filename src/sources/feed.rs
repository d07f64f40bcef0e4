//! RSS 2.0 and Atom feed decoding shared by the feed-backed adapters.
//!
//! Feeds are deserialized with `quick_xml` into minimal serde structs; only
//! the elements the pipeline cares about are modeled, everything else in the
//! document is ignored. Entries missing a title or a link are dropped here
//! so adapters only ever see usable entries.

use crate::fetch::FetchError;
use chrono::{DateTime, Utc};
use quick_xml::de::from_str;
use serde::Deserialize;

/// One usable feed entry, format differences already smoothed over.
/// `summary` may still contain embedded HTML; stripping is left to the
/// adapter since truncation limits differ per source.
#[derive(Debug)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    pub summary: String,
    pub published: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    item: Vec<RssItem>,
}

#[derive(Debug, Deserialize)]
struct RssItem {
    title: Option<String>,
    link: Option<String>,
    description: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Feed {
    #[serde(rename = "entry", default)]
    entries: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    title: Option<TextValue>,
    #[serde(rename = "link", default)]
    links: Vec<AtomLink>,
    summary: Option<TextValue>,
    content: Option<TextValue>,
    published: Option<String>,
    updated: Option<String>,
}

/// Element text regardless of markup attributes such as `type="html"`.
#[derive(Debug, Default, Deserialize)]
struct TextValue {
    #[serde(rename = "$text")]
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomLink {
    #[serde(rename = "@href")]
    href: Option<String>,
    #[serde(rename = "@rel")]
    rel: Option<String>,
}

/// Decode an RSS 2.0 document into entries, skipping items without a title
/// or link.
pub fn parse_rss(xml: &str) -> Result<Vec<FeedEntry>, FetchError> {
    let rss: Rss = from_str(xml).map_err(|e| FetchError::Parse(e.to_string()))?;

    let mut entries = Vec::with_capacity(rss.channel.item.len());
    for item in rss.channel.item {
        let (Some(title), Some(link)) = (item.title, item.link) else {
            continue;
        };
        if title.trim().is_empty() || link.trim().is_empty() {
            continue;
        }
        entries.push(FeedEntry {
            title,
            link,
            summary: item.description.unwrap_or_default(),
            published: item.pub_date,
        });
    }
    Ok(entries)
}

/// Decode an Atom document into entries. The entry link is the
/// `rel="alternate"` (or rel-less) `<link>`; `<summary>` is preferred over
/// `<content>` for the summary text; `<published>` falls back to
/// `<updated>`.
pub fn parse_atom(xml: &str) -> Result<Vec<FeedEntry>, FetchError> {
    let feed: Feed = from_str(xml).map_err(|e| FetchError::Parse(e.to_string()))?;

    let mut entries = Vec::with_capacity(feed.entries.len());
    for entry in feed.entries {
        let title = entry.title.and_then(|t| t.value).unwrap_or_default();
        let Some(link) = pick_link(&entry.links) else {
            continue;
        };
        if title.trim().is_empty() {
            continue;
        }
        let summary = entry
            .summary
            .and_then(|s| s.value)
            .or_else(|| entry.content.and_then(|c| c.value))
            .unwrap_or_default();
        entries.push(FeedEntry {
            title,
            link,
            summary,
            published: entry.published.or(entry.updated),
        });
    }
    Ok(entries)
}

fn pick_link(links: &[AtomLink]) -> Option<String> {
    links
        .iter()
        .find(|l| l.href.is_some() && matches!(l.rel.as_deref(), None | Some("alternate")))
        .or_else(|| links.iter().find(|l| l.href.is_some()))
        .and_then(|l| l.href.clone())
}

/// Normalize a feed timestamp to RFC 3339 UTC. Feeds use RFC 2822
/// (`Mon, 06 Oct 2025 14:30:00 GMT`) or RFC 3339; anything unparseable, and
/// entries with no timestamp at all, get the collection time instead.
pub fn normalize_published(raw: Option<&str>) -> String {
    if let Some(raw) = raw {
        let raw = raw.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
            return parsed.with_timezone(&Utc).to_rfc3339();
        }
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return parsed.with_timezone(&Utc).to_rfc3339();
        }
    }
    Utc::now().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS_FIXTURE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>arXiv cs.AI</title>
    <item>
      <title>Scaling Laws Revisited</title>
      <link>https://arxiv.org/abs/2510.01234</link>
      <description>We revisit scaling laws for language models.</description>
      <pubDate>Mon, 06 Oct 2025 14:30:00 GMT</pubDate>
    </item>
    <item>
      <title>No Link Item</title>
      <description>This one is unusable.</description>
    </item>
    <item>
      <title><![CDATA[Agents & Tools]]></title>
      <link>https://arxiv.org/abs/2510.05678</link>
      <description>A survey.</description>
      <pubDate>Tue, 07 Oct 2025 09:00:00 GMT</pubDate>
    </item>
  </channel>
</rss>"#;

    const ATOM_FIXTURE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>r/MachineLearning</title>
  <entry>
    <title>[D] What happened to diffusion?</title>
    <link href="https://www.reddit.com/r/MachineLearning/comments/abc/"/>
    <content type="html">&lt;p&gt;Discussion thread about diffusion models.&lt;/p&gt;</content>
    <published>2025-10-06T12:00:00+00:00</published>
  </entry>
  <entry>
    <title></title>
    <link href="https://www.reddit.com/r/MachineLearning/comments/def/"/>
    <published>2025-10-06T13:00:00+00:00</published>
  </entry>
  <entry>
    <title>[R] New benchmark results</title>
    <link rel="alternate" href="https://www.reddit.com/r/MachineLearning/comments/ghi/"/>
    <summary>Benchmark summary text.</summary>
    <updated>2025-10-06T14:00:00+00:00</updated>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_rss_skips_items_without_links() {
        let entries = parse_rss(RSS_FIXTURE).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Scaling Laws Revisited");
        assert_eq!(entries[0].link, "https://arxiv.org/abs/2510.01234");
        assert_eq!(
            entries[0].published.as_deref(),
            Some("Mon, 06 Oct 2025 14:30:00 GMT")
        );
        assert_eq!(entries[1].title, "Agents & Tools");
    }

    #[test]
    fn test_parse_rss_rejects_non_xml() {
        let err = parse_rss("this is not xml").unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn test_parse_rss_empty_channel() {
        let xml = r#"<rss version="2.0"><channel><title>Empty</title></channel></rss>"#;
        assert!(parse_rss(xml).unwrap().is_empty());
    }

    #[test]
    fn test_parse_atom_entries_and_link_attributes() {
        let entries = parse_atom(ATOM_FIXTURE).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "[D] What happened to diffusion?");
        assert_eq!(
            entries[0].link,
            "https://www.reddit.com/r/MachineLearning/comments/abc/"
        );
        assert_eq!(
            entries[0].summary,
            "<p>Discussion thread about diffusion models.</p>"
        );
        assert_eq!(
            entries[0].published.as_deref(),
            Some("2025-10-06T12:00:00+00:00")
        );
    }

    #[test]
    fn test_parse_atom_falls_back_to_updated() {
        let entries = parse_atom(ATOM_FIXTURE).unwrap();
        assert_eq!(
            entries[1].published.as_deref(),
            Some("2025-10-06T14:00:00+00:00")
        );
        assert_eq!(entries[1].summary, "Benchmark summary text.");
    }

    #[test]
    fn test_normalize_published_rfc2822() {
        let normalized = normalize_published(Some("Mon, 06 Oct 2025 14:30:00 GMT"));
        assert!(normalized.starts_with("2025-10-06T14:30:00"));
    }

    #[test]
    fn test_normalize_published_rfc3339() {
        let normalized = normalize_published(Some("2025-10-06T14:30:00Z"));
        assert!(normalized.starts_with("2025-10-06T14:30:00"));
    }

    #[test]
    fn test_normalize_published_fallback_is_nonempty() {
        assert!(!normalize_published(Some("last tuesday")).is_empty());
        assert!(!normalize_published(None).is_empty());
    }
}
