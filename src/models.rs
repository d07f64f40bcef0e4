//! Data models for collected news items and the files the pipeline produces.
//!
//! This module defines the core data structures used throughout the application:
//! - [`NewsItem`]: A single normalized news item produced by a source adapter
//! - [`SourceMap`]: Insertion-ordered mapping of source name to its items
//! - [`CollectionResult`]: One run's complete output, serialized as the daily snapshot
//! - [`CollectionStatus`]: Per-run counters describing source successes and failures
//! - [`RetentionIndex`]: The `index.json` manifest of snapshot dates on disk

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single news item, normalized to a common shape regardless of whether it
/// came from an RSS feed, an Atom feed, or a scraped HTML page.
///
/// # Identity
///
/// Two items are duplicates when their titles match after trimming and
/// lowercasing (see [`crate::dedup::normalize_title`]). Links, summaries,
/// and timestamps do not participate in identity: the same story posted
/// under two URLs is still one story.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewsItem {
    /// The item headline, as published.
    pub title: String,
    /// A short description or excerpt, possibly truncated by the adapter.
    pub summary: String,
    /// Absolute URL of the full story.
    pub link: String,
    /// Publication timestamp, RFC 3339 when the source provided one.
    pub published: String,
    /// Name of the adapter that produced the item. Not serialized: snapshots
    /// key items by source name already, so the field would be redundant in
    /// the output. Defaults to empty when reading a snapshot back.
    #[serde(skip)]
    pub source: String,
}

/// Insertion-ordered mapping of source name to the items collected from it.
///
/// Serializes as a JSON object whose keys appear in registration order, so
/// snapshots are stable across runs with the same source set. A plain
/// `HashMap` would scramble the key order and `BTreeMap` would sort it;
/// neither matches the "sources appear in the order they were registered"
/// contract, so this keeps a small `Vec` of entries instead.
#[derive(Debug, Default, Clone)]
pub struct SourceMap {
    entries: Vec<(String, Vec<NewsItem>)>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the items recorded under `name`. A replaced key
    /// keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, items: Vec<NewsItem>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, existing)) => *existing = items,
            None => self.entries.push((name, items)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&[NewsItem]> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == name)
    }

    /// Source names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[NewsItem])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Vec<NewsItem>)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of sources, including ones that recorded zero items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total item count across all sources.
    pub fn total_items(&self) -> usize {
        self.entries.iter().map(|(_, v)| v.len()).sum()
    }
}

impl Serialize for SourceMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, items) in &self.entries {
            map.serialize_entry(name, items)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SourceMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SourceMapVisitor;

        impl<'de> Visitor<'de> for SourceMapVisitor {
            type Value = SourceMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of source names to arrays of news items")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, items)) = access.next_entry::<String, Vec<NewsItem>>()? {
                    entries.push((name, items));
                }
                Ok(SourceMap { entries })
            }
        }

        deserializer.deserialize_map(SourceMapVisitor)
    }
}

/// Counters summarizing how a collection run went, embedded in the snapshot.
///
/// A source lands in the `failed` bucket whenever it contributed zero items,
/// whether its fetches errored until the retries ran out or it genuinely had
/// nothing to report. The snapshot does not distinguish the two cases.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct CollectionStatus {
    /// How many sources were registered for the run.
    pub total_sources: usize,
    /// Sources that contributed at least one item.
    pub successful: usize,
    /// Sources that contributed nothing.
    pub failed: usize,
    /// Names of the failed sources, in registration order.
    pub failed_sources: Vec<String>,
    /// Item count across all sources, after per-source deduplication.
    pub total_items: usize,
}

/// The complete output of one collection run. Serialized (pretty-printed)
/// as the dated snapshot file `<date>.json` and copied to `today.json`.
///
/// Every registered source appears as a key under `sources`, even when it
/// contributed zero items, so consumers can tell "failed" from "unknown".
#[derive(Debug, Deserialize, Serialize)]
pub struct CollectionResult {
    /// Snapshot date in `YYYY-MM-DD` form.
    pub date: String,
    /// When the run finished collecting, RFC 3339 UTC.
    pub last_updated: String,
    /// Success and failure counters for the run.
    pub collection_status: CollectionStatus,
    /// Items grouped by source, in registration order.
    pub sources: SourceMap,
}

/// The `index.json` manifest: which snapshot dates are available on disk.
/// Always rebuilt in full from the directory listing, never patched.
#[derive(Debug, Deserialize, Serialize)]
pub struct RetentionIndex {
    /// When the index was rebuilt, RFC 3339 UTC.
    pub last_updated: String,
    /// Snapshot dates present on disk, newest first.
    pub available_dates: Vec<String>,
    /// Convenience count, always `available_dates.len()`.
    pub total_days: usize,
}
