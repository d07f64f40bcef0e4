//! Title-based deduplication for collected news items.
//!
//! Sources frequently republish the same story with cosmetic differences in
//! capitalization or surrounding whitespace, so item identity is the title
//! after [`normalize_title`]. Two passes share that one definition:
//! [`dedup_items`] runs on every source's items during collection, and
//! [`dedup_across_sources`] is an optional second pass for callers that want
//! each story attributed to a single source.

use crate::models::{CollectionResult, NewsItem};
use itertools::Itertools;
use std::collections::HashSet;

/// Canonical form of a title for identity comparisons: surrounding
/// whitespace trimmed, then lowercased. Interior whitespace is preserved,
/// so `"Test  Title"` and `"Test Title"` remain distinct items.
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Remove duplicate items from a single source's list, keeping the first
/// occurrence of each normalized title and the relative order of survivors.
pub fn dedup_items(items: Vec<NewsItem>) -> Vec<NewsItem> {
    items
        .into_iter()
        .unique_by(|item| normalize_title(&item.title))
        .collect()
}

/// Remove items whose normalized title already appeared under any earlier
/// source, mutating the collection in place. Sources are visited in
/// registration order, so a contested story stays with whichever source was
/// registered first. Counters in `collection_status` reflect the state at
/// collection time and are not recomputed here.
pub fn dedup_across_sources(result: &mut CollectionResult) {
    let mut seen: HashSet<String> = HashSet::new();
    for (_, items) in result.sources.iter_mut() {
        items.retain(|item| seen.insert(normalize_title(&item.title)));
    }
}
