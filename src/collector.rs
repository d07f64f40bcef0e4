//! Collection orchestration across all registered sources.
//!
//! The [`Collector`] owns the source list and the retry policy. One call to
//! [`Collector::collect_all`] fetches every source, deduplicates each
//! source's items, and assembles the [`CollectionResult`] for the run.
//! Sources appear in the result in registration order, and every registered
//! source gets a key even when it contributed nothing.

use crate::dedup::dedup_items;
use crate::fetch::{NewsSource, RetryPolicy, fetch_with_retry};
use crate::models::{CollectionResult, CollectionStatus, NewsItem, SourceMap};
use chrono::Utc;
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

/// Sources fetched at a time. Fetches overlap up to this limit; results are
/// still recorded in registration order.
const FETCH_CONCURRENCY: usize = 4;

pub struct Collector {
    sources: Vec<Box<dyn NewsSource>>,
    retry: RetryPolicy,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new(RetryPolicy::default())
    }
}

impl Collector {
    pub fn new(retry: RetryPolicy) -> Self {
        Self {
            sources: Vec::new(),
            retry,
        }
    }

    /// Add a source to the collection run. Registration order determines the
    /// order of keys in the snapshot.
    pub fn register(&mut self, source: Box<dyn NewsSource>) {
        info!(source = source.name(), "Registered source");
        self.sources.push(source);
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Fetch every registered source and aggregate the outcome.
    ///
    /// A source that yields no items, whether its fetches kept failing or it
    /// genuinely had nothing, is recorded with an empty list and counted in
    /// the `failed` bucket; the two cases are indistinguishable here because
    /// the retry wrapper absorbs errors. `total_items` counts items after
    /// per-source deduplication.
    pub async fn collect_all(&self) -> CollectionResult {
        info!(sources = self.sources.len(), "Starting collection");

        let now = Utc::now();
        let mut result = CollectionResult {
            date: now.format("%Y-%m-%d").to_string(),
            last_updated: now.to_rfc3339(),
            collection_status: CollectionStatus::default(),
            sources: SourceMap::new(),
        };

        // buffered (not buffer_unordered) yields results in registration
        // order no matter which fetch finishes first.
        let fetched: Vec<(&'static str, Vec<NewsItem>)> = stream::iter(self.sources.iter())
            .map(|source| {
                let retry = &self.retry;
                async move {
                    let items = fetch_with_retry(source.as_ref(), retry).await;
                    (source.name(), items)
                }
            })
            .buffered(FETCH_CONCURRENCY)
            .collect()
            .await;

        let mut successful = 0;
        let mut failed_sources = Vec::new();
        let mut total_items = 0;

        for (name, items) in fetched {
            if items.is_empty() {
                warn!(source = name, "No items collected");
                result.sources.insert(name, Vec::new());
                failed_sources.push(name.to_string());
            } else {
                let unique = dedup_items(items);
                info!(source = name, count = unique.len(), "Collected unique items");
                total_items += unique.len();
                successful += 1;
                result.sources.insert(name, unique);
            }
        }

        result.collection_status = CollectionStatus {
            total_sources: self.sources.len(),
            successful,
            failed: failed_sources.len(),
            failed_sources,
            total_items,
        };

        info!(
            total_items,
            successful,
            total_sources = self.sources.len(),
            "Collection complete"
        );

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;
    use async_trait::async_trait;
    use std::time::Duration;

    struct StaticSource {
        name: &'static str,
        titles: Vec<&'static str>,
        delay: Duration,
    }

    impl StaticSource {
        fn new(name: &'static str, titles: Vec<&'static str>) -> Self {
            Self {
                name,
                titles,
                delay: Duration::ZERO,
            }
        }

        fn slow(name: &'static str, titles: Vec<&'static str>, delay: Duration) -> Self {
            Self {
                name,
                titles,
                delay,
            }
        }
    }

    #[async_trait]
    impl NewsSource for StaticSource {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn fetch(&self) -> Result<Vec<NewsItem>, FetchError> {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            Ok(self
                .titles
                .iter()
                .map(|title| NewsItem {
                    title: title.to_string(),
                    summary: String::new(),
                    link: format!("https://example.com/{title}"),
                    published: "2025-10-19T08:00:00Z".to_string(),
                    source: self.name.to_string(),
                })
                .collect())
        }
    }

    struct BrokenSource;

    #[async_trait]
    impl NewsSource for BrokenSource {
        fn name(&self) -> &'static str {
            "broken"
        }

        async fn fetch(&self) -> Result<Vec<NewsItem>, FetchError> {
            Err(FetchError::Timeout)
        }
    }

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            backoff_base: Duration::from_millis(1),
            max_delay: Duration::from_millis(10),
        }
    }

    #[tokio::test]
    async fn test_every_registered_source_gets_a_key() {
        let mut collector = Collector::new(fast_policy());
        collector.register(Box::new(StaticSource::new("arxiv", vec!["A", "B"])));
        collector.register(Box::new(BrokenSource));
        collector.register(Box::new(StaticSource::new("quiet", vec![])));

        let result = collector.collect_all().await;

        let keys: Vec<&str> = result.sources.keys().collect();
        assert_eq!(keys, vec!["arxiv", "broken", "quiet"]);
        assert!(result.sources.get("broken").unwrap().is_empty());
        assert!(result.sources.get("quiet").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_status_counts_with_one_broken_source() {
        let mut collector = Collector::new(fast_policy());
        collector.register(Box::new(StaticSource::new("one", vec!["A"])));
        collector.register(Box::new(BrokenSource));
        collector.register(Box::new(StaticSource::new("three", vec!["B", "C"])));

        let status = collector.collect_all().await.collection_status;

        assert_eq!(status.total_sources, 3);
        assert_eq!(status.successful, 2);
        assert_eq!(status.failed, 1);
        assert_eq!(status.failed_sources, vec!["broken".to_string()]);
        assert_eq!(status.total_items, 3);
    }

    #[tokio::test]
    async fn test_zero_item_source_counts_as_failed() {
        let mut collector = Collector::new(fast_policy());
        collector.register(Box::new(StaticSource::new("quiet", vec![])));

        let status = collector.collect_all().await.collection_status;

        assert_eq!(status.failed, 1);
        assert_eq!(status.failed_sources, vec!["quiet".to_string()]);
        assert_eq!(status.total_items, 0);
    }

    #[tokio::test]
    async fn test_items_are_deduplicated_per_source() {
        let mut collector = Collector::new(fast_policy());
        collector.register(Box::new(StaticSource::new(
            "echo",
            vec!["Story", "STORY", "Other"],
        )));

        let result = collector.collect_all().await;

        let items = result.sources.get("echo").unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Story");
        assert_eq!(result.collection_status.total_items, 2);
    }

    #[tokio::test]
    async fn test_slow_source_does_not_reorder_keys() {
        let mut collector = Collector::new(fast_policy());
        collector.register(Box::new(StaticSource::slow(
            "slow",
            vec!["A"],
            Duration::from_millis(50),
        )));
        collector.register(Box::new(StaticSource::new("fast", vec!["B"])));

        let result = collector.collect_all().await;

        let keys: Vec<&str> = result.sources.keys().collect();
        assert_eq!(keys, vec!["slow", "fast"]);
    }

    #[tokio::test]
    async fn test_run_metadata_is_stamped() {
        let collector = Collector::new(fast_policy());
        let result = collector.collect_all().await;

        assert_eq!(result.date.len(), 10);
        assert_eq!(&result.date[4..5], "-");
        assert!(!result.last_updated.is_empty());
        assert_eq!(result.collection_status.total_sources, 0);
    }
}
