//! # AI News Wire
//!
//! An AI-news aggregation pipeline that collects headline items from arXiv,
//! the Hugging Face blog, Product Hunt, Reddit, and two trade-news sites,
//! normalizes and deduplicates them, and maintains a small directory of
//! dated JSON snapshots with a rolling retention window.
//!
//! ## Features
//!
//! - Fetches from six sources (RSS, Atom, and HTML pages) with retry and
//!   exponential backoff; a source that keeps failing degrades to an empty
//!   result instead of aborting the run
//! - Per-source deduplication by normalized title, with an optional
//!   cross-source pass
//! - Deterministic collection status (per-source success and failure counts)
//! - Dated JSON snapshots plus a `today.json` pointer and an `index.json`
//!   manifest
//! - Rolling retention that prunes snapshots past a configurable window
//!
//! ## Usage
//!
//! ```sh
//! ai_news_wire --retention 7 --data-dir ./data
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Fetching**: Every registered source fetches and normalizes its items
//!    (parallel, 4 at a time), retrying transient failures with backoff
//! 2. **Deduplication**: Titles are normalized and first occurrences kept
//! 3. **Snapshot**: The run is written to `<data_dir>/<date>.json` and
//!    copied to `today.json`
//! 4. **Retention**: Old snapshots are pruned, then the `index.json`
//!    manifest is rebuilt from what is left on disk

pub mod cli;
pub mod collector;
pub mod dedup;
pub mod fetch;
pub mod models;
pub mod outputs;
pub mod sources;
pub mod utils;

// ---- Re-exports for the binary and integration tests ----
pub use collector::Collector;
pub use fetch::{FetchError, NewsSource, RetryPolicy, fetch_with_retry};
pub use models::{CollectionResult, CollectionStatus, NewsItem, SourceMap};
