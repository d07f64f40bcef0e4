//! Command-line interface definitions for AI News Wire.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Every option has a sensible default so a bare `ai_news_wire` run produces
//! a full collection into `./data`.

use chrono::NaiveDate;
use clap::Parser;

/// Command-line arguments for the AI News Wire application.
///
/// This struct defines all configuration options that can be passed to the
/// application at runtime. Options cover the output date, the data
/// directory, retention, and logging verbosity.
///
/// # Examples
///
/// ```sh
/// # Basic usage, collects into ./data
/// ai_news_wire
///
/// # Collect under a specific date with a custom data directory
/// ai_news_wire --date 2025-10-19 --data-dir /srv/news/data
///
/// # See what a run would do without writing anything
/// ai_news_wire --dry-run --verbose
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Override the collection date (YYYY-MM-DD); defaults to today
    #[arg(short, long, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,

    /// Enable debug-level logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Collect and log, but write nothing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Number of daily snapshots to keep on disk
    #[arg(long, default_value_t = 7)]
    pub retention: usize,

    /// Directory for snapshot, pointer, and index files
    #[arg(long, default_value = "data")]
    pub data_dir: String,
}
