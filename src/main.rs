//! Binary entrypoint: wires the CLI to the collection pipeline.
//!
//! One invocation performs one full run: fetch from every source, write the
//! dated snapshot, refresh the `today.json` pointer, prune old snapshots,
//! and rebuild the index. Exit code 0 on success (failed sources included),
//! 130 on Ctrl-C, and 1 on a fatal pipeline error.

use std::error::Error;

use clap::Parser;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use ai_news_wire::cli::Cli;
use ai_news_wire::collector::Collector;
use ai_news_wire::outputs::{retention, snapshot};
use ai_news_wire::sources;
use ai_news_wire::utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();

    // --- Tracing init ---
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    tokio::select! {
        result = run(&args) => result,
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted; shutting down");
            std::process::exit(130);
        }
    }
}

#[instrument(skip_all)]
async fn run(args: &Cli) -> Result<(), Box<dyn Error>> {
    let start_time = std::time::Instant::now();
    info!(version = env!("CARGO_PKG_VERSION"), "ai_news_wire starting up");
    debug!(?args, "Parsed CLI arguments");

    // ---- Collect from every registered source ----
    let mut collector = Collector::default();
    for source in sources::default_sources() {
        collector.register(source);
    }

    let mut result = collector.collect_all().await;
    if let Some(date) = args.date {
        // The override names both the run and its snapshot file.
        result.date = date.format("%Y-%m-%d").to_string();
    }

    let status = &result.collection_status;
    info!(
        total_sources = status.total_sources,
        successful = status.successful,
        failed = status.failed,
        total_items = status.total_items,
        "Collection finished"
    );
    if !status.failed_sources.is_empty() {
        warn!(failed_sources = ?status.failed_sources, "Sources that produced no items");
    }

    if args.dry_run {
        info!("Dry run; skipping snapshot, pointer, cleanup, and index");
        return Ok(());
    }

    // Early check: ensure the data directory is writable
    if let Err(e) = ensure_writable_dir(&args.data_dir).await {
        error!(
            path = %args.data_dir,
            error = %e,
            "Data directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // ---- Snapshot and today pointer ----
    let date = result.date.clone();
    snapshot::write_snapshot(&result, &args.data_dir, &date).await?;

    if let Err(e) = retention::write_today_pointer(&args.data_dir, &date).await {
        error!(error = %e, "Failed to update today pointer");
    }

    // ---- Retention: prune first, then rebuild the index from disk ----
    if let Err(e) = retention::cleanup_old_files(&args.data_dir, args.retention).await {
        error!(error = %e, "Cleanup failed");
    }

    let dates = retention::available_dates(&args.data_dir).await?;
    retention::update_index(&args.data_dir, dates).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
