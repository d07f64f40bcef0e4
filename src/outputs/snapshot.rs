//! Dated JSON snapshot of a collection run.
//!
//! Each run produces one pretty-printed file named after the collection
//! date, e.g. `data/2025-10-19.json`. The file holds the full
//! [`CollectionResult`]: run metadata, per-source status, and the items
//! grouped by source in registration order.

use std::error::Error;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{info, instrument};

use crate::models::CollectionResult;

/// Writes `result` to `<data_dir>/<date>.json` and returns the path.
///
/// The caller is expected to have created `data_dir` already; a missing
/// directory surfaces as the underlying I/O error.
#[instrument(level = "info", skip_all, fields(data_dir = %data_dir, date = %date))]
pub async fn write_snapshot(
    result: &CollectionResult,
    data_dir: &str,
    date: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let path = Path::new(data_dir).join(format!("{date}.json"));
    let json = serde_json::to_string_pretty(result)?;
    fs::write(&path, json).await?;

    info!(
        path = %path.display(),
        items = result.collection_status.total_items,
        "Wrote daily snapshot"
    );
    Ok(path)
}
