//! Rolling retention over dated snapshot files.
//!
//! The data directory accumulates one `YYYY-MM-DD.json` file per day.
//! Retention keeps that set bounded and the companion files current:
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | [`available_dates`] | lists the dated snapshots on disk, newest first |
//! | [`cleanup_old_files`] | deletes everything past the retention window |
//! | [`write_today_pointer`] | copies the newest snapshot to `today.json` |
//! | [`update_index`] | rewrites the `index.json` manifest |

use std::error::Error;
use std::path::{Path, PathBuf};

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use tokio::fs;
use tracing::{error, info, instrument};

use crate::models::RetentionIndex;

/// Stem of a dated snapshot file, e.g. `2025-10-19`.
static DATE_STEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// Lists the collection dates that have a snapshot on disk, newest first.
///
/// Only files named `YYYY-MM-DD.json` count; `today.json`, `index.json`,
/// and anything else sharing the directory are ignored.
#[instrument(level = "debug", skip_all, fields(data_dir = %data_dir))]
pub async fn available_dates(data_dir: &str) -> Result<Vec<String>, Box<dyn Error>> {
    let mut dates = Vec::new();
    let mut entries = fs::read_dir(data_dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            if DATE_STEM.is_match(stem) {
                dates.push(stem.to_string());
            }
        }
    }

    dates.sort_by(|a, b| b.cmp(a));
    Ok(dates)
}

/// Deletes dated snapshots beyond the newest `retention_days`.
///
/// Returns the paths that were removed. A file that fails to delete is
/// logged and skipped; the next run will see it again.
#[instrument(level = "info", skip_all, fields(data_dir = %data_dir, retention_days))]
pub async fn cleanup_old_files(
    data_dir: &str,
    retention_days: usize,
) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let dates = available_dates(data_dir).await?;
    if dates.len() <= retention_days {
        info!(files = dates.len(), retention_days, "Nothing to clean up");
        return Ok(Vec::new());
    }

    let mut deleted = Vec::new();
    for date in &dates[retention_days..] {
        let path = Path::new(data_dir).join(format!("{date}.json"));
        if !path.exists() {
            continue;
        }
        match fs::remove_file(&path).await {
            Ok(()) => {
                info!(path = %path.display(), "Deleted old snapshot");
                deleted.push(path);
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to delete old snapshot");
            }
        }
    }

    info!(deleted = deleted.len(), kept = retention_days, "Cleanup finished");
    Ok(deleted)
}

/// Copies `<date>.json` over `today.json` so consumers have one stable
/// path to the newest snapshot.
///
/// A missing source file is logged and skipped rather than treated as
/// fatal; the rest of the pipeline still ran.
#[instrument(level = "info", skip_all, fields(data_dir = %data_dir, date = %date))]
pub async fn write_today_pointer(data_dir: &str, date: &str) -> Result<(), Box<dyn Error>> {
    let source = Path::new(data_dir).join(format!("{date}.json"));
    if !source.exists() {
        error!(path = %source.display(), "Snapshot for today pointer does not exist");
        return Ok(());
    }

    let target = Path::new(data_dir).join("today.json");
    fs::copy(&source, &target).await?;
    info!(from = %source.display(), to = %target.display(), "Updated today pointer");
    Ok(())
}

/// Rebuilds `index.json` from the given dates.
///
/// The manifest is always written whole: dates sorted newest first, a
/// fresh `last_updated` stamp, and the day count.
#[instrument(level = "info", skip_all, fields(data_dir = %data_dir))]
pub async fn update_index(
    data_dir: &str,
    mut dates: Vec<String>,
) -> Result<PathBuf, Box<dyn Error>> {
    dates.sort_by(|a, b| b.cmp(a));
    let total_days = dates.len();

    let index = RetentionIndex {
        last_updated: Utc::now().to_rfc3339(),
        available_dates: dates,
        total_days,
    };

    let path = Path::new(data_dir).join("index.json");
    let json = serde_json::to_string_pretty(&index)?;
    fs::write(&path, json).await?;

    info!(path = %path.display(), total_days, "Rebuilt index");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn seed(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).await.unwrap();
    }

    #[tokio::test]
    async fn test_available_dates_sorted_and_filtered() {
        let dir = tempdir().unwrap();
        for name in [
            "2025-10-17.json",
            "2025-10-19.json",
            "2025-10-18.json",
            "today.json",
            "index.json",
            "notes.txt",
            "2025-1-1.json",
        ] {
            seed(dir.path(), name, "{}").await;
        }

        let dates = available_dates(dir.path().to_str().unwrap()).await.unwrap();
        assert_eq!(dates, vec!["2025-10-19", "2025-10-18", "2025-10-17"]);
    }

    #[tokio::test]
    async fn test_available_dates_empty_dir() {
        let dir = tempdir().unwrap();
        let dates = available_dates(dir.path().to_str().unwrap()).await.unwrap();
        assert!(dates.is_empty());
    }

    #[tokio::test]
    async fn test_cleanup_noop_within_retention() {
        let dir = tempdir().unwrap();
        for name in ["2025-10-17.json", "2025-10-18.json", "2025-10-19.json"] {
            seed(dir.path(), name, "{}").await;
        }

        let deleted = cleanup_old_files(dir.path().to_str().unwrap(), 7)
            .await
            .unwrap();
        assert!(deleted.is_empty());
        for name in ["2025-10-17.json", "2025-10-18.json", "2025-10-19.json"] {
            assert!(dir.path().join(name).exists());
        }
    }

    #[tokio::test]
    async fn test_cleanup_keeps_newest_files() {
        let dir = tempdir().unwrap();
        for day in 10..20 {
            seed(dir.path(), &format!("2025-10-{day}.json"), "{}").await;
        }

        let deleted = cleanup_old_files(dir.path().to_str().unwrap(), 7)
            .await
            .unwrap();
        assert_eq!(deleted.len(), 3);
        for day in [10, 11, 12] {
            assert!(!dir.path().join(format!("2025-10-{day}.json")).exists());
        }
        for day in 13..20 {
            assert!(dir.path().join(format!("2025-10-{day}.json")).exists());
        }
    }

    #[tokio::test]
    async fn test_cleanup_retention_zero_deletes_all() {
        let dir = tempdir().unwrap();
        for name in ["2025-10-18.json", "2025-10-19.json"] {
            seed(dir.path(), name, "{}").await;
        }
        seed(dir.path(), "today.json", "{}").await;

        let deleted = cleanup_old_files(dir.path().to_str().unwrap(), 0)
            .await
            .unwrap();
        assert_eq!(deleted.len(), 2);
        // Companion files are not part of the dated window.
        assert!(dir.path().join("today.json").exists());
    }

    #[tokio::test]
    async fn test_today_pointer_is_byte_copy() {
        let dir = tempdir().unwrap();
        let body = "{\n  \"date\": \"2025-10-19\"\n}";
        seed(dir.path(), "2025-10-19.json", body).await;

        write_today_pointer(dir.path().to_str().unwrap(), "2025-10-19")
            .await
            .unwrap();

        let copied = fs::read(dir.path().join("today.json")).await.unwrap();
        let original = fs::read(dir.path().join("2025-10-19.json")).await.unwrap();
        assert_eq!(copied, original);
    }

    #[tokio::test]
    async fn test_today_pointer_missing_source_is_skipped() {
        let dir = tempdir().unwrap();

        let result = write_today_pointer(dir.path().to_str().unwrap(), "2025-10-19").await;
        assert!(result.is_ok());
        assert!(!dir.path().join("today.json").exists());
    }

    #[tokio::test]
    async fn test_update_index_sorts_descending() {
        let dir = tempdir().unwrap();
        let dates = vec![
            "2025-10-17".to_string(),
            "2025-10-19".to_string(),
            "2025-10-18".to_string(),
        ];

        let path = update_index(dir.path().to_str().unwrap(), dates)
            .await
            .unwrap();
        assert_eq!(path, dir.path().join("index.json"));

        let raw = fs::read_to_string(&path).await.unwrap();
        let index: RetentionIndex = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            index.available_dates,
            vec!["2025-10-19", "2025-10-18", "2025-10-17"]
        );
        assert_eq!(index.total_days, 3);
        assert!(!index.last_updated.is_empty());
    }

    #[tokio::test]
    async fn test_update_index_empty() {
        let dir = tempdir().unwrap();

        let path = update_index(dir.path().to_str().unwrap(), Vec::new())
            .await
            .unwrap();
        let raw = fs::read_to_string(&path).await.unwrap();
        let index: RetentionIndex = serde_json::from_str(&raw).unwrap();
        assert!(index.available_dates.is_empty());
        assert_eq!(index.total_days, 0);
    }
}
