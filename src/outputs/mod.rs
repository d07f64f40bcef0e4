//! Output file management for the data directory.
//!
//! One collection run maintains a small set of JSON files:
//!
//! ```text
//! data/
//! ├── 2025-10-19.json   dated snapshot, one per day
//! ├── 2025-10-18.json
//! ├── today.json        byte copy of the newest snapshot
//! └── index.json        manifest of the dates present
//! ```
//!
//! [`snapshot`] writes the dated file; [`retention`] maintains everything
//! else: the rolling window of dated files, the `today.json` pointer, and
//! the `index.json` manifest.

pub mod retention;
pub mod snapshot;
