//! # Calculation History
//!
//! Append-only log of calculations in `history.json`, shown in the admin
//! panel. Entries are never edited or pruned.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::calc::{CalcRequest, CuttingModes};
use crate::lenient;
use crate::storage::{JsonFile, StorageResult, HISTORY_FILE};

/// Naive UTC, microsecond precision
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// One calculation as logged
///
/// Read leniently: rows from older writers may carry numbers as strings or
/// `null`, and still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryEntry {
    #[serde(deserialize_with = "lenient::string")]
    pub timestamp: String,
    #[serde(deserialize_with = "lenient::string")]
    pub user_id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub tool_type: String,
    #[serde(deserialize_with = "lenient::string")]
    pub tool_material: String,
    #[serde(deserialize_with = "lenient::number")]
    pub diameter: f64,
    #[serde(deserialize_with = "lenient::integer")]
    pub teeth: i64,
    /// Material name from the request's properties, if any
    #[serde(deserialize_with = "lenient::opt_string")]
    pub material: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub vc: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub n: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub fz: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub feed: f64,
}

impl HistoryEntry {
    /// Entry for a calculation performed now
    pub fn record(request: &CalcRequest, modes: &CuttingModes) -> Self {
        Self {
            timestamp: now_timestamp(),
            user_id: request.user_id.to_string(),
            tool_type: request.tool_type.clone(),
            tool_material: request.tool_material.clone(),
            diameter: request.diameter,
            teeth: request.teeth,
            material: request.material.history_name(),
            vc: modes.vc,
            n: modes.n,
            fz: modes.fz,
            feed: modes.feed,
        }
    }
}

/// Current time in the history timestamp format
pub fn now_timestamp() -> String {
    Utc::now().naive_utc().format(TIMESTAMP_FORMAT).to_string()
}

#[derive(Debug, Clone)]
pub struct HistoryLog {
    file: JsonFile<Vec<HistoryEntry>>,
}

impl HistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: JsonFile::new(path),
        }
    }

    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(HISTORY_FILE))
    }

    pub fn append(&self, entry: HistoryEntry) -> StorageResult<()> {
        self.file.update(|entries| entries.push(entry))
    }

    /// All entries, oldest first
    pub fn list(&self) -> Vec<HistoryEntry> {
        self.file.load()
    }
}
