//! Per-day anchor persistence
//!
//! One JSON file per calendar day under the platform data directory, named
//! `timedata_<YYYY-MM-DD>.json`. The file holds an array of stored anchors
//! sorted by time. Format ownership lives here; parsing the times into the
//! in-memory model is the caller's concern.

use chrono::NaiveDate;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

/// Error type for day-file operations
#[derive(Debug)]
pub enum StoreError {
    /// Failed to determine the data directory
    NoDataDir,
    /// IO error while reading/writing a day file
    Io(io::Error),
    /// Failed to parse a day file
    Parse(serde_json::Error),
    /// Failed to serialize a day file
    Serialize(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NoDataDir => write!(f, "Could not determine data directory"),
            StoreError::Io(e) => write!(f, "IO error: {}", e),
            StoreError::Parse(e) => write!(f, "Parse error: {}", e),
            StoreError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

/// On-disk form of one anchor. The `event` key matches the historical
/// file format, so days recorded by older builds stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAnchor {
    /// Time of day as "HH:MM:SS"
    pub time: String,
    /// Event label
    #[serde(rename = "event")]
    pub label: String,
}

/// Get the base data directory for day files
pub fn data_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "timetable-dial", "timetable")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

/// Get the day-file path for a specific date
pub fn day_path(date: NaiveDate) -> Option<PathBuf> {
    data_dir().map(|dir| dir.join(day_file_name(date)))
}

/// File name for a specific date, keyed by ISO-8601 date
pub fn day_file_name(date: NaiveDate) -> String {
    format!("timedata_{}.json", date)
}

/// Load the stored anchors for a date
///
/// Returns `None` if no file exists for that date yet.
/// Returns an error if the file exists but can't be read or parsed.
pub fn load_day(date: NaiveDate) -> Result<Option<Vec<StoredAnchor>>, StoreError> {
    let path = day_path(date).ok_or(StoreError::NoDataDir)?;

    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&path)?;
    let anchors = serde_json::from_str(&contents).map_err(StoreError::Parse)?;
    Ok(Some(anchors))
}

/// Save the stored anchors for a date, sorted by time
pub fn save_day(date: NaiveDate, anchors: &[StoredAnchor]) -> Result<(), StoreError> {
    let path = day_path(date).ok_or(StoreError::NoDataDir)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    // "HH:MM:SS" strings sort lexicographically in time order
    let mut sorted: Vec<StoredAnchor> = anchors.to_vec();
    sorted.sort_by(|a, b| a.time.cmp(&b.time));

    let contents = serde_json::to_string_pretty(&sorted).map_err(StoreError::Serialize)?;
    fs::write(&path, contents)?;
    Ok(())
}
