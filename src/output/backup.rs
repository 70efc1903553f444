//! Result files
//!
//! Every scan leaves a timestamped JSON backup of its moves, and optionally a
//! Parquet export next to it.

use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

use super::types::OutputError;
use crate::analysis::Move;
use crate::data::write_moves;

/// Prefix shared by every result file
pub const RESULTS_PREFIX: &str = "comprehensive_results";

/// Timestamp format used in result file names
const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// `comprehensive_results_<YYYYMMDD_HHMMSS>.json`
pub fn backup_file_name(timestamp: DateTime<Utc>) -> String {
    format!(
        "{}_{}.json",
        RESULTS_PREFIX,
        timestamp.format(FILE_TIMESTAMP_FORMAT)
    )
}

/// `comprehensive_results_<YYYYMMDD_HHMMSS>.parquet`
pub fn export_file_name(timestamp: DateTime<Utc>) -> String {
    format!(
        "{}_{}.parquet",
        RESULTS_PREFIX,
        timestamp.format(FILE_TIMESTAMP_FORMAT)
    )
}

/// Write moves as a pretty-printed JSON array into `dir`
pub fn save_results_backup(
    dir: &Path,
    moves: &[Move],
    timestamp: DateTime<Utc>,
) -> Result<PathBuf, OutputError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(backup_file_name(timestamp));
    let json = serde_json::to_string_pretty(moves)?;
    fs::write(&path, json)?;

    tracing::info!(path = %path.display(), moves = moves.len(), "Saved results backup");
    Ok(path)
}

/// Read a backup written by [`save_results_backup`]
pub fn load_results_backup(path: &Path) -> Result<Vec<Move>, OutputError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write moves to Parquet into `dir`; returns `None` when there is nothing to write
pub fn export_results(
    dir: &Path,
    moves: &[Move],
    timestamp: DateTime<Utc>,
) -> Result<Option<PathBuf>, OutputError> {
    if moves.is_empty() {
        return Ok(None);
    }
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(timestamp));
    write_moves(&path, moves)?;

    tracing::info!(path = %path.display(), moves = moves.len(), "Exported results");
    Ok(Some(path))
}
