//! Export file discovery and parsing.
//!
//! An export is one JSON document holding an ordered array of message
//! records for a single source channel. [`locate`] resolves a user-supplied
//! path into the concrete set of export files; [`parse_export`] loads one of
//! them.
//!
//! Discovery order is whatever the filesystem yields; the orchestrator sorts
//! paths lexicographically before iterating so runs are reproducible. The
//! *unsorted* first hit is still meaningful: lookup-table discovery anchors
//! on it (see [`crate::identity`]).

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::error::{Result, SlackportError};
use crate::record::MessageRecord;

/// Returns the export files reachable from `path`.
///
/// - A directory yields every direct child file with a `.json` extension
///   (no recursion).
/// - A `.json` file yields itself.
/// - Anything else yields an empty set, with a diagnostic logged. The empty
///   result is informational only; callers skip the path and continue.
pub fn locate(path: &Path) -> Vec<PathBuf> {
    let mut exports = Vec::new();

    if path.is_dir() {
        if let Ok(entries) = fs::read_dir(path) {
            for entry in entries.flatten() {
                let child = entry.path();
                if child.is_file() && has_json_extension(&child) {
                    exports.push(child);
                }
            }
        }
    } else if path.is_file() && has_json_extension(path) {
        exports.push(path.to_path_buf());
    }

    if exports.is_empty() {
        error!("No .json files found at {}", path.display());
    } else {
        info!("{} .json files loaded", exports.len());
    }

    exports
}

fn has_json_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Parses one export file into its stored message sequence.
///
/// The array order is the canonical chronological order and is preserved
/// exactly; timestamps are never used to re-sort.
pub fn parse_export(path: &Path) -> Result<Vec<MessageRecord>> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| SlackportError::export_parse(path, e))
}
