//! Identity lookup tables for users and channels.
//!
//! Slack exports ship optional companion files next to (or one level above)
//! the per-channel message logs:
//!
//! - `users.json` — array of `{id, profile: {display_name, real_name}}`
//! - `channels.json` — array of `{id, name}`
//!
//! Each resolves into an [`IdentityMap`] from stable identifier to display
//! string. Either table may be absent or unparseable; that degrades the run
//! (raw identifiers stay in the output) but never fails it, and the two
//! tables degrade independently.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, error, info};

use crate::record::UserProfile;

/// Mapping from a stable identifier to a display string.
///
/// Built once per import path and read-only afterwards. The `Default` value
/// (an empty map) is what the orchestrator substitutes when a lookup table
/// is unavailable.
#[derive(Debug, Clone, Default)]
pub struct IdentityMap {
    entries: HashMap<String, String>,
}

impl IdentityMap {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a mapping. A later duplicate identifier overwrites an earlier
    /// one (last-write-wins).
    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.entries.insert(id.into(), name.into());
    }

    /// Looks up the display string for an identifier.
    pub fn resolve(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    /// Returns the number of known identifiers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no identifiers are known.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(identifier, display)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[derive(Debug, Deserialize)]
struct UserEntry {
    id: String,
    profile: UserProfile,
}

#[derive(Debug, Deserialize)]
struct ChannelEntry {
    id: String,
    name: String,
}

/// Builds the user identity mapping for a set of export files.
///
/// Returns `None` ("unavailable") when no `users.json` exists near the first
/// export file or the file does not parse. Partial mappings are never
/// produced.
pub fn resolve_users(exports: &[PathBuf]) -> Option<IdentityMap> {
    info!("Attempting to locate users.json");
    let path = find_lookup_file(exports, "users.json")?;

    let entries: Vec<UserEntry> = match read_table(&path) {
        Ok(entries) => entries,
        Err(e) => {
            error!("Unable to load display names: {e}");
            return None;
        }
    };

    let mut map = IdentityMap::new();
    for user in entries {
        let display_name = user.profile.display().to_string();
        debug!("User ID: {} -> Display Name: {}", user.id, display_name);
        map.insert(user.id, display_name);
    }
    Some(map)
}

/// Builds the channel identity mapping for a set of export files.
///
/// Same discovery and failure rules as [`resolve_users`], reading
/// `channels.json`; the two tables resolve independently.
pub fn resolve_channels(exports: &[PathBuf]) -> Option<IdentityMap> {
    info!("Attempting to locate channels.json");
    let path = find_lookup_file(exports, "channels.json")?;

    let entries: Vec<ChannelEntry> = match read_table(&path) {
        Ok(entries) => entries,
        Err(e) => {
            error!("Unable to load channel names: {e}");
            return None;
        }
    };

    let mut map = IdentityMap::new();
    for channel in entries {
        debug!("Channel ID: {} -> Channel Name: {}", channel.id, channel.name);
        map.insert(channel.id, channel.name);
    }
    Some(map)
}

/// Walks upward from the first export file's directory, checking at most two
/// levels (the directory itself, then its parent). First match wins.
fn find_lookup_file(exports: &[PathBuf], file_name: &str) -> Option<PathBuf> {
    let first = exports.first()?;
    let dir = first.parent()?;

    let sibling = dir.join(file_name);
    if sibling.is_file() {
        return Some(sibling);
    }

    if let Some(parent) = dir.parent() {
        let above = parent.join(file_name);
        if above.is_file() {
            return Some(above);
        }
    }

    error!("Unable to locate {file_name}");
    None
}

fn read_table<T: serde::de::DeserializeOwned>(path: &Path) -> crate::error::Result<Vec<T>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn export_in(dir: &Path) -> Vec<PathBuf> {
        let file = dir.join("2021-01-01.json");
        fs::write(&file, "[]").unwrap();
        vec![file]
    }

    #[test]
    fn test_users_in_same_directory() {
        let dir = tempfile::tempdir().unwrap();
        let exports = export_in(dir.path());
        fs::write(
            dir.path().join("users.json"),
            r#"[{"id": "U1", "profile": {"display_name": "alice", "real_name": "Alice L."}}]"#,
        )
        .unwrap();

        let map = resolve_users(&exports).unwrap();
        assert_eq!(map.resolve("U1"), Some("alice"));
    }

    #[test]
    fn test_users_in_parent_directory() {
        let root = tempfile::tempdir().unwrap();
        let channel_dir = root.path().join("general");
        fs::create_dir(&channel_dir).unwrap();
        let exports = export_in(&channel_dir);
        fs::write(
            root.path().join("users.json"),
            r#"[{"id": "U1", "profile": {"display_name": "alice", "real_name": ""}}]"#,
        )
        .unwrap();

        let map = resolve_users(&exports).unwrap();
        assert_eq!(map.resolve("U1"), Some("alice"));
    }

    #[test]
    fn test_sibling_wins_over_parent() {
        let root = tempfile::tempdir().unwrap();
        let channel_dir = root.path().join("general");
        fs::create_dir(&channel_dir).unwrap();
        let exports = export_in(&channel_dir);
        fs::write(
            channel_dir.join("users.json"),
            r#"[{"id": "U1", "profile": {"display_name": "near", "real_name": ""}}]"#,
        )
        .unwrap();
        fs::write(
            root.path().join("users.json"),
            r#"[{"id": "U1", "profile": {"display_name": "far", "real_name": ""}}]"#,
        )
        .unwrap();

        let map = resolve_users(&exports).unwrap();
        assert_eq!(map.resolve("U1"), Some("near"));
    }

    #[test]
    fn test_missing_table_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let exports = export_in(dir.path());
        assert!(resolve_users(&exports).is_none());
        assert!(resolve_channels(&exports).is_none());
    }

    #[test]
    fn test_display_name_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let exports = export_in(dir.path());
        fs::write(
            dir.path().join("users.json"),
            r#"[{"id": "U1", "profile": {"display_name": "", "real_name": "Alice L."}}]"#,
        )
        .unwrap();

        let map = resolve_users(&exports).unwrap();
        assert_eq!(map.resolve("U1"), Some("Alice L."));
    }

    #[test]
    fn test_last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let exports = export_in(dir.path());
        fs::write(
            dir.path().join("users.json"),
            r#"[
                {"id": "U1", "profile": {"display_name": "old", "real_name": ""}},
                {"id": "U1", "profile": {"display_name": "new", "real_name": ""}}
            ]"#,
        )
        .unwrap();

        let map = resolve_users(&exports).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.resolve("U1"), Some("new"));
    }

    #[test]
    fn test_malformed_table_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let exports = export_in(dir.path());
        fs::write(dir.path().join("users.json"), "{oops").unwrap();
        assert!(resolve_users(&exports).is_none());
    }

    #[test]
    fn test_missing_fields_fail_whole_table() {
        let dir = tempfile::tempdir().unwrap();
        let exports = export_in(dir.path());
        // Second entry has no profile: the whole table is rejected, not trimmed
        fs::write(
            dir.path().join("users.json"),
            r#"[
                {"id": "U1", "profile": {"display_name": "alice", "real_name": ""}},
                {"id": "U2"}
            ]"#,
        )
        .unwrap();
        assert!(resolve_users(&exports).is_none());
    }

    #[test]
    fn test_tables_resolve_independently() {
        let dir = tempfile::tempdir().unwrap();
        let exports = export_in(dir.path());
        fs::write(dir.path().join("users.json"), "{oops").unwrap();
        fs::write(
            dir.path().join("channels.json"),
            r#"[{"id": "C1", "name": "general"}]"#,
        )
        .unwrap();

        assert!(resolve_users(&exports).is_none());
        let channels = resolve_channels(&exports).unwrap();
        assert_eq!(channels.resolve("C1"), Some("general"));
    }

    #[test]
    fn test_channels_table() {
        let dir = tempfile::tempdir().unwrap();
        let exports = export_in(dir.path());
        fs::write(
            dir.path().join("channels.json"),
            r#"[{"id": "C1", "name": "general"}, {"id": "C2", "name": "random"}]"#,
        )
        .unwrap();

        let map = resolve_channels(&exports).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.resolve("C2"), Some("random"));
    }

    #[test]
    fn test_no_exports_no_table() {
        assert!(resolve_users(&[]).is_none());
    }
}
