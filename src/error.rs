//! Unified error types for slackport.
//!
//! This module provides a single [`SlackportError`] enum that covers all error
//! cases in the library.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **Developers** get source error chains for debugging
//!
//! Note that a malformed message *record* is not an error: record validation
//! returns a tagged [`RecordIssue`](crate::record::RecordIssue) value that the
//! import loop consumes, because a bad record only ever skips that record.
//! Errors in this module are the conditions that abort a whole export file or
//! the surrounding operation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for slackport operations.
///
/// # Example
///
/// ```rust
/// use slackport::error::Result;
///
/// fn my_function() -> Result<Vec<String>> {
///     // ... operations that may fail
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, SlackportError>;

/// The error type for all slackport operations.
///
/// Each variant contains context about what went wrong and, where applicable,
/// the underlying source error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SlackportError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - An export file or lookup table cannot be read
    /// - Permission denied on an export directory
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// An export file is not a well-formed JSON message log.
    ///
    /// Contains the file path and the underlying decode error. This is the
    /// file-level failure unit: the import run logs it and moves on to the
    /// next export file.
    #[error("Failed to parse export file {}: {source}", path.display())]
    Parse {
        /// Path of the export file being parsed
        path: PathBuf,
        /// The underlying decode error
        #[source]
        source: serde_json::Error,
    },

    /// JSON decode error outside of an export file (lookup tables, payloads).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP error while downloading an attachment.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A message referenced a bare user id with no entry in the user table.
    ///
    /// The import loop treats this as a per-message skip, never a run abort.
    #[error("No display name known for user id '{id}'")]
    UnknownAuthor {
        /// The unresolved user identifier
        id: String,
    },

    /// Delivery to the destination channel failed.
    #[cfg(feature = "bot")]
    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),

    /// Delivery to the destination channel failed (non-gateway sessions).
    ///
    /// Used by [`ChannelSession`](crate::session::ChannelSession)
    /// implementations that are not backed by serenity.
    #[error("Send failed: {0}")]
    Send(String),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl SlackportError {
    /// Creates a parse error for an export file.
    pub fn export_parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        SlackportError::Parse {
            path: path.into(),
            source,
        }
    }

    /// Creates an unknown-author error for a bare user id.
    pub fn unknown_author(id: impl Into<String>) -> Self {
        SlackportError::UnknownAuthor { id: id.into() }
    }

    /// Creates a send error with a free-form reason.
    pub fn send(reason: impl Into<String>) -> Self {
        SlackportError::Send(reason.into())
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, SlackportError::Io(_))
    }

    /// Returns `true` if this is an export-file parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, SlackportError::Parse { .. })
    }

    /// Returns `true` if this is an unknown-author error.
    pub fn is_unknown_author(&self) -> bool {
        matches!(self, SlackportError::UnknownAuthor { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = SlackportError::from(io_err);
        let display = err.to_string();
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_parse_error_display() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err = SlackportError::export_parse("/archive/general/2021-01-01.json", json_err);
        let display = err.to_string();
        assert!(display.contains("/archive/general/2021-01-01.json"));
        assert!(err.is_parse());
    }

    #[test]
    fn test_unknown_author_display() {
        let err = SlackportError::unknown_author("U999");
        assert!(err.to_string().contains("U999"));
        assert!(err.is_unknown_author());
        assert!(!err.is_io());
    }

    #[test]
    fn test_send_error_display() {
        let err = SlackportError::send("channel gone");
        assert!(err.to_string().contains("channel gone"));
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = SlackportError::export_parse("bad.json", json_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_is_methods() {
        let io_err = SlackportError::Io(io::Error::new(io::ErrorKind::NotFound, ""));
        assert!(io_err.is_io());
        assert!(!io_err.is_parse());
        assert!(!io_err.is_unknown_author());
    }
}
