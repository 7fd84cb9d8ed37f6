//! Raw message records as they appear in a Slack export file.
//!
//! An export file is a JSON array of loosely-shaped message objects. This
//! module provides the serde shapes for those objects plus [`validate`]
//! (see [`MessageRecord::validate`]), which turns a raw record into a
//! [`ValidRecord`] or a tagged [`RecordIssue`] explaining why it must be
//! skipped. Validation is a value, not an exception: a bad record never
//! aborts anything beyond itself.

use chrono::{DateTime, Local, TimeZone};
use serde::Deserialize;

/// One exported chat message, as found in the JSON log.
///
/// Every field is optional at the serde level; [`validate`](Self::validate)
/// enforces the real requirements (timestamp, text, and some author
/// reference).
#[derive(Debug, Clone, Deserialize)]
pub struct MessageRecord {
    /// Seconds since epoch, encoded as text or number depending on exporter.
    pub ts: Option<Epoch>,

    /// Raw message body. May contain `<@U…>` / `<#C…>` reference tokens.
    pub text: Option<String>,

    /// Bare author identifier, requiring a user-table lookup.
    pub user: Option<String>,

    /// Inline author profile, taking precedence over the bare identifier.
    pub user_profile: Option<UserProfile>,

    /// Attachment descriptors, if the message carried files.
    #[serde(default)]
    pub files: Vec<AttachmentDescriptor>,
}

/// Epoch timestamp that exporters write as either `"1609459200.000200"` or a
/// plain JSON number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Epoch {
    /// Timestamp as text
    Text(String),
    /// Timestamp as JSON number
    Number(f64),
}

impl Epoch {
    /// Returns the value as fractional seconds since epoch, if parseable.
    pub fn seconds(&self) -> Option<f64> {
        let secs = match self {
            Epoch::Text(s) => s.trim().parse::<f64>().ok()?,
            Epoch::Number(n) => *n,
        };
        secs.is_finite().then_some(secs)
    }
}

/// Inline author profile embedded in a message record.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    /// Preferred display name; may be empty.
    #[serde(default)]
    pub display_name: String,

    /// Fallback when `display_name` is empty.
    #[serde(default)]
    pub real_name: String,
}

impl UserProfile {
    /// The name to show for this author: `display_name`, falling back to
    /// `real_name` when the display name is empty.
    pub fn display(&self) -> &str {
        if self.display_name.is_empty() {
            &self.real_name
        } else {
            &self.display_name
        }
    }
}

/// Metadata for one file attached to an exported message.
///
/// Ephemeral: only lives for the duration of one message's processing.
#[derive(Debug, Clone, Deserialize)]
pub struct AttachmentDescriptor {
    /// Authenticated download location.
    pub url_private: Option<String>,

    /// Target filename for re-upload.
    pub name: Option<String>,

    /// MIME type, used only to detect image content.
    pub mimetype: Option<String>,
}

impl AttachmentDescriptor {
    /// Returns `true` for image-typed attachments, which are skipped by the
    /// fetcher (the destination auto-previews the URL already present in the
    /// rendered text).
    pub fn is_image(&self) -> bool {
        self.mimetype.as_deref().is_some_and(|m| m.contains("image"))
    }

    /// Filename to upload under: the declared name, else the last path
    /// segment of the download URL, else a generic placeholder.
    pub fn filename(&self) -> &str {
        if let Some(name) = self.name.as_deref() {
            return name;
        }
        self.url_private
            .as_deref()
            .and_then(|url| url.rsplit('/').next())
            .filter(|tail| !tail.is_empty())
            .unwrap_or("attachment")
    }
}

/// Author reference carried by a valid record.
#[derive(Debug, Clone, Copy)]
pub enum AuthorRef<'a> {
    /// Inline profile object; no lookup needed.
    Profile(&'a UserProfile),
    /// Bare user identifier; resolved against the user table.
    Id(&'a str),
}

/// A message record that passed validation.
#[derive(Debug, Clone)]
pub struct ValidRecord<'a> {
    /// Original post time, in the local timezone.
    pub posted_at: DateTime<Local>,
    /// Raw body text (reference tokens not yet substituted).
    pub text: &'a str,
    /// Author reference to resolve into a display name.
    pub author: AuthorRef<'a>,
    /// Attachments to deliver after the message body.
    pub files: &'a [AttachmentDescriptor],
}

/// Why a record failed validation and must be skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordIssue {
    /// No `ts` field.
    MissingTimestamp,
    /// `ts` present but not a representable point in time.
    BadTimestamp,
    /// No `text` field.
    MissingText,
    /// Neither an inline profile nor a bare user identifier.
    MissingAuthor,
}

impl std::fmt::Display for RecordIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordIssue::MissingTimestamp => write!(f, "missing timestamp"),
            RecordIssue::BadTimestamp => write!(f, "unreadable timestamp"),
            RecordIssue::MissingText => write!(f, "missing message text"),
            RecordIssue::MissingAuthor => write!(f, "missing author reference"),
        }
    }
}

impl MessageRecord {
    /// Checks the record invariant: `ts`, `text`, and one author reference
    /// must all be present, and `ts` must denote a real point in time.
    pub fn validate(&self) -> Result<ValidRecord<'_>, RecordIssue> {
        let secs = self
            .ts
            .as_ref()
            .ok_or(RecordIssue::MissingTimestamp)?
            .seconds()
            .ok_or(RecordIssue::BadTimestamp)?;

        let posted_at = epoch_to_local(secs).ok_or(RecordIssue::BadTimestamp)?;

        let text = self.text.as_deref().ok_or(RecordIssue::MissingText)?;

        let author = if let Some(profile) = &self.user_profile {
            AuthorRef::Profile(profile)
        } else if let Some(id) = self.user.as_deref() {
            AuthorRef::Id(id)
        } else {
            return Err(RecordIssue::MissingAuthor);
        };

        Ok(ValidRecord {
            posted_at,
            text,
            author,
            files: self.files.as_slice(),
        })
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn epoch_to_local(secs: f64) -> Option<DateTime<Local>> {
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1_000_000_000.0) as u32;
    Local.timestamp_opt(whole as i64, nanos).earliest()
}
