//! # Slackport
//!
//! Replay exported Slack message history into a live Discord channel.
//!
//! ## Overview
//!
//! A Slack workspace export is a directory tree of per-channel JSON message
//! logs, with optional `users.json` / `channels.json` identity tables beside
//! or above them. Slackport walks that structure and replays every message
//! into a destination channel in chronological order:
//!
//! - human-readable author names (inline profiles, with user-table fallback)
//! - `<@U…>` / `<#C…>` reference tokens substituted with display names
//! - file attachments downloaded and re-uploaded (images skipped — the
//!   destination previews their URLs on its own)
//! - bodies truncated to the destination's message-size budget
//! - a fixed delay between sends to respect rate limits
//!
//! Partially-missing metadata degrades the output but never aborts the run:
//! a bad record skips that record, a malformed file skips that file, a
//! missing identity table leaves raw identifiers in place.
//!
//! ## Quick Start
//!
//! The `slackport` binary (feature `bot`, on by default) connects to Discord
//! and serves `!import_here <path>…` from any channel. As a library, inject
//! your own [`ChannelSession`](session::ChannelSession):
//!
//! ```rust,no_run
//! use slackport::prelude::*;
//!
//! # async fn demo(session: &dyn ChannelSession) -> slackport::Result<()> {
//! let importer = Importer::new(ImportConfig::new())?;
//! let stats = importer.run(session, &["./export/general"]).await;
//! println!("{stats}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - [`import`] — orchestrator ([`Importer`](import::Importer),
//!   [`ImportStats`](import::ImportStats))
//! - [`export`] — export-file discovery and parsing
//! - [`identity`] — `users.json` / `channels.json` lookup tables
//! - [`record`] — raw message records and validation
//! - [`render`] — reference substitution, truncation, header formatting
//! - [`fetch`] — attachment download and re-upload
//! - [`session`] — destination channel boundary (injected)
//! - [`command`] — command word → handler dispatch table
//! - [`config`] — run configuration
//! - [`error`] — unified error types ([`SlackportError`], [`Result`])
//! - [`discord`], [`cli`] — gateway adapter and binary surface (`bot`
//!   feature)

pub mod command;
pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod identity;
pub mod import;
pub mod record;
pub mod render;
pub mod session;

#[cfg(feature = "bot")]
pub mod cli;
#[cfg(feature = "bot")]
pub mod discord;

// Re-export the main types at the crate root for convenience
pub use error::{Result, SlackportError};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use slackport::prelude::*;
/// ```
pub mod prelude {
    pub use crate::command::{Command, CommandRegistry, Invocation};
    pub use crate::config::ImportConfig;
    pub use crate::error::{Result, SlackportError};
    pub use crate::fetch::AttachmentFetcher;
    pub use crate::identity::IdentityMap;
    pub use crate::import::{ImportStats, Importer};
    pub use crate::record::{AttachmentDescriptor, MessageRecord, RecordIssue};
    pub use crate::session::ChannelSession;
}
