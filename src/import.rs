//! The import orchestrator.
//!
//! [`Importer::run`] drives the end-to-end sequence for each supplied path:
//! locate export files, resolve the identity tables once, then replay every
//! message of every file into the destination channel in order, throttled,
//! with per-record and per-file failure isolation.
//!
//! Ordering is a correctness requirement: files are processed in sorted-path
//! order, records in stored file order, and each send (message, then its
//! attachments) completes before the next begins. Nothing here runs
//! concurrently with anything else.

use std::path::Path;

use tracing::{error, info, warn};

use crate::config::ImportConfig;
use crate::error::{Result, SlackportError};
use crate::export;
use crate::fetch::AttachmentFetcher;
use crate::identity::{self, IdentityMap};
use crate::record::AuthorRef;
use crate::render;
use crate::session::ChannelSession;

/// Counters accumulated over one import run, reported in the end-of-run
/// summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    /// Export files parsed (or attempted).
    pub files_seen: usize,
    /// Export files abandoned on a file-level error.
    pub files_failed: usize,
    /// Messages delivered to the destination channel.
    pub messages_sent: usize,
    /// Records skipped (validation failure or unresolvable author).
    pub messages_skipped: usize,
    /// Attachments handed to the fetcher.
    pub attachments: usize,
}

impl std::fmt::Display for ImportStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} files ({} failed), {} messages sent, {} skipped, {} attachments",
            self.files_seen,
            self.files_failed,
            self.messages_sent,
            self.messages_skipped,
            self.attachments
        )
    }
}

/// Replays exported message logs into a destination channel.
///
/// One `Importer` owns the run configuration and the attachment fetcher;
/// the destination is injected per run as a [`ChannelSession`].
pub struct Importer {
    config: ImportConfig,
    fetcher: AttachmentFetcher,
}

impl Importer {
    /// Creates an importer from a configuration.
    pub fn new(config: ImportConfig) -> Result<Self> {
        let fetcher = AttachmentFetcher::new(config.fetch_timeout)?;
        Ok(Self { config, fetcher })
    }

    /// Imports every export reachable from `paths`, in the order given, into
    /// the session's channel.
    ///
    /// Always runs to completion: discovery misses skip the path, malformed
    /// files skip the file, invalid records skip the record. The returned
    /// stats describe what actually happened.
    pub async fn run<P: AsRef<Path>>(
        &self,
        session: &dyn ChannelSession,
        paths: &[P],
    ) -> ImportStats {
        let mut stats = ImportStats::default();

        for path in paths {
            let path = path.as_ref();
            info!(
                "Attempting to import '{}' to channel '#{}'",
                path.display(),
                session.channel_name()
            );

            let exports = export::locate(path);
            if exports.is_empty() {
                continue;
            }

            // Identity tables resolve once per path argument, anchored on the
            // first file in discovery order.
            let users = match identity::resolve_users(&exports) {
                Some(map) => {
                    info!("users.json found - attempting to fill @mentions");
                    map
                }
                None => {
                    warn!("No users.json found - @mentions will contain user IDs instead of display names");
                    IdentityMap::new()
                }
            };
            let channels = match identity::resolve_channels(&exports) {
                Some(map) => {
                    info!("channels.json found - attempting to fill #channel references");
                    map
                }
                None => {
                    warn!("No channels.json found - #channel references will contain channel IDs instead of names");
                    IdentityMap::new()
                }
            };

            let mut sorted = exports;
            sorted.sort();

            for file in &sorted {
                stats.files_seen += 1;
                info!("Parsing file: {}", file.display());
                if let Err(e) = self
                    .import_file(session, &users, &channels, file, &mut stats)
                    .await
                {
                    error!("{e}");
                    stats.files_failed += 1;
                }
            }
            info!("Import complete");
        }

        stats
    }

    /// Replays one export file. An error return means the remainder of this
    /// file was abandoned; counters for work already done are kept.
    async fn import_file(
        &self,
        session: &dyn ChannelSession,
        users: &IdentityMap,
        channels: &IdentityMap,
        file: &Path,
        stats: &mut ImportStats,
    ) -> Result<()> {
        let records = export::parse_export(file)?;

        for record in &records {
            let valid = match record.validate() {
                Ok(valid) => valid,
                Err(issue) => {
                    warn!("User information, timestamp, or message text missing ({issue})");
                    stats.messages_skipped += 1;
                    continue;
                }
            };

            let author = match resolve_author(valid.author, users) {
                Ok(author) => author,
                Err(e) => {
                    warn!("{e} - skipping message");
                    stats.messages_skipped += 1;
                    continue;
                }
            };

            let urls: Vec<&str> = valid
                .files
                .iter()
                .filter_map(|f| f.url_private.as_deref())
                .collect();
            let body = render::fill_references(
                valid.text,
                users,
                channels,
                &urls,
                self.config.body_budget(),
            );
            let timestamp = render::format_timestamp(&valid.posted_at);
            let message = render::compose(&author, &timestamp, &body);

            session.send_text(&message).await?;
            for attachment in valid.files {
                self.fetcher.deliver(session, attachment).await;
                stats.attachments += 1;
            }
            stats.messages_sent += 1;
            info!("Imported message: '{message}'");

            tokio::time::sleep(self.config.throttle).await;
        }

        Ok(())
    }
}

/// Resolves an author reference to a display name.
///
/// A bare identifier missing from the user table yields
/// [`SlackportError::UnknownAuthor`]; the record loop turns that into a
/// per-message skip rather than abandoning the file.
fn resolve_author(author: AuthorRef<'_>, users: &IdentityMap) -> Result<String> {
    match author {
        AuthorRef::Profile(profile) => Ok(profile.display().to_string()),
        AuthorRef::Id(id) => users
            .resolve(id)
            .map(str::to_string)
            .ok_or_else(|| SlackportError::unknown_author(id)),
    }
}
