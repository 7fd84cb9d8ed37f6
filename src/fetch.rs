//! Attachment download and re-upload.
//!
//! For each non-image attachment the fetcher downloads the binary from its
//! authenticated URL and re-uploads it to the destination channel. Image
//! attachments are skipped outright: the destination auto-previews the URL
//! already embedded in the rendered text.
//!
//! Failure policy (per attachment, never wider):
//! - non-success HTTP status: a placeholder notice is sent in place of the
//!   file
//! - anything else (network error, timeout): logged and swallowed
//!
//! Delivery is awaited to completion before the caller moves on, preserving
//! strict chronological order.

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::Result;
use crate::record::AttachmentDescriptor;
use crate::session::ChannelSession;

/// Notice sent to the channel when an attachment download returns a
/// non-success status.
pub const DOWNLOAD_FAILED_NOTICE: &str = "Could not download file...";

/// Downloads attachments and re-uploads them through a [`ChannelSession`].
#[derive(Debug, Clone)]
pub struct AttachmentFetcher {
    http: reqwest::Client,
}

impl AttachmentFetcher {
    /// Creates a fetcher with the given per-download timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("slackport"),
        );
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;
        Ok(Self { http })
    }

    /// Delivers one attachment to the session's channel.
    ///
    /// Never returns an error: every failure mode is handled here so the
    /// import loop can keep its place in the message sequence.
    pub async fn deliver(&self, session: &dyn ChannelSession, attachment: &AttachmentDescriptor) {
        if attachment.is_image() {
            debug!("skipping image attachment {}", attachment.filename());
            return;
        }
        let Some(url) = attachment.url_private.as_deref() else {
            warn!("attachment {} has no download URL", attachment.filename());
            return;
        };
        if let Err(e) = self.try_deliver(session, url, attachment.filename()).await {
            warn!("skip downloading file ({e}) url: {url}");
        }
    }

    async fn try_deliver(
        &self,
        session: &dyn ChannelSession,
        url: &str,
        filename: &str,
    ) -> Result<()> {
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return session.send_text(DOWNLOAD_FAILED_NOTICE).await;
        }
        let bytes = response.bytes().await?;
        session.send_file(filename, bytes.to_vec()).await
    }
}
