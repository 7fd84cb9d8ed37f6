//! Destination channel boundary.
//!
//! The import pipeline never talks to a chat backend directly. It drives a
//! [`ChannelSession`]: an explicitly constructed, injected handle bound to
//! one destination channel. The gateway-backed implementation lives in
//! [`crate::discord`] (behind the `bot` feature); tests inject in-memory
//! recorders.

use async_trait::async_trait;

use crate::error::Result;

/// An authenticated handle to one destination channel.
///
/// Both send operations await actual delivery; the caller relies on that to
/// preserve strict chronological order.
#[async_trait]
pub trait ChannelSession: Send + Sync {
    /// Destination channel name, used only for logging.
    fn channel_name(&self) -> &str;

    /// Delivers a text message to the channel.
    async fn send_text(&self, text: &str) -> Result<()>;

    /// Uploads a file to the channel under the given name.
    async fn send_file(&self, filename: &str, bytes: Vec<u8>) -> Result<()>;
}
