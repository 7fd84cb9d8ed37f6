//! Shared test helpers: an in-memory channel session and export fixtures.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use slackport::error::{Result, SlackportError};
use slackport::session::ChannelSession;

/// One delivery captured by [`RecordingSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Text(String),
    File(String, Vec<u8>),
}

/// A [`ChannelSession`] that records deliveries instead of sending them.
///
/// `fail_next` makes that many upcoming sends return an error, for
/// exercising file-level failure isolation.
#[derive(Default)]
pub struct RecordingSession {
    deliveries: Mutex<Vec<Delivery>>,
    fail_next: AtomicUsize,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next_sends(&self, count: usize) {
        self.fail_next.store(count, Ordering::SeqCst);
    }

    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().unwrap().clone()
    }

    /// Only the text deliveries, in order.
    pub fn texts(&self) -> Vec<String> {
        self.deliveries()
            .into_iter()
            .filter_map(|d| match d {
                Delivery::Text(text) => Some(text),
                Delivery::File(..) => None,
            })
            .collect()
    }

    fn should_fail(&self) -> bool {
        self.fail_next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl ChannelSession for RecordingSession {
    fn channel_name(&self) -> &str {
        "history"
    }

    async fn send_text(&self, text: &str) -> Result<()> {
        if self.should_fail() {
            return Err(SlackportError::send("injected send failure"));
        }
        self.deliveries
            .lock()
            .unwrap()
            .push(Delivery::Text(text.to_string()));
        Ok(())
    }

    async fn send_file(&self, filename: &str, bytes: Vec<u8>) -> Result<()> {
        if self.should_fail() {
            return Err(SlackportError::send("injected send failure"));
        }
        self.deliveries
            .lock()
            .unwrap()
            .push(Delivery::File(filename.to_string(), bytes));
        Ok(())
    }
}

/// Writes an export file under `dir` and returns its path.
pub fn write_export(dir: &Path, name: &str, json: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, json).unwrap();
    path
}

/// A fast configuration for tests: 1 ms throttle, short fetch timeout.
pub fn test_config() -> slackport::config::ImportConfig {
    slackport::config::ImportConfig::new()
        .with_throttle(std::time::Duration::from_millis(1))
        .with_fetch_timeout(std::time::Duration::from_millis(200))
}
