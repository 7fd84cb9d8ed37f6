//! Configuration for the import pipeline.
//!
//! [`ImportConfig`] collects the knobs the orchestrator and transformer share:
//! the destination transport's hard message limit, the safety margin reserved
//! below it, the inter-message throttle, and the attachment fetch timeout.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use slackport::config::ImportConfig;
//!
//! let config = ImportConfig::new()
//!     .with_throttle(Duration::from_millis(250));
//!
//! assert_eq!(config.body_budget(), 1940);
//! ```

use std::time::Duration;

/// Configuration for one import run.
///
/// The defaults match Discord's 2000-character message limit with a
/// 60-character safety margin and a 100 ms send throttle.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Hard maximum message size enforced by the destination transport.
    pub max_message_len: usize,

    /// Characters reserved below the hard limit for the author/timestamp
    /// header composed around the rendered body.
    pub safety_margin: usize,

    /// Fixed pause between successive message deliveries.
    pub throttle: Duration,

    /// Timeout for a single attachment download.
    pub fetch_timeout: Duration,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_message_len: 2000,
            safety_margin: 60,
            throttle: Duration::from_millis(100),
            fetch_timeout: Duration::from_secs(30),
        }
    }
}

impl ImportConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective character budget for "body + attachment block" combined.
    pub fn body_budget(&self) -> usize {
        self.max_message_len.saturating_sub(self.safety_margin)
    }

    /// Sets the inter-message throttle delay.
    #[must_use]
    pub fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    /// Sets the attachment download timeout.
    #[must_use]
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Sets the destination transport's hard message limit.
    #[must_use]
    pub fn with_max_message_len(mut self, len: usize) -> Self {
        self.max_message_len = len;
        self
    }

    /// Sets the safety margin reserved below the hard limit.
    #[must_use]
    pub fn with_safety_margin(mut self, margin: usize) -> Self {
        self.safety_margin = margin;
        self
    }
}
