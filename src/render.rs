//! Message rendering: reference substitution, truncation, and header
//! formatting.
//!
//! [`fill_references`] is a single deterministic pass with a fixed step
//! order, applied even when the identity maps are empty:
//!
//! 1. Replace `<@U…>` tokens via the user map and `<#C…>` tokens via the
//!    channel map. Tokens with no matching entry stay verbatim.
//! 2. Build the attachment block: every URL prefixed with a newline.
//! 3. Truncate the substituted body so body + block fit the character
//!    budget (hard cut, no word-boundary awareness).
//! 4. Join body and block, stripping leading/trailing newlines.
//!
//! If the attachment block alone exceeds the budget, the body truncates to
//! empty and the block is delivered intact. Degraded, but deterministic.

use chrono::{DateTime, Local};

use crate::identity::IdentityMap;

/// Renders the final display text for one message body.
///
/// `body_budget` is the combined character budget for body plus attachment
/// block, normally [`ImportConfig::body_budget`](crate::config::ImportConfig::body_budget).
pub fn fill_references(
    text: &str,
    users: &IdentityMap,
    channels: &IdentityMap,
    attachment_urls: &[&str],
    body_budget: usize,
) -> String {
    let mut body = text.to_string();
    for (id, name) in users.iter() {
        body = body.replace(&format!("<@{id}>"), &format!("@{name}"));
    }
    for (id, name) in channels.iter() {
        body = body.replace(&format!("<#{id}>"), &format!("#{name}"));
    }

    let mut block = String::new();
    for url in attachment_urls {
        block.push('\n');
        block.push_str(url);
    }

    let limit = body_budget.saturating_sub(block.chars().count());
    let truncated: String = body.chars().take(limit).collect();

    let joined = format!("{truncated}\n{block}");
    joined.trim_matches('\n').to_string()
}

/// Formats a post time as `MM/DD/YYYY at HH:MM:SS` in local time.
pub fn format_timestamp(posted_at: &DateTime<Local>) -> String {
    posted_at.format("%m/%d/%Y at %H:%M:%S").to_string()
}

/// Composes the delivered message: bold author, italic timestamp, body.
pub fn compose(author: &str, timestamp: &str, body: &str) -> String {
    format!("**{author}** *({timestamp})*\n{body}")
}
