//! # slackport
//!
//! Discord bot binary: connect to the gateway with a bot token and serve
//! `!import_here` commands.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::ensure;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use slackport::cli::Args;
use slackport::command::CommandRegistry;
use slackport::config::ImportConfig;
use slackport::discord;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let token = match args.token {
        Some(token) => token,
        None => prompt_token()?,
    };

    let config = ImportConfig::new()
        .with_throttle(Duration::from_millis(args.throttle_ms))
        .with_fetch_timeout(Duration::from_secs(args.fetch_timeout_secs));
    let registry = CommandRegistry::with_defaults(args.prefix);

    discord::run_bot(&token, registry, config).await?;
    Ok(())
}

fn prompt_token() -> anyhow::Result<String> {
    print!("Bot token: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let token = line.trim().to_string();
    ensure!(!token.is_empty(), "no bot token provided");
    Ok(token)
}
