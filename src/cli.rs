//! Command-line interface definition using clap.

use clap::Parser;

/// Discord bot that replays exported Slack message history into the channel
/// where the import command is invoked.
#[derive(Parser, Debug, Clone)]
#[command(name = "slackport")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    slackport --token <BOT_TOKEN>
    DISCORD_TOKEN=<BOT_TOKEN> slackport
    slackport --prefix '$' --throttle-ms 250

Once connected, invoke `!import_here <path>…` from the destination channel.")]
pub struct Args {
    /// Bot token (prompted for interactively when omitted)
    #[arg(short, long, env = "DISCORD_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Command prefix character
    #[arg(short, long, default_value_t = '!')]
    pub prefix: char,

    /// Delay between message sends, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 100)]
    pub throttle_ms: u64,

    /// Attachment download timeout, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub fetch_timeout_secs: u64,
}
