//! Discord gateway adapter.
//!
//! Implements [`ChannelSession`] over serenity's HTTP client and hosts the
//! gateway event handler that turns `!import_here <paths…>` messages into
//! import runs. Everything above this module is gateway-agnostic.

use std::sync::Arc;

use async_trait::async_trait;
use serenity::builder::{CreateAttachment, CreateMessage};
use serenity::client::{Client, Context, EventHandler};
use serenity::http::Http;
use serenity::model::channel::Message;
use serenity::model::gateway::{GatewayIntents, Ready};
use serenity::model::id::ChannelId;
use tracing::{error, info, warn};

use crate::command::{Command, CommandRegistry};
use crate::config::ImportConfig;
use crate::error::Result;
use crate::import::Importer;
use crate::session::ChannelSession;

/// A [`ChannelSession`] bound to one Discord channel.
pub struct DiscordSession {
    http: Arc<Http>,
    channel_id: ChannelId,
    channel_name: String,
}

impl DiscordSession {
    /// Creates a session for the given channel.
    pub fn new(http: Arc<Http>, channel_id: ChannelId, channel_name: String) -> Self {
        Self {
            http,
            channel_id,
            channel_name,
        }
    }
}

#[async_trait]
impl ChannelSession for DiscordSession {
    fn channel_name(&self) -> &str {
        &self.channel_name
    }

    async fn send_text(&self, text: &str) -> Result<()> {
        self.channel_id.say(self.http.as_ref(), text).await?;
        Ok(())
    }

    async fn send_file(&self, filename: &str, bytes: Vec<u8>) -> Result<()> {
        let attachment = CreateAttachment::bytes(bytes, filename);
        self.channel_id
            .send_files(self.http.as_ref(), [attachment], CreateMessage::new())
            .await?;
        Ok(())
    }
}

struct Handler {
    registry: CommandRegistry,
    config: ImportConfig,
}

impl Handler {
    async fn import_here(&self, ctx: &Context, msg: &Message, paths: &[String]) {
        if paths.is_empty() {
            warn!("import_here invoked without any paths");
            return;
        }

        let channel_name = msg
            .channel_id
            .name(ctx)
            .await
            .unwrap_or_else(|_| msg.channel_id.to_string());
        let session = DiscordSession::new(ctx.http.clone(), msg.channel_id, channel_name);

        let importer = match Importer::new(self.config.clone()) {
            Ok(importer) => importer,
            Err(e) => {
                error!("Could not start import: {e}");
                return;
            }
        };

        let stats = importer.run(&session, paths).await;
        info!("Import finished: {stats}");
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("Connected as {}", ready.user.name);
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        let Some(invocation) = self.registry.parse(&msg.content) else {
            return;
        };
        match invocation.command {
            Command::ImportHere => self.import_here(&ctx, &msg, &invocation.args).await,
        }
    }
}

/// Connects to the gateway and serves commands until the process is stopped.
pub async fn run_bot(token: &str, registry: CommandRegistry, config: ImportConfig) -> Result<()> {
    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(token, intents)
        .event_handler(Handler { registry, config })
        .await?;
    client.start().await?;
    Ok(())
}
