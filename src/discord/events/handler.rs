use std::sync::Arc;

use log::{error, info};
use serenity::async_trait;
use serenity::builder::CreateMessage;
use serenity::model::prelude::*;
use serenity::prelude::*;

use crate::beatmap::BeatmapClient;
use crate::config::{BOT_NAME, BOT_VERSION};
use crate::discord::commands::{self, IncomingMessage, ReplyAction};
use crate::logging;
use crate::rate_limit::RateLimiter;

/// Thin boundary between serenity and the dispatcher: builds the
/// `IncomingMessage`, hands it to `commands::handle`, performs the reply I/O.
pub struct EventHandler {
    beatmaps: Arc<BeatmapClient>,
    limiter: RateLimiter,
}

impl EventHandler {
    pub fn new(beatmaps: Arc<BeatmapClient>, limiter: RateLimiter) -> Self {
        Self { beatmaps, limiter }
    }
}

#[async_trait]
impl serenity::client::EventHandler for EventHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        logging::print_banner(&format!("{} {}", BOT_NAME, BOT_VERSION));
        info!("Bot is ready! Logged in as {}", ready.user.name);
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let author_tag = msg.author.tag();
        let incoming = IncomingMessage {
            author_id: msg.author.id.get(),
            author_is_bot: msg.author.bot,
            author_tag: &author_tag,
            content: &msg.content,
        };

        let action = match commands::handle(incoming, self.beatmaps.as_ref(), &self.limiter).await {
            Some(action) => action,
            None => return,
        };

        let result = match action {
            ReplyAction::Text(text) => msg.reply(&ctx.http, text).await.map(|_| ()),
            ReplyAction::Embed(embed) => msg
                .channel_id
                .send_message(
                    &ctx.http,
                    CreateMessage::new().embed(*embed).reference_message(&msg),
                )
                .await
                .map(|_| ()),
        };

        // Send failures must not take down the event loop.
        if let Err(why) = result {
            error!("Failed to reply to {}: {}", author_tag, why);
        }
    }
}
