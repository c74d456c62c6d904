use std::sync::Arc;

use log::info;
use serenity::prelude::*;
use tokio::sync::Mutex;

use crate::beatmap::BeatmapClient;
use crate::rate_limit::RateLimiter;

use super::events::EventHandler;

pub struct DiscordClient {
    client: Arc<Mutex<Option<Client>>>,
}

impl DiscordClient {
    pub async fn new(
        token: &str,
        beatmaps: Arc<BeatmapClient>,
        limiter: RateLimiter,
    ) -> Result<Self, serenity::Error> {
        let intents = GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT;

        let client = Client::builder(token, intents)
            .event_handler(EventHandler::new(beatmaps, limiter))
            .await?;

        info!("Discord client initialized successfully.");

        Ok(Self {
            client: Arc::new(Mutex::new(Some(client))),
        })
    }

    /// Connects to the gateway and runs until the connection ends. A login
    /// failure surfaces here as the error that terminates the process.
    pub async fn start(&self) -> Result<(), serenity::Error> {
        let mut client_guard = self.client.lock().await;
        if let Some(mut client) = client_guard.take() {
            client.start().await?;
            *client_guard = Some(client);
            Ok(())
        } else {
            Err(serenity::Error::Other("Discord client has already been started"))
        }
    }
}
