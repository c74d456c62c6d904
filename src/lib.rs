pub mod beatmap;
pub mod config;
pub mod discord;
pub mod error;
pub mod logging;
pub mod rate_limit;

use std::sync::Arc;

use log::info;

use crate::beatmap::BeatmapClient;
use crate::config::Config;
use crate::discord::DiscordClient;
use crate::rate_limit::RateLimiter;

pub async fn init(config: &Config) -> Result<DiscordClient, Box<dyn std::error::Error + Send + Sync>> {
    if !config.is_discord_configured() {
        return Err("Discord token not set. Add it to kozybeat.conf or set DISCORD_TOKEN.".into());
    }

    let beatmaps = Arc::new(BeatmapClient::new()?);
    let limiter = RateLimiter::new();

    let token = config.discord_token.as_deref().ok_or("Discord token not set")?;
    let client = DiscordClient::new(token, beatmaps, limiter).await?;

    Ok(client)
}

pub async fn run(client: DiscordClient) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    info!("Bot is now running. Press Ctrl+C to exit.");

    tokio::select! {
        result = client.start() => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down.");
        }
    }

    info!("Bot has shut down.");
    Ok(())
}
