// src/discord/mod.rs
mod client;
mod commands;
mod embed;
mod events;

pub use client::DiscordClient;
pub use commands::{handle, IncomingMessage, ReplyAction};
