use log::{info, warn};
use serenity::builder::CreateEmbed;

use crate::beatmap::BeatmapLookup;
use crate::config::COMMAND_PREFIX;
use crate::discord::embed::beatmap_embed;
use crate::error::CommandError;
use crate::rate_limit::RateLimiter;

/// The slice of a Discord message the dispatcher needs.
pub struct IncomingMessage<'a> {
    pub author_id: u64,
    pub author_is_bot: bool,
    pub author_tag: &'a str,
    pub content: &'a str,
}

/// What the platform adapter should send back, if anything.
pub enum ReplyAction {
    Text(String),
    Embed(Box<CreateEmbed>),
}

enum Command<'a> {
    IdLookup(&'a str),
    Search(&'a str),
    Invalid,
}

fn parse(args: &str) -> Command<'_> {
    if !args.is_empty() && args.bytes().all(|b| b.is_ascii_digit()) {
        return Command::IdLookup(args);
    }
    // A lone `"` is not a matching pair.
    if args.len() >= 2 && args.starts_with('"') && args.ends_with('"') {
        return Command::Search(&args[1..args.len() - 1]);
    }
    Command::Invalid
}

/// Processes one message. `None` means stay silent: the author is a bot or
/// the message is not a `!bm` command. Every other outcome, including every
/// failure, becomes a reply; the event loop never sees an error.
pub async fn handle(
    msg: IncomingMessage<'_>,
    lookup: &dyn BeatmapLookup,
    limiter: &RateLimiter,
) -> Option<ReplyAction> {
    if msg.author_is_bot || !msg.content.starts_with(COMMAND_PREFIX) {
        return None;
    }

    if !limiter.check(msg.author_id) {
        return Some(ReplyAction::Text(CommandError::RateLimited.to_string()));
    }

    let args = msg.content[COMMAND_PREFIX.len()..].trim();
    info!("Processing command from {}: {}", msg.author_tag, msg.content);

    let outcome = match parse(args) {
        Command::IdLookup(id) => id_lookup(id, msg.author_tag, lookup).await,
        Command::Search(query) => search(query, msg.author_tag, lookup).await,
        Command::Invalid => {
            warn!("Invalid command format from {}: {}", msg.author_tag, msg.content);
            Err(CommandError::InvalidFormat)
        }
    };

    Some(match outcome {
        Ok(action) => action,
        // Usage problems read as instructions, remote failures as errors.
        Err(err @ (CommandError::InvalidFormat | CommandError::EmptyQuery)) => {
            ReplyAction::Text(err.to_string())
        }
        Err(err) => ReplyAction::Text(format!("Error: {}", err)),
    })
}

async fn id_lookup(
    id: &str,
    author_tag: &str,
    lookup: &dyn BeatmapLookup,
) -> Result<ReplyAction, CommandError> {
    let set = lookup.beatmapset(id).await?;
    info!("Sending beatmap info for ID {} to {}", id, author_tag);
    Ok(ReplyAction::Embed(Box::new(beatmap_embed(&set))))
}

async fn search(
    query: &str,
    author_tag: &str,
    lookup: &dyn BeatmapLookup,
) -> Result<ReplyAction, CommandError> {
    if query.is_empty() {
        warn!("Empty search query from {}", author_tag);
        return Err(CommandError::EmptyQuery);
    }

    let results = lookup.search(query).await?;
    let set = match results.first() {
        Some(set) => set,
        None => {
            return Ok(ReplyAction::Text(
                "No beatmaps found matching your search.".to_string(),
            ))
        }
    };

    info!("Sending search results for \"{}\" to {}", query, author_tag);
    Ok(ReplyAction::Embed(Box::new(beatmap_embed(set))))
}
