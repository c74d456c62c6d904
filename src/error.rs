use thiserror::Error;

/// Everything a `!bm` command can fail with. The display strings double as
/// the user-facing reply text, so changing them changes what users see.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Beatmap not found")]
    NotFound,

    #[error("Failed to get beatmap info - {0}")]
    FetchFailed(String),

    #[error("Failed to search beatmaps - {0}")]
    SearchFailed(String),

    #[error("You are being rate limited. Please wait a minute before trying again.")]
    RateLimited,

    #[error("Invalid command format. Use:\n!bm <beatmapset_id>\n!bm \"beatmap name\"")]
    InvalidFormat,

    #[error("Please provide a search query between quotes. Example: !bm \"song name\"")]
    EmptyQuery,
}
