mod client;
mod models;

pub use client::{background_preview_url, download_urls, BeatmapClient, BeatmapLookup, DownloadUrls};
pub use models::{Beatmap, BeatmapSet, Covers, NamedEntry};
