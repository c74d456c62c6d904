use async_trait::async_trait;
use log::{error, info, warn};
use reqwest::{Client, StatusCode};

use crate::config::{API_BASE_URL, BOT_NAME, BOT_VERSION, SEARCH_LIMIT, VALID_STATUSES};
use crate::error::CommandError;

use super::models::BeatmapSet;

pub struct DownloadUrls {
    pub with_video: String,
    pub without_video: String,
}

/// Mirror URL for a set's background image. Pure templating, no request.
pub fn background_preview_url(beatmapset_id: u64) -> String {
    format!("{}/preview/background/{}", API_BASE_URL, beatmapset_id)
}

/// Mirror download URLs; the `n` suffix requests the no-video archive.
pub fn download_urls(beatmapset_id: u64) -> DownloadUrls {
    DownloadUrls {
        with_video: format!("{}/d/{}", API_BASE_URL, beatmapset_id),
        without_video: format!("{}/d/{}n", API_BASE_URL, beatmapset_id),
    }
}

/// The two remote reads the dispatcher performs.
#[async_trait]
pub trait BeatmapLookup: Send + Sync {
    async fn beatmapset(&self, id: &str) -> Result<BeatmapSet, CommandError>;
    async fn search(&self, query: &str) -> Result<Vec<BeatmapSet>, CommandError>;
}

pub struct BeatmapClient {
    client: Client,
}

impl BeatmapClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(format!("{} {}", BOT_NAME, BOT_VERSION))
            .build()?;

        Ok(BeatmapClient { client })
    }
}

#[async_trait]
impl BeatmapLookup for BeatmapClient {
    async fn beatmapset(&self, id: &str) -> Result<BeatmapSet, CommandError> {
        info!("Fetching info for beatmap set {}", id);

        let response = self
            .client
            .get(format!("{}/api/v2/s/{}", API_BASE_URL, id))
            .send()
            .await
            .map_err(|e| {
                error!("Failed to get info for beatmap set {}: {}", id, e);
                CommandError::FetchFailed(e.to_string())
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            error!("Beatmap set {} not found", id);
            return Err(CommandError::NotFound);
        }

        let response = response.error_for_status().map_err(|e| {
            error!("Failed to get info for beatmap set {}: {}", id, e);
            CommandError::FetchFailed(e.to_string())
        })?;

        let set = response.json::<BeatmapSet>().await.map_err(|e| {
            error!("Failed to decode beatmap set {}: {}", id, e);
            CommandError::FetchFailed(e.to_string())
        })?;

        info!("Retrieved info for beatmap set {}", id);
        Ok(set)
    }

    async fn search(&self, query: &str) -> Result<Vec<BeatmapSet>, CommandError> {
        info!("Searching for beatmaps matching \"{}\"", query);

        let limit = SEARCH_LIMIT.to_string();
        let status = VALID_STATUSES
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(",");

        let response = self
            .client
            .get(format!("{}/api/v2/search", API_BASE_URL))
            .query(&[
                ("query", query),
                ("limit", limit.as_str()),
                ("status", status.as_str()),
                ("mode", "-1"),
                ("sort", "ranked_desc"),
            ])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                error!("Search failed for query \"{}\": {}", query, e);
                CommandError::SearchFailed(e.to_string())
            })?;

        let results = response.json::<Vec<BeatmapSet>>().await.map_err(|e| {
            error!("Failed to decode search results for \"{}\": {}", query, e);
            CommandError::SearchFailed(e.to_string())
        })?;

        if results.is_empty() {
            warn!("No beatmaps found matching \"{}\"", query);
        } else {
            info!("Found {} beatmaps matching \"{}\"", results.len(), query);
        }

        Ok(results)
    }
}
