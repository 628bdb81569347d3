//! YouTube Data API v3 client
//!
//! Client for the `search` endpoint
//! (<https://developers.google.com/youtube/v3/docs/search/list>).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, instrument, warn};

use crate::{config::YouTubeConfig, error::YouTubeError, models::VideoResult};

/// Upper bound the API accepts for `maxResults`
const API_MAX_RESULTS: u8 = 50;

/// YouTube search API response structures
mod api {
    use chrono::{DateTime, Utc};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct SearchResponse {
        #[serde(default)]
        pub items: Option<Vec<SearchItem>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct SearchItem {
        pub id: ItemId,
        pub snippet: Snippet,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ItemId {
        #[serde(default)]
        pub video_id: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Snippet {
        #[serde(default)]
        pub title: String,
        #[serde(default)]
        pub description: String,
        #[serde(default)]
        pub channel_title: String,
        #[serde(default)]
        pub published_at: Option<DateTime<Utc>>,
        #[serde(default)]
        pub thumbnails: Thumbnails,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct Thumbnails {
        pub default: Option<Thumbnail>,
        pub medium: Option<Thumbnail>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Thumbnail {
        pub url: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct ErrorResponse {
        pub error: ErrorBody,
    }

    #[derive(Debug, Deserialize)]
    pub struct ErrorBody {
        #[serde(default)]
        pub message: String,
    }
}

/// Video search over a location name
#[async_trait]
pub trait VideoSearchClient: Send + Sync {
    /// Search videos related to a location
    async fn search_videos(
        &self,
        location: &str,
        max_results: u8,
    ) -> Result<Vec<VideoResult>, YouTubeError>;
}

/// YouTube Data API client
#[derive(Debug)]
pub struct YouTubeClient {
    client: Client,
    config: YouTubeConfig,
}

impl YouTubeClient {
    /// Create a new YouTube client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: YouTubeConfig) -> Result<Self, YouTubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| YouTubeError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Whether searches will actually hit the API
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.config.has_api_key()
    }

    /// Search phrase sent for a location
    #[must_use]
    pub fn search_query(location: &str) -> String {
        format!("{} travel guide weather tourism", location.trim())
    }

    fn convert_results(response: api::SearchResponse) -> Vec<VideoResult> {
        response
            .items
            .unwrap_or_default()
            .into_iter()
            .filter_map(|item| {
                let video_id = item.id.video_id?;
                let snippet = item.snippet;
                let thumbnail = snippet
                    .thumbnails
                    .medium
                    .or(snippet.thumbnails.default)
                    .map(|t| t.url);

                Some(VideoResult {
                    title: snippet.title,
                    url: VideoResult::watch_url(&video_id),
                    video_id,
                    thumbnail,
                    channel_title: snippet.channel_title,
                    published_at: snippet.published_at,
                    description: VideoResult::shorten_description(&snippet.description),
                })
            })
            .collect()
    }

    fn map_status(status: StatusCode, message: String) -> YouTubeError {
        match status {
            StatusCode::BAD_REQUEST => YouTubeError::BadRequest(message),
            StatusCode::UNAUTHORIZED => YouTubeError::InvalidApiKey,
            StatusCode::FORBIDDEN => YouTubeError::QuotaExceeded(message),
            s => YouTubeError::RequestFailed {
                status: s.as_u16(),
                message: if message.is_empty() {
                    "Unknown YouTube API error".to_string()
                } else {
                    message
                },
            },
        }
    }
}

#[async_trait]
impl VideoSearchClient for YouTubeClient {
    #[instrument(skip(self), fields(provider = "youtube"))]
    async fn search_videos(
        &self,
        location: &str,
        max_results: u8,
    ) -> Result<Vec<VideoResult>, YouTubeError> {
        let Some(api_key) = self.config.api_key.as_deref().filter(|_| self.is_enabled()) else {
            warn!("YouTube API key not provided, skipping video search");
            return Ok(Vec::new());
        };

        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        let query = Self::search_query(location);
        let max_results = max_results.clamp(1, API_MAX_RESULTS).to_string();

        debug!(url = %url, query = %query, "Sending YouTube search request");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("q", query.as_str()),
                ("type", "video"),
                ("maxResults", max_results.as_str()),
                ("key", api_key),
                ("order", "relevance"),
                ("safeSearch", self.config.safe_search.as_str()),
                ("videoDefinition", "any"),
                ("videoDuration", "any"),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    YouTubeError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    YouTubeError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<api::ErrorResponse>()
                .await
                .map(|body| body.error.message)
                .unwrap_or_default();
            return Err(Self::map_status(status, message));
        }

        let body: api::SearchResponse = response
            .json()
            .await
            .map_err(|e| YouTubeError::ParseError(e.to_string()))?;

        let videos = Self::convert_results(body);
        info!(count = videos.len(), location = %location, "Found YouTube videos");
        Ok(videos)
    }
}
