//! YouTube adapter - Implements VideoSearchPort using integration_youtube

use application::error::ApplicationError;
use application::ports::VideoSearchPort;
use async_trait::async_trait;
use domain::VideoLink;
use integration_youtube::{VideoResult, VideoSearchClient, YouTubeClient, YouTubeConfig, YouTubeError};
use tracing::{debug, instrument};

/// Adapter for YouTube video search
pub struct YouTubeAdapter {
    client: Box<dyn VideoSearchClient>,
}

impl std::fmt::Debug for YouTubeAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YouTubeAdapter").finish_non_exhaustive()
    }
}

impl YouTubeAdapter {
    /// Create an adapter backed by `YouTubeClient`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: YouTubeConfig) -> Result<Self, ApplicationError> {
        let client = YouTubeClient::new(config).map_err(Self::map_error)?;
        Ok(Self::with_client(client))
    }

    /// Wrap an existing client
    #[must_use]
    pub fn with_client(client: impl VideoSearchClient + 'static) -> Self {
        Self {
            client: Box::new(client),
        }
    }

    fn map_error(err: YouTubeError) -> ApplicationError {
        match err {
            YouTubeError::InvalidApiKey => ApplicationError::Configuration(err.to_string()),
            YouTubeError::QuotaExceeded(_) => ApplicationError::RateLimited,
            _ => ApplicationError::ExternalService(err.to_string()),
        }
    }

    fn map_video(video: VideoResult) -> VideoLink {
        VideoLink {
            title: video.title,
            video_id: video.video_id,
            thumbnail: video.thumbnail.unwrap_or_default(),
            channel_title: video.channel_title,
            published_at: video.published_at,
            description: video.description,
            url: video.url,
        }
    }
}

#[async_trait]
impl VideoSearchPort for YouTubeAdapter {
    #[instrument(skip(self))]
    async fn search_videos(
        &self,
        location: &str,
        max_results: u8,
    ) -> Result<Vec<VideoLink>, ApplicationError> {
        let videos = self
            .client
            .search_videos(location, max_results)
            .await
            .map_err(Self::map_error)?;

        debug!(count = videos.len(), "Mapped video results");
        Ok(videos.into_iter().map(Self::map_video).collect())
    }
}
