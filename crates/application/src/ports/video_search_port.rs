//! Video search port

use async_trait::async_trait;
use domain::VideoLink;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for finding videos related to a location
#[cfg_attr(test, automock)]
#[async_trait]
pub trait VideoSearchPort: Send + Sync {
    /// Search for up to `max_results` videos about `location`
    ///
    /// Returns an empty list when the provider is not configured.
    async fn search_videos(
        &self,
        location: &str,
        max_results: u8,
    ) -> Result<Vec<VideoLink>, ApplicationError>;
}
