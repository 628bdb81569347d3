#![forbid(unsafe_code)]
//! YouTube video search integration for Weatherlog
//!
//! Looks up travel and weather videos for a location through the
//! YouTube Data API v3 `search` endpoint.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_youtube::{VideoSearchClient, YouTubeClient, YouTubeConfig};
//!
//! let client = YouTubeClient::new(YouTubeConfig::default())?;
//! for video in client.search_videos("Lisbon", 5).await? {
//!     println!("{} - {}", video.title, video.url);
//! }
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{VideoSearchClient, YouTubeClient};
pub use config::YouTubeConfig;
pub use error::YouTubeError;
pub use models::VideoResult;
