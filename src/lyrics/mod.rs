//! Lyrics retrieval

pub mod client;

use async_trait::async_trait;

use crate::errors::SummaryError;

pub use client::MusixmatchClient;

/// Source of raw lyrics text for a track.
#[async_trait]
pub trait LyricsSource: Send + Sync {
    /// # Errors
    ///
    /// `SummaryError::NotFound` when the provider has no match,
    /// `SummaryError::Provider` for any other provider failure.
    async fn fetch_lyrics(&self, title: &str, artist: &str) -> Result<String, SummaryError>;
}
