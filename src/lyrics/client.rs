//! Musixmatch lyrics client
//!
//! Wraps the `matcher.lyrics.get` endpoint and maps its status envelope onto
//! `SummaryError`.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use super::LyricsSource;
use crate::errors::SummaryError;
use crate::utils::parse_base_url;

const LYRICS_ENDPOINT: &str = "matcher.lyrics.get";

/// Everything from this character on is provider boilerplate, not lyrics.
const LYRICS_TRAILER_MARKER: char = '*';

pub const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong";

const ERROR_MESSAGES: &[(u16, &str)] = &[
    (404, "We have not found lyrics with provided parameters"),
    (401, "Unauthorized request"),
];

/// User-facing message for a provider status code.
#[must_use]
pub fn error_message_for_status(status: u16) -> &'static str {
    ERROR_MESSAGES
        .iter()
        .find(|(code, _)| *code == status)
        .map_or(DEFAULT_ERROR_MESSAGE, |&(_, message)| message)
}

/// Cuts the provider trailer off a lyrics body.
#[must_use]
pub fn strip_lyrics_trailer(body: &str) -> &str {
    body.split(LYRICS_TRAILER_MARKER).next().unwrap_or("")
}

/// Interprets a decoded `matcher.lyrics.get` response envelope.
///
/// # Errors
///
/// Returns `NotFound` for status 404 or an empty match, `Provider` otherwise.
pub fn parse_lyrics_envelope(envelope: &Value) -> Result<String, SummaryError> {
    let message = envelope.get("message").ok_or_else(|| {
        SummaryError::provider(None, DEFAULT_ERROR_MESSAGE)
    })?;

    let status = message
        .get("header")
        .and_then(|h| h.get("status_code"))
        .and_then(Value::as_u64)
        .and_then(|s| u16::try_from(s).ok())
        .ok_or_else(|| SummaryError::provider(None, DEFAULT_ERROR_MESSAGE))?;

    if status == 404 {
        return Err(SummaryError::NotFound);
    }
    if status != 200 {
        return Err(SummaryError::provider(
            Some(status),
            error_message_for_status(status),
        ));
    }

    // A 200 with an empty body is how the matcher reports "no lyrics on file".
    let body = message
        .get("body")
        .and_then(|b| b.get("lyrics"))
        .and_then(|l| l.get("lyrics_body"))
        .and_then(Value::as_str)
        .ok_or(SummaryError::NotFound)?;

    Ok(strip_lyrics_trailer(body).to_string())
}

/// Musixmatch API client
pub struct MusixmatchClient {
    http: Client,
    base_url: Url,
    api_key: String,
}

impl MusixmatchClient {
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(base_url: &str, api_key: String, timeout: Duration) -> Result<Self, SummaryError> {
        let http = Client::builder().timeout(timeout).build().map_err(|e| {
            SummaryError::provider(None, format!("Failed to build Musixmatch HTTP client: {e}"))
        })?;

        Ok(Self {
            http,
            base_url: parse_base_url(base_url)?,
            api_key,
        })
    }

    fn endpoint_url(&self) -> Result<Url, SummaryError> {
        Ok(self.base_url.join(LYRICS_ENDPOINT)?)
    }
}

#[async_trait]
impl LyricsSource for MusixmatchClient {
    async fn fetch_lyrics(&self, title: &str, artist: &str) -> Result<String, SummaryError> {
        let endpoint = self.endpoint_url()?;
        info!(title = %title, artist = %artist, "Fetching lyrics");

        let response = self
            .http
            .get(endpoint)
            .query(&[
                ("q_track", title),
                ("q_artist", artist),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        // The real status lives in the JSON envelope; HTTP status is usually 200.
        let envelope: Value = response.json().await.map_err(|e| {
            SummaryError::provider(
                e.status().map(|s| s.as_u16()),
                format!("{DEFAULT_ERROR_MESSAGE}: {e}"),
            )
        })?;

        let lyrics = parse_lyrics_envelope(&envelope)?;
        debug!("Fetched {} characters of lyrics", lyrics.len());
        Ok(lyrics)
    }
}
