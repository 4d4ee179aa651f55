//! API Lambda handler: validates the request, runs both summarization
//! strategies and returns the combined result.

use lambda_runtime::{Error, LambdaEvent};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use super::{helpers, parsing};
use crate::core::models::CombinedSummary;
use crate::summarize::SummaryOrchestrator;
use crate::utils::request_fingerprint;

/// Body returned to the presentation layer.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// Idempotency key for the persistence layer.
    pub fingerprint: String,
    /// False when any strategy failed; such results should not be stored.
    pub cacheable: bool,
    pub summary: CombinedSummary,
}

/// Lambda handler for the API entrypoint.
///
/// # Errors
///
/// Never fails for bad input (that yields a 400 payload); the `Result` is
/// part of the runtime's service contract.
#[tracing::instrument(level = "info", skip(orchestrator, event))]
pub async fn function_handler(
    orchestrator: &SummaryOrchestrator,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    let request = match parsing::parse_search_request(&event.payload) {
        Ok(request) => request,
        Err(message) => {
            error!("Rejected search request: {}", message);
            return Ok(helpers::err_response(400, &message));
        }
    };
    info!(title = %request.title, artist = %request.artist, "Search request received");

    let fingerprint = request_fingerprint(
        &request.title,
        &request.artist,
        request.requester.as_deref().unwrap_or_default(),
    );
    let summary = orchestrator.search(&request.title, &request.artist).await;

    Ok(helpers::ok_json(&SearchResponse {
        fingerprint,
        cacheable: !summary.has_errors(),
        summary,
    }))
}

pub use self::function_handler as handler;
