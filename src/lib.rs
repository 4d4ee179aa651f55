//! Songsense - summarizes what a song is about and which countries its lyrics mention.
//!
//! Two independent strategies produce a summary for the same song:
//! 1. A local pipeline that fetches lyrics from Musixmatch, extracts candidate
//!    topics, ranks them with a zero-shot classifier, turns the top topics into
//!    a sentence with a text generator, and resolves tagged locations to
//!    countries through a bundled gazetteer
//! 2. A hosted LLM asked for the summary and country list as JSON
//!
//! The orchestrator runs both and always returns one entry per strategy; a
//! failing strategy shows up as an error string in its own entry.
//!
//! # Example
//!
//! ```no_run
//! use songsense::core::config::AppConfig;
//! use songsense::summarize::SummaryOrchestrator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     songsense::setup_logging();
//!
//!     let config = AppConfig {
//!         musixmatch_api_key: "dummy_musixmatch_key".to_string(),
//!         musixmatch_url: None,
//!         openai_api_key: "dummy_openai_key".to_string(),
//!         openai_org_id: None,
//!         openai_model: None,
//!         inference_api_url: None,
//!         inference_api_token: None,
//!         classifier_model: None,
//!         ner_model: None,
//!         generator_model: None,
//!         http_timeout_secs: Some(60),
//!     };
//!
//!     let orchestrator = SummaryOrchestrator::from_config(&config)?;
//!     let combined = orchestrator.search("Imagine", "John Lennon").await;
//!
//!     for (strategy, result) in combined.iter() {
//!         println!("{strategy}: {} [{}]", result.summary(), result.countries_joined());
//!     }
//!     Ok(())
//! }
//! ```
// Module declarations
pub mod ai;
pub mod api;
pub mod core;
pub mod errors;
pub mod lyrics;
pub mod nlp;
pub mod summarize;
pub mod utils;

pub use crate::core::models::{CombinedSummary, StrategyId, SummaryResult};
pub use errors::SummaryError;
pub use summarize::{Summarizer, SummaryOrchestrator};

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Verbosity follows `RUST_LOG` and defaults to `info`. Calling this more than
/// once keeps the first subscriber.
///
/// # Example
///
/// ```
/// songsense::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
