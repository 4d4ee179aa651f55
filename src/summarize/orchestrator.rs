//! Runs both strategies and merges their outcomes.
//!
//! Neither strategy can abort the other: each outcome is reduced to a
//! `SummaryResult`, with failures recorded in its `error` field.

use std::sync::Arc;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use super::{HostedSummarizer, LocalSummarizer, Summarizer};
use crate::ai::{InferenceClient, LlmClient};
use crate::core::config::AppConfig;
use crate::core::models::{CombinedSummary, StrategyId, SummaryResult};
use crate::errors::SummaryError;
use crate::lyrics::MusixmatchClient;
use crate::nlp::BundledGazetteer;

pub struct SummaryOrchestrator {
    local: Arc<dyn Summarizer>,
    hosted: Arc<dyn Summarizer>,
}

impl SummaryOrchestrator {
    #[must_use]
    pub fn new(local: Arc<dyn Summarizer>, hosted: Arc<dyn Summarizer>) -> Self {
        Self { local, hosted }
    }

    /// Wires the production clients from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, SummaryError> {
        let timeout = config.http_timeout();

        let lyrics = Arc::new(MusixmatchClient::new(
            config.musixmatch_url(),
            config.musixmatch_api_key.clone(),
            timeout,
        )?);
        let inference = Arc::new(InferenceClient::from_config(config)?);
        let local = LocalSummarizer::new(
            lyrics,
            inference.clone(),
            inference.clone(),
            inference,
            Arc::new(BundledGazetteer),
        );

        let llm = LlmClient::new(
            config.openai_api_key.clone(),
            config.openai_org_id.clone(),
            config.openai_model().to_string(),
            timeout,
        )?;
        let hosted = HostedSummarizer::new(Arc::new(llm));

        Ok(Self::new(Arc::new(local), Arc::new(hosted)))
    }

    /// Summarizes a song with both strategies. Never fails: each strategy's
    /// failure ends up in its entry's `error`.
    pub async fn search(&self, title: &str, artist: &str) -> CombinedSummary {
        let correlation_id = Uuid::new_v4();
        let span = info_span!("search", %correlation_id, title = %title, artist = %artist);

        async {
            let (local, hosted) = futures::join!(
                self.local.summarize(title, artist),
                self.hosted.summarize(title, artist)
            );

            let combined = CombinedSummary::merge(
                settle_local(local),
                settle(StrategyId::Hosted, hosted),
            );
            info!(has_errors = combined.has_errors(), "Search finished");
            combined
        }
        .instrument(span)
        .await
    }
}

/// Lyrics not being found is an absence, not a fault, so it carries no error.
fn settle_local(outcome: Result<SummaryResult, SummaryError>) -> SummaryResult {
    match outcome {
        Err(SummaryError::NotFound) => {
            info!("No lyrics found; local summary left empty");
            SummaryResult::empty(StrategyId::Local)
        }
        other => settle(StrategyId::Local, other),
    }
}

fn settle(strategy: StrategyId, outcome: Result<SummaryResult, SummaryError>) -> SummaryResult {
    match outcome {
        Ok(result) => result,
        Err(e) => {
            warn!(strategy = %strategy, "Summarization strategy failed: {}", e);
            SummaryResult::failed(strategy, e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Fixed(fn() -> Result<SummaryResult, SummaryError>);

    #[async_trait]
    impl Summarizer for Fixed {
        async fn summarize(&self, _t: &str, _a: &str) -> Result<SummaryResult, SummaryError> {
            (self.0)()
        }
    }

    #[test]
    fn test_settle_local_suppresses_not_found() {
        let result = settle_local(Err(SummaryError::NotFound));
        assert_eq!(result, SummaryResult::empty(StrategyId::Local));
    }

    #[test]
    fn test_settle_records_hosted_not_found_as_error() {
        let result = settle(StrategyId::Hosted, Err(SummaryError::NotFound));
        assert_eq!(result.error(), "Lyrics does not exist");
    }

    #[tokio::test]
    async fn test_search_keeps_hosted_result_when_local_fails() {
        let orchestrator = SummaryOrchestrator::new(
            Arc::new(Fixed(|| {
                Err(SummaryError::Generation("model offline".to_string()))
            })),
            Arc::new(Fixed(|| {
                Ok(SummaryResult::new(StrategyId::Hosted, "Peace.", vec![]))
            })),
        );

        let combined = orchestrator.search("Imagine", "John Lennon").await;
        assert!(combined.local().error().contains("model offline"));
        assert_eq!(combined.hosted().summary(), "Peace.");
        assert!(combined.has_errors());
    }
}
