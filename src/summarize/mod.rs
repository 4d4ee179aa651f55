//! Summarization strategies and the orchestrator that combines them

pub mod hosted;
pub mod local;
pub mod orchestrator;

use async_trait::async_trait;

use crate::core::models::SummaryResult;
use crate::errors::SummaryError;

pub use hosted::HostedSummarizer;
pub use local::LocalSummarizer;
pub use orchestrator::SummaryOrchestrator;

/// One way of producing a song summary.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// # Errors
    ///
    /// Returns the strategy's failure; the orchestrator decides how to record it.
    async fn summarize(&self, title: &str, artist: &str) -> Result<SummaryResult, SummaryError>;
}
