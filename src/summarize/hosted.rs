use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use super::Summarizer;
use crate::ai::LlmClient;
use crate::ai::prompt_builder::build_song_summary_instruction;
use crate::core::models::{StrategyId, SummaryResult};
use crate::errors::SummaryError;

/// A hosted model that answers a single instruction.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// # Errors
    ///
    /// Returns `Provider` for transport or API failures.
    async fn complete_instruction(&self, instruction: &str) -> Result<String, SummaryError>;
}

#[async_trait]
impl CompletionModel for LlmClient {
    async fn complete_instruction(&self, instruction: &str) -> Result<String, SummaryError> {
        let prompt = self.build_prompt(instruction);
        self.complete(&prompt).await
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CountriesField {
    List(Vec<String>),
    // Older prompt wording asked for an empty string when nothing matched.
    Text(String),
}

impl CountriesField {
    fn into_vec(self) -> Vec<String> {
        match self {
            CountriesField::List(items) => items
                .into_iter()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect(),
            CountriesField::Text(text) => text
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct HostedAnswer {
    summary: String,
    countries: CountriesField,
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Parses the model's answer into `(summary, countries)`.
///
/// # Errors
///
/// Returns `Parse` unless the text is a JSON object with a string `summary`
/// and a `countries` array (or string).
pub fn parse_hosted_answer(text: &str) -> Result<(String, Vec<String>), SummaryError> {
    let answer: HostedAnswer = serde_json::from_str(strip_code_fence(text))?;
    Ok((answer.summary, answer.countries.into_vec()))
}

/// Asks a hosted LLM for the summary and countries in one request.
pub struct HostedSummarizer {
    model: Arc<dyn CompletionModel>,
}

impl HostedSummarizer {
    #[must_use]
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl Summarizer for HostedSummarizer {
    async fn summarize(&self, title: &str, artist: &str) -> Result<SummaryResult, SummaryError> {
        let instruction = build_song_summary_instruction(title, artist);
        let answer = self.model.complete_instruction(&instruction).await?;
        info!("Hosted model answered with {} characters", answer.len());

        let (summary, countries) = parse_hosted_answer(&answer)?;
        Ok(SummaryResult::new(StrategyId::Hosted, summary, countries))
    }
}
