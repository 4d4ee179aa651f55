//! One-sentence narrative from ranked topics.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::ai::estimate_tokens;
use crate::errors::SummaryError;

/// At most this many topics go into the prompt.
pub const MAX_PROMPT_TOPICS: usize = 3;

const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?'];

/// Sampling settings for text continuation. Mildly stochastic, not greedy.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub max_new_tokens: usize,
    pub temperature: f32,
    pub top_k: u32,
    pub do_sample: bool,
}

impl GenerationParams {
    #[must_use]
    pub fn for_prompt(prompt: &str) -> Self {
        Self {
            max_new_tokens: estimate_tokens(prompt),
            temperature: 1.0,
            top_k: 50,
            do_sample: true,
        }
    }
}

/// Continues a prompt with generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the prompt followed by its continuation.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::Generation` when the model cannot be reached.
    async fn continue_text(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, SummaryError>;
}

/// `"This song is about a and b and c."` from the top ranked topics.
#[must_use]
pub fn build_narrative_prompt(ranked_topics: &[String]) -> String {
    let top = &ranked_topics[..ranked_topics.len().min(MAX_PROMPT_TOPICS)];
    format!("This song is about {}.", top.join(" and "))
}

/// Text up to and including the first sentence terminator, or the whole
/// trimmed text when there is none.
#[must_use]
pub fn first_sentence(text: &str) -> &str {
    let trimmed = text.trim();
    match trimmed.find(SENTENCE_TERMINATORS) {
        Some(idx) => &trimmed[..=idx],
        None => trimmed,
    }
}

pub struct NarrativeGenerator {
    generator: Arc<dyn TextGenerator>,
}

impl NarrativeGenerator {
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// # Errors
    ///
    /// Propagates generator failures.
    pub async fn narrate(&self, ranked_topics: &[String]) -> Result<String, SummaryError> {
        let prompt = build_narrative_prompt(ranked_topics);
        let params = GenerationParams::for_prompt(&prompt);

        #[cfg(feature = "debug-logs")]
        tracing::info!("Using narrative prompt: {}", prompt);

        let generated = self.generator.continue_text(&prompt, &params).await?;
        debug!("Generator returned {} characters", generated.len());

        let sentence = first_sentence(&generated);
        if sentence.is_empty() {
            return Ok(prompt);
        }
        Ok(sentence.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl TextGenerator for Echo {
        async fn continue_text(
            &self,
            prompt: &str,
            _params: &GenerationParams,
        ) -> Result<String, SummaryError> {
            Ok(format!("{prompt} It was written in 1971. More text"))
        }
    }

    struct Silent;

    #[async_trait]
    impl TextGenerator for Silent {
        async fn continue_text(
            &self,
            _prompt: &str,
            _params: &GenerationParams,
        ) -> Result<String, SummaryError> {
            Ok("   ".to_string())
        }
    }

    fn topics(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_prompt_joins_at_most_three_topics() {
        assert_eq!(
            build_narrative_prompt(&topics(&["a world", "no countries", "the people", "a dream"])),
            "This song is about a world and no countries and the people."
        );
        assert_eq!(
            build_narrative_prompt(&topics(&["a world"])),
            "This song is about a world."
        );
        assert_eq!(build_narrative_prompt(&[]), "This song is about .");
    }

    #[test]
    fn test_first_sentence_cuts_at_terminator() {
        assert_eq!(first_sentence("  Hello there! And more."), "Hello there!");
        assert_eq!(first_sentence("no terminator here "), "no terminator here");
    }

    #[test]
    fn test_params_are_sampled_and_bounded_by_prompt() {
        let params = GenerationParams::for_prompt("This song is about love.");
        assert!(params.do_sample);
        assert_eq!(params.top_k, 50);
        assert!((params.temperature - 1.0).abs() < f32::EPSILON);
        assert_eq!(params.max_new_tokens, estimate_tokens("This song is about love."));
    }

    #[tokio::test]
    async fn test_narrate_returns_first_sentence() {
        let narrative = NarrativeGenerator::new(Arc::new(Echo));
        let sentence = narrative.narrate(&topics(&["a brotherhood"])).await.unwrap();
        assert_eq!(sentence, "This song is about a brotherhood.");
    }

    #[tokio::test]
    async fn test_narrate_falls_back_to_prompt_on_empty_output() {
        let narrative = NarrativeGenerator::new(Arc::new(Silent));
        let sentence = narrative.narrate(&[]).await.unwrap();
        assert!(!sentence.is_empty());
        assert!(sentence.ends_with('.'));
    }
}
