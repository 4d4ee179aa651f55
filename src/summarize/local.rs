use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use super::Summarizer;
use crate::core::models::{StrategyId, SummaryResult};
use crate::errors::SummaryError;
use crate::lyrics::LyricsSource;
use crate::nlp::{
    ClassificationRequest, CountryResolver, EntityRecognizer, LocationExtractor,
    NarrativeGenerator, TextGenerator, TopicClassifier, TopicExtractor,
};

/// Lyrics-driven pipeline: topics → ranking → narrative, plus countries.
pub struct LocalSummarizer {
    lyrics: Arc<dyn LyricsSource>,
    topics: TopicExtractor,
    classifier: Arc<dyn TopicClassifier>,
    narrative: NarrativeGenerator,
    locations: LocationExtractor,
}

impl LocalSummarizer {
    #[must_use]
    pub fn new(
        lyrics: Arc<dyn LyricsSource>,
        classifier: Arc<dyn TopicClassifier>,
        generator: Arc<dyn TextGenerator>,
        recognizer: Arc<dyn EntityRecognizer>,
        resolver: Arc<dyn CountryResolver>,
    ) -> Self {
        Self {
            lyrics,
            topics: TopicExtractor::new(),
            classifier,
            narrative: NarrativeGenerator::new(generator),
            locations: LocationExtractor::new(recognizer, resolver),
        }
    }

    /// # Errors
    ///
    /// Propagates classifier and generator failures.
    pub async fn summarize_lyrics(&self, lyrics: &str) -> Result<String, SummaryError> {
        let candidates = self.topics.extract(lyrics);
        debug!("Extracted {} candidate topics", candidates.len());

        let request = ClassificationRequest::new(lyrics, candidates);
        let ranked = self.classifier.rank(&request).await?;

        self.narrative.narrate(&ranked).await
    }
}

#[async_trait]
impl Summarizer for LocalSummarizer {
    async fn summarize(&self, title: &str, artist: &str) -> Result<SummaryResult, SummaryError> {
        let lyrics = self.lyrics.fetch_lyrics(title, artist).await?;
        info!("Summarizing {} characters of lyrics locally", lyrics.len());

        let summary = self.summarize_lyrics(&lyrics).await?;
        let countries = self.locations.extract_countries(&lyrics).await?;

        Ok(SummaryResult::new(StrategyId::Local, summary, countries))
    }
}
