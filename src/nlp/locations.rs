//! Country extraction from lyrics via entity recognition.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use super::gazetteer::CountryResolver;
use crate::errors::SummaryError;

/// Entity group assigned to locations by CoNLL-03 style taggers.
pub const LOCATION_ENTITY_GROUP: &str = "LOC";

/// An aggregated entity span, as returned by token classification models.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntitySpan {
    pub entity_group: String,
    pub word: String,
    #[serde(default)]
    pub score: f64,
}

impl EntitySpan {
    #[must_use]
    pub fn is_location(&self) -> bool {
        self.entity_group == LOCATION_ENTITY_GROUP
    }
}

/// Named-entity recognition with first-token aggregation.
#[async_trait]
pub trait EntityRecognizer: Send + Sync {
    /// # Errors
    ///
    /// Returns `SummaryError::Generation` when the model cannot be reached.
    async fn recognize(&self, text: &str) -> Result<Vec<EntitySpan>, SummaryError>;
}

pub struct LocationExtractor {
    recognizer: Arc<dyn EntityRecognizer>,
    resolver: Arc<dyn CountryResolver>,
}

impl LocationExtractor {
    #[must_use]
    pub fn new(recognizer: Arc<dyn EntityRecognizer>, resolver: Arc<dyn CountryResolver>) -> Self {
        Self {
            recognizer,
            resolver,
        }
    }

    /// Unique country names mentioned in the text, first mention first.
    ///
    /// # Errors
    ///
    /// Propagates recognizer failures.
    pub async fn extract_countries(&self, lyrics: &str) -> Result<Vec<String>, SummaryError> {
        let text = lyrics.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let spans = self.recognizer.recognize(text).await?;
        let locations: Vec<&str> = spans
            .iter()
            .filter(|span| span.is_location())
            .map(|span| span.word.trim())
            .collect();
        debug!("Recognized {} location entities", locations.len());

        Ok(self.resolve_all(&locations))
    }

    /// Same as `extract_countries`, joined for display.
    ///
    /// # Errors
    ///
    /// Propagates recognizer failures.
    pub async fn extract(&self, lyrics: &str) -> Result<String, SummaryError> {
        Ok(self.extract_countries(lyrics).await?.join(", "))
    }

    fn resolve_all(&self, locations: &[&str]) -> Vec<String> {
        let mut seen = HashSet::new();
        locations
            .iter()
            .filter_map(|location| self.resolver.resolve(location))
            .filter(|country| seen.insert(country.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::gazetteer::{Gazetteer, GazetteerEntry};

    struct FixedSpans(Vec<EntitySpan>);

    #[async_trait]
    impl EntityRecognizer for FixedSpans {
        async fn recognize(&self, _text: &str) -> Result<Vec<EntitySpan>, SummaryError> {
            Ok(self.0.clone())
        }
    }

    struct Unreachable;

    #[async_trait]
    impl EntityRecognizer for Unreachable {
        async fn recognize(&self, _text: &str) -> Result<Vec<EntitySpan>, SummaryError> {
            panic!("recognizer should not be called for empty text");
        }
    }

    fn span(group: &str, word: &str) -> EntitySpan {
        EntitySpan {
            entity_group: group.to_string(),
            word: word.to_string(),
            score: 0.99,
        }
    }

    fn gazetteer() -> Arc<Gazetteer> {
        Arc::new(Gazetteer::from_entries(vec![
            GazetteerEntry {
                name: "Liverpool".into(),
                country_name: "United Kingdom".into(),
            },
            GazetteerEntry {
                name: "London".into(),
                country_name: "United Kingdom".into(),
            },
            GazetteerEntry {
                name: "Tokyo".into(),
                country_name: "Japan".into(),
            },
        ]))
    }

    #[tokio::test]
    async fn test_keeps_only_resolved_locations_without_duplicates() {
        let extractor = LocationExtractor::new(
            Arc::new(FixedSpans(vec![
                span("LOC", "Liverpool"),
                span("PER", "John"),
                span("LOC", " London "),
                span("LOC", "Tokyo"),
                span("LOC", "Narnia"),
                span("LOC", "liverpool"),
            ])),
            gazetteer(),
        );

        let joined = extractor.extract("In Liverpool and London...").await.unwrap();
        assert_eq!(joined, "United Kingdom, Japan");
    }

    #[tokio::test]
    async fn test_empty_lyrics_skip_recognition() {
        let extractor = LocationExtractor::new(Arc::new(Unreachable), gazetteer());
        assert!(extractor.extract_countries("  \n ").await.unwrap().is_empty());
    }
}
