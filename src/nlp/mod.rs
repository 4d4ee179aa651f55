//! Local NLP pipeline stages

pub mod classifier;
pub mod gazetteer;
pub mod locations;
pub mod narrative;
pub mod topics;

pub use classifier::{ClassificationRequest, TopicClassifier, normalize_text};
pub use gazetteer::{BundledGazetteer, CountryResolver, Gazetteer, GazetteerEntry};
pub use locations::{EntityRecognizer, EntitySpan, LocationExtractor};
pub use narrative::{GenerationParams, NarrativeGenerator, TextGenerator, first_sentence};
pub use topics::TopicExtractor;
