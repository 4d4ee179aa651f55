//! City/country gazetteer used to normalize location mentions.
//!
//! The bundled dataset is parsed on first use and then shared read-only for
//! the life of the process. Lookups are linear scans in dataset order and the
//! first match wins.

use once_cell::sync::OnceCell;
use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::SummaryError;

const BUNDLED_DATASET: &str = include_str!("../../data/cities.json");

static BUNDLED: OnceCell<Gazetteer> = OnceCell::new();

/// Maps a free-text location to a canonical country name.
pub trait CountryResolver: Send + Sync {
    fn resolve(&self, location: &str) -> Option<String>;
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GazetteerEntry {
    /// City name.
    pub name: String,
    pub country_name: String,
}

#[derive(Debug, Clone)]
struct IndexedEntry {
    country: String,
    country_lower: String,
    city_lower: String,
    city_prefix: String,
}

impl From<GazetteerEntry> for IndexedEntry {
    fn from(entry: GazetteerEntry) -> Self {
        let city_lower = entry.name.to_lowercase();
        let city_prefix = city_lower.split(' ').take(2).collect::<Vec<_>>().join(" ");
        Self {
            country_lower: entry.country_name.to_lowercase(),
            country: entry.country_name,
            city_lower,
            city_prefix,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    entries: Vec<IndexedEntry>,
}

impl Gazetteer {
    #[must_use]
    pub fn from_entries(entries: Vec<GazetteerEntry>) -> Self {
        Self {
            entries: entries.into_iter().map(IndexedEntry::from).collect(),
        }
    }

    /// # Errors
    ///
    /// Returns an error if the data is not a JSON array of `{name, country_name}`.
    pub fn from_json(raw: &str) -> Result<Self, SummaryError> {
        let entries: Vec<GazetteerEntry> = serde_json::from_str(raw).map_err(|e| {
            SummaryError::Generation(format!("Invalid gazetteer dataset: {e}"))
        })?;
        Ok(Self::from_entries(entries))
    }

    /// The process-wide gazetteer built from the bundled dataset.
    ///
    /// Concurrent first callers wait on a single load; later calls only read.
    /// A dataset that fails to parse yields an empty gazetteer.
    pub fn bundled() -> &'static Gazetteer {
        BUNDLED.get_or_init(|| match Self::from_json(BUNDLED_DATASET) {
            Ok(gazetteer) => {
                info!("Loaded gazetteer with {} entries", gazetteer.len());
                gazetteer
            }
            Err(e) => {
                warn!("Failed to load bundled gazetteer: {}", e);
                Gazetteer::default()
            }
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive match against country names, city names, and the
    /// first two words of a city name.
    ///
    /// The two-word rule lets "Rio de" hit "Rio de Janeiro", but it is only a
    /// heuristic and can match unrelated phrases.
    #[must_use]
    pub fn lookup(&self, location: &str) -> Option<&str> {
        let needle = location.to_lowercase();
        self.entries
            .iter()
            .find(|entry| {
                entry.country_lower == needle
                    || entry.city_lower == needle
                    || entry.city_prefix == needle
            })
            .map(|entry| entry.country.as_str())
    }
}

impl CountryResolver for Gazetteer {
    fn resolve(&self, location: &str) -> Option<String> {
        self.lookup(location).map(str::to_string)
    }
}

/// Resolver backed by the lazily loaded bundled dataset.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledGazetteer;

impl CountryResolver for BundledGazetteer {
    fn resolve(&self, location: &str) -> Option<String> {
        Gazetteer::bundled().resolve(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Gazetteer {
        Gazetteer::from_json(
            r#"[
                {"name": "Liverpool", "country_name": "United Kingdom"},
                {"name": "Paris", "country_name": "France"},
                {"name": "Paris", "country_name": "United States"},
                {"name": "Rio de Janeiro", "country_name": "Brazil"},
                {"name": "Lyon", "country_name": "France"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_city_lookup_is_case_insensitive() {
        let g = sample();
        assert_eq!(g.lookup("Paris"), Some("France"));
        assert_eq!(g.lookup("PARIS"), g.lookup("paris"));
    }

    #[test]
    fn test_first_match_in_dataset_order_wins() {
        assert_eq!(sample().lookup("paris"), Some("France"));
    }

    #[test]
    fn test_country_name_resolves_to_itself() {
        assert_eq!(sample().lookup("brazil"), Some("Brazil"));
    }

    #[test]
    fn test_two_word_city_prefix_matches() {
        assert_eq!(sample().lookup("Rio de"), Some("Brazil"));
        assert_eq!(sample().lookup("Rio"), None);
    }

    #[test]
    fn test_unknown_location_is_none() {
        let g = sample();
        assert_eq!(g.lookup("Atlantis"), None);
        assert_eq!(g.lookup("Atlantis"), None);
    }

    #[test]
    fn test_bundled_dataset_loads_once() {
        let first = Gazetteer::bundled();
        let second = Gazetteer::bundled();
        assert!(std::ptr::eq(first, second));
        assert!(!first.is_empty());
        assert_eq!(BundledGazetteer.resolve("liverpool").as_deref(), Some("United Kingdom"));
    }

    #[test]
    fn test_invalid_dataset_is_rejected() {
        assert!(Gazetteer::from_json("{\"name\": 1}").is_err());
    }
}
