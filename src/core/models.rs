use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Identifies which summarization strategy produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyId {
    Local,
    Hosted,
}

impl StrategyId {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            StrategyId::Local => "local",
            StrategyId::Hosted => "hosted",
        }
    }
}

impl fmt::Display for StrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of one strategy. `error` non-empty means `summary` and `countries`
/// must not be trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryResult {
    strategy: StrategyId,
    summary: String,
    countries: Vec<String>,
    error: String,
}

impl SummaryResult {
    /// Builds a successful result. Duplicate countries are dropped, keeping
    /// the first occurrence.
    #[must_use]
    pub fn new(strategy: StrategyId, summary: impl Into<String>, countries: Vec<String>) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(countries.len());
        for country in countries {
            if !unique.contains(&country) {
                unique.push(country);
            }
        }
        Self {
            strategy,
            summary: summary.into(),
            countries: unique,
            error: String::new(),
        }
    }

    /// A result with no summary, no countries and no error.
    #[must_use]
    pub fn empty(strategy: StrategyId) -> Self {
        Self::new(strategy, String::new(), Vec::new())
    }

    /// The only way to set `error`: a failed strategy carries no summary or countries.
    #[must_use]
    pub fn failed(strategy: StrategyId, error: impl fmt::Display) -> Self {
        Self {
            error: error.to_string(),
            ..Self::empty(strategy)
        }
    }

    #[must_use]
    pub const fn strategy(&self) -> StrategyId {
        self.strategy
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    #[must_use]
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    /// Countries as presented to users: `"France, Japan"`.
    #[must_use]
    pub fn countries_joined(&self) -> String {
        self.countries.join(", ")
    }

    #[must_use]
    pub fn error(&self) -> &str {
        &self.error
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        !self.error.is_empty()
    }
}

impl Serialize for SummaryResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("summary", &self.summary)?;
        map.serialize_entry("countries", &self.countries_joined())?;
        map.serialize_entry("error", &self.error)?;
        map.end()
    }
}

/// Both strategy results keyed by strategy, local first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedSummary {
    local: SummaryResult,
    hosted: SummaryResult,
}

impl CombinedSummary {
    /// Places each result under its own key regardless of argument order.
    #[must_use]
    pub fn merge(first: SummaryResult, second: SummaryResult) -> Self {
        match (first.strategy(), second.strategy()) {
            (StrategyId::Hosted, StrategyId::Local) => Self {
                local: second,
                hosted: first,
            },
            _ => Self {
                local: first,
                hosted: second,
            },
        }
    }

    #[must_use]
    pub fn get(&self, strategy: StrategyId) -> &SummaryResult {
        match strategy {
            StrategyId::Local => &self.local,
            StrategyId::Hosted => &self.hosted,
        }
    }

    #[must_use]
    pub fn local(&self) -> &SummaryResult {
        &self.local
    }

    #[must_use]
    pub fn hosted(&self) -> &SummaryResult {
        &self.hosted
    }

    pub fn iter(&self) -> impl Iterator<Item = (StrategyId, &SummaryResult)> {
        [
            (StrategyId::Local, &self.local),
            (StrategyId::Hosted, &self.hosted),
        ]
        .into_iter()
    }

    /// Results with any error are not worth caching.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.local.is_error() || self.hosted.is_error()
    }
}

impl Serialize for CombinedSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        for (strategy, result) in self.iter() {
            map.serialize_entry(strategy.as_str(), result)?;
        }
        map.end()
    }
}

/// One search request as received from the outer layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub requester: Option<String>,
}
