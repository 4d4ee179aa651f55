use thiserror::Error;

/// Failure modes of a single summarization strategy.
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("Lyrics does not exist")]
    NotFound,

    #[error("{message}")]
    Provider { code: Option<u16>, message: String },

    #[error("Failed to parse hosted model response: {0}")]
    Parse(String),

    #[error("Failed to run local generation pipeline: {0}")]
    Generation(String),
}

impl SummaryError {
    pub fn provider(code: Option<u16>, message: impl Into<String>) -> Self {
        SummaryError::Provider {
            code,
            message: message.into(),
        }
    }

    /// Not-found is benign absence rather than a fault.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, SummaryError::NotFound)
    }
}

impl From<reqwest::Error> for SummaryError {
    fn from(error: reqwest::Error) -> Self {
        SummaryError::Provider {
            code: error.status().map(|s| s.as_u16()),
            message: format!("Failed to send HTTP request: {error}"),
        }
    }
}

impl From<serde_json::Error> for SummaryError {
    fn from(error: serde_json::Error) -> Self {
        SummaryError::Parse(error.to_string())
    }
}

impl From<url::ParseError> for SummaryError {
    fn from(error: url::ParseError) -> Self {
        SummaryError::provider(None, format!("Invalid provider URL: {error}"))
    }
}
