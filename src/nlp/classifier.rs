use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SummaryError;

/// Lower bound on the classifier's generation length.
pub const MIN_CLASSIFY_LENGTH: usize = 30;
pub const CLASSIFY_NUM_BEAMS: usize = 4;

static PUNCTUATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s]").expect("static regex compile"));

/// Lower-cases and strips punctuation.
#[must_use]
pub fn normalize_text(text: &str) -> String {
    PUNCTUATION_RE.replace_all(&text.to_lowercase(), "").into_owned()
}

/// One zero-shot classification job.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationRequest {
    pub text: String,
    pub candidate_labels: Vec<String>,
    /// Tied to the raw input length so long lyrics are not cut short.
    pub max_length: usize,
    pub min_length: usize,
    pub num_beams: usize,
}

impl ClassificationRequest {
    #[must_use]
    pub fn new(raw_text: &str, candidate_labels: Vec<String>) -> Self {
        Self {
            text: normalize_text(raw_text),
            candidate_labels,
            max_length: raw_text.chars().count() + 1,
            min_length: MIN_CLASSIFY_LENGTH,
            num_beams: CLASSIFY_NUM_BEAMS,
        }
    }
}

/// Ranks candidate phrases by relevance to a text.
#[async_trait]
pub trait TopicClassifier: Send + Sync {
    /// Returns candidate labels ordered by descending score.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::Generation` when the model cannot be reached.
    async fn rank(&self, request: &ClassificationRequest) -> Result<Vec<String>, SummaryError>;
}

/// Orders labels by their paired score, highest first. Extra labels or
/// scores beyond the shorter list are ignored.
#[must_use]
pub fn rank_by_scores(labels: Vec<String>, scores: &[f64]) -> Vec<String> {
    let mut paired: Vec<(String, f64)> = labels.into_iter().zip(scores.iter().copied()).collect();
    paired.sort_by(|a, b| b.1.total_cmp(&a.1));
    paired.into_iter().map(|(label, _)| label).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text_strips_punctuation() {
        assert_eq!(
            normalize_text("Imagine, there's NO heaven!"),
            "imagine theres no heaven"
        );
    }

    #[test]
    fn test_request_bounds_follow_raw_length() {
        let request = ClassificationRequest::new("Hello, world", vec!["a b".to_string()]);
        assert_eq!(request.text, "hello world");
        assert_eq!(request.max_length, 13);
        assert_eq!(request.min_length, 30);
        assert_eq!(request.num_beams, 4);
    }

    #[test]
    fn test_rank_by_scores_sorts_descending() {
        let ranked = rank_by_scores(
            vec!["low".into(), "high".into(), "mid".into()],
            &[0.1, 0.8, 0.4],
        );
        assert_eq!(ranked, ["high", "mid", "low"]);
    }
}
