//! Model inference endpoint client
//!
//! Serves the local pipeline's three models (zero-shot classifier, entity
//! tagger, text generator) over the Hugging Face style
//! `POST {base}/models/{model}` interface, so a self-hosted inference server
//! can be swapped in through configuration.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

use crate::core::config::AppConfig;
use crate::errors::SummaryError;
use crate::utils::parse_base_url;
use crate::nlp::classifier::{ClassificationRequest, TopicClassifier, rank_by_scores};
use crate::nlp::locations::{EntityRecognizer, EntitySpan};
use crate::nlp::narrative::{GenerationParams, TextGenerator};

#[derive(Debug, Deserialize)]
struct ZeroShotResponse {
    labels: Vec<String>,
    scores: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

/// Parses a zero-shot classification payload into labels ranked by score.
///
/// # Errors
///
/// Returns `Generation` if the payload is not `{labels, scores}`.
pub fn parse_zero_shot(payload: Value) -> Result<Vec<String>, SummaryError> {
    let response: ZeroShotResponse = serde_json::from_value(payload)
        .map_err(|e| SummaryError::Generation(format!("Unexpected classifier output: {e}")))?;
    Ok(rank_by_scores(response.labels, &response.scores))
}

/// # Errors
///
/// Returns `Generation` if the payload is not a list of entity spans.
pub fn parse_entities(payload: Value) -> Result<Vec<EntitySpan>, SummaryError> {
    serde_json::from_value(payload)
        .map_err(|e| SummaryError::Generation(format!("Unexpected entity tagger output: {e}")))
}

/// Accepts both the list form and the bare object form of generation output.
///
/// # Errors
///
/// Returns `Generation` if no generated text is present.
pub fn parse_generated_text(payload: Value) -> Result<String, SummaryError> {
    let generations: Vec<GeneratedText> = match payload {
        Value::Array(_) => serde_json::from_value(payload),
        other => serde_json::from_value::<GeneratedText>(other).map(|single| vec![single]),
    }
    .map_err(|e| SummaryError::Generation(format!("Unexpected generator output: {e}")))?;

    generations
        .into_iter()
        .next()
        .map(|g| g.generated_text)
        .ok_or_else(|| SummaryError::Generation("Generator returned no sequences".to_string()))
}

/// Client for the inference endpoint hosting the local pipeline models.
pub struct InferenceClient {
    http: Client,
    base_url: Url,
    api_token: Option<String>,
    classifier_model: String,
    ner_model: String,
    generator_model: String,
}

impl InferenceClient {
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SummaryError> {
        let http = Client::builder().timeout(timeout).build().map_err(|e| {
            SummaryError::Generation(format!("Failed to build inference HTTP client: {e}"))
        })?;
        let base_url = parse_base_url(base_url)
            .map_err(|e| SummaryError::Generation(format!("Invalid inference URL: {e}")))?;

        Ok(Self {
            http,
            base_url,
            api_token,
            classifier_model: crate::core::config::DEFAULT_CLASSIFIER_MODEL.to_string(),
            ner_model: crate::core::config::DEFAULT_NER_MODEL.to_string(),
            generator_model: crate::core::config::DEFAULT_GENERATOR_MODEL.to_string(),
        })
    }

    /// # Errors
    ///
    /// Returns an error if the configured URL is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, SummaryError> {
        let mut client = Self::new(
            config.inference_api_url(),
            config.inference_api_token.clone(),
            config.http_timeout(),
        )?;
        client.classifier_model = config.classifier_model().to_string();
        client.ner_model = config.ner_model().to_string();
        client.generator_model = config.generator_model().to_string();
        Ok(client)
    }

    fn model_url(&self, model: &str) -> Result<Url, SummaryError> {
        self.base_url
            .join(&format!("models/{model}"))
            .map_err(|e| SummaryError::Generation(format!("Invalid model URL for {model}: {e}")))
    }

    async fn infer(&self, model: &str, body: Value) -> Result<Value, SummaryError> {
        let mut request = self.http.post(self.model_url(model)?).json(&body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SummaryError::Generation(format!("Model {model} unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            return Err(SummaryError::Generation(format!(
                "Model {model} unavailable (status {status}): {error_text}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| SummaryError::Generation(format!("Model {model} returned invalid JSON: {e}")))
    }

    /// Sends one tiny request to each model so cold endpoints load before
    /// real traffic arrives.
    ///
    /// # Errors
    ///
    /// Returns the first model failure; later models are still attempted.
    pub async fn warm_up(&self) -> Result<(), SummaryError> {
        let mut first_error = None;

        let classify = ClassificationRequest::new("warm up", vec!["a warm up".to_string()]);
        let params = GenerationParams::for_prompt("Hello");
        let outcomes = [
            ("classifier", self.rank(&classify).await.map(|_| ())),
            ("entity tagger", self.recognize("Paris").await.map(|_| ())),
            ("generator", self.continue_text("Hello", &params).await.map(|_| ())),
        ];

        for (name, outcome) in outcomes {
            match outcome {
                Ok(()) => info!("Warmed up {}", name),
                Err(e) => {
                    warn!("Failed to warm up {}: {}", name, e);
                    first_error.get_or_insert(e);
                }
            }
        }

        first_error.map_or(Ok(()), Err)
    }
}

#[async_trait]
impl TopicClassifier for InferenceClient {
    async fn rank(&self, request: &ClassificationRequest) -> Result<Vec<String>, SummaryError> {
        if request.candidate_labels.is_empty() {
            return Ok(Vec::new());
        }

        let body = json!({
            "inputs": request.text,
            "parameters": {
                "candidate_labels": request.candidate_labels,
                "multi_label": true,
                "max_length": request.max_length,
                "min_length": request.min_length,
                "num_beams": request.num_beams
            }
        });

        let payload = self.infer(&self.classifier_model, body).await?;
        parse_zero_shot(payload)
    }
}

#[async_trait]
impl EntityRecognizer for InferenceClient {
    async fn recognize(&self, text: &str) -> Result<Vec<EntitySpan>, SummaryError> {
        let body = json!({
            "inputs": text,
            "parameters": {"aggregation_strategy": "first"}
        });

        let payload = self.infer(&self.ner_model, body).await?;
        parse_entities(payload)
    }
}

#[async_trait]
impl TextGenerator for InferenceClient {
    async fn continue_text(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, SummaryError> {
        let body = json!({
            "inputs": prompt,
            "parameters": {
                "max_new_tokens": params.max_new_tokens,
                "temperature": params.temperature,
                "top_k": params.top_k,
                "do_sample": params.do_sample,
                "num_return_sequences": 1,
                "return_full_text": true
            }
        });

        let payload = self.infer(&self.generator_model, body).await?;
        parse_generated_text(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_zero_shot_ranks_by_score() {
        let payload = json!({
            "sequence": "imagine there's no countries",
            "labels": ["no religion", "no countries"],
            "scores": [0.2, 0.9]
        });
        assert_eq!(
            parse_zero_shot(payload).unwrap(),
            ["no countries", "no religion"]
        );
    }

    #[test]
    fn test_parse_entities_reads_aggregated_spans() {
        let payload = json!([
            {"entity_group": "LOC", "score": 0.99, "word": "Liverpool", "start": 10, "end": 19},
            {"entity_group": "PER", "score": 0.97, "word": "Jude", "start": 0, "end": 4}
        ]);
        let spans = parse_entities(payload).unwrap();
        assert_eq!(spans.len(), 2);
        assert!(spans[0].is_location());
        assert_eq!(spans[1].word, "Jude");
    }

    #[test]
    fn test_parse_generated_text_accepts_both_shapes() {
        let listed = json!([{"generated_text": "This song is about love. Yes"}]);
        let bare = json!({"generated_text": "This song is about love."});
        assert_eq!(
            parse_generated_text(listed).unwrap(),
            "This song is about love. Yes"
        );
        assert_eq!(parse_generated_text(bare).unwrap(), "This song is about love.");
    }

    #[test]
    fn test_model_error_payload_is_generation_error() {
        let err = parse_generated_text(json!({"error": "Model gpt2-medium is currently loading"}))
            .unwrap_err();
        assert!(matches!(err, SummaryError::Generation(_)));
        assert!(parse_generated_text(json!([])).is_err());
    }

    #[test]
    fn test_model_url_joins_base() {
        let client =
            InferenceClient::new("http://localhost:8080/", None, Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.model_url("facebook/bart-large-mnli").unwrap().as_str(),
            "http://localhost:8080/models/facebook/bart-large-mnli"
        );
    }

    #[test]
    fn test_model_url_keeps_base_path_without_trailing_slash() {
        let client =
            InferenceClient::new("http://localhost:8080/v1", None, Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.model_url("gpt2-medium").unwrap().as_str(),
            "http://localhost:8080/v1/models/gpt2-medium"
        );
    }

    #[tokio::test]
    async fn test_empty_candidates_skip_the_model() {
        // Port 9 is discard; any request would fail, so success proves no call.
        let client =
            InferenceClient::new("http://127.0.0.1:9/", None, Duration::from_millis(50)).unwrap();
        let request = ClassificationRequest::new("anything", Vec::new());
        assert!(client.rank(&request).await.unwrap().is_empty());
    }
}
