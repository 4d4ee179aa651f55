//! LLM (`OpenAI`) API client module
//!
//! Encapsulates the hosted model call used by the hosted summarizer.

use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, info};

use crate::errors::SummaryError;

const OPENAI_RESPONSES_URL: &str = "https://api.openai.com/v1/responses";

/// Room left for the JSON answer; summaries are one sentence plus a short list.
const MAX_OUTPUT_TOKENS: usize = 1_000;

#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4 + 1
}

/// LLM API client for hosted song summaries
pub struct LlmClient {
    http: Client,
    api_key: String,
    org_id: Option<String>,
    model_name: String,
}

impl LlmClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        api_key: String,
        org_id: Option<String>,
        model_name: String,
        timeout: Duration,
    ) -> Result<Self, SummaryError> {
        let http = Client::builder().timeout(timeout).build().map_err(|e| {
            SummaryError::provider(None, format!("Failed to build OpenAI HTTP client: {e}"))
        })?;

        Ok(Self {
            http,
            api_key,
            org_id,
            model_name,
        })
    }

    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Single-turn prompt carrying one instruction.
    #[must_use]
    pub fn build_prompt(&self, instruction: &str) -> ChatCompletionMessage {
        ChatCompletionMessage {
            role: MessageRole::system,
            content: Content::Text(instruction.to_string()),
            name: None,
            tool_calls: None,
            tool_call_id: None,
        }
    }

    fn headers(&self) -> Result<reqwest::header::HeaderMap, SummaryError> {
        let mut headers = reqwest::header::HeaderMap::new();
        let auth_value = format!("Bearer {}", self.api_key).parse().map_err(|e| {
            SummaryError::provider(None, format!("Invalid Authorization header: {e}"))
        })?;
        headers.insert("Authorization", auth_value);

        let content_type_value = "application/json".parse().map_err(|e| {
            SummaryError::provider(None, format!("Invalid Content-Type header: {e}"))
        })?;
        headers.insert("Content-Type", content_type_value);

        if let Some(org) = &self.org_id {
            let org_value = org.parse().map_err(|e| {
                SummaryError::provider(None, format!("Invalid OpenAI-Organization header: {e}"))
            })?;
            headers.insert("OpenAI-Organization", org_value);
        }

        Ok(headers)
    }

    /// Sends the prompt once and returns the model's text output.
    ///
    /// # Errors
    ///
    /// Returns `Provider` if the request fails or is rejected (auth, rate
    /// limit, server error), `Parse` if the response carries no text.
    pub async fn complete(&self, prompt: &ChatCompletionMessage) -> Result<String, SummaryError> {
        #[cfg(feature = "debug-logs")]
        info!("Using ChatGPT prompt:\n{:?}", prompt);

        #[cfg(not(feature = "debug-logs"))]
        info!("Requesting completion for model {}", self.model_name);

        let input = build_responses_input(prompt)?;
        let estimated_input_tokens = estimate_tokens(&format!("{:?}", prompt.content));
        debug!("Estimated input tokens: {}", estimated_input_tokens);

        let request_body = json!({
            "model": self.model_name,
            "input": input,
            "max_output_tokens": MAX_OUTPUT_TOKENS
        });

        let response = self
            .http
            .post(OPENAI_RESPONSES_URL)
            .headers(self.headers()?)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                SummaryError::provider(
                    e.status().map(|s| s.as_u16()),
                    format!("OpenAI API request failed: {e}"),
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            return Err(error_for_status(status.as_u16(), &error_text));
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| SummaryError::Parse(format!("Failed to parse OpenAI response: {e}")))?;

        output_text_or_error(&response_json)
    }
}

/// Maps a rejected Responses API call onto `Provider`, keeping the status code.
#[must_use]
pub fn error_for_status(status: u16, body: &str) -> SummaryError {
    SummaryError::provider(Some(status), format!("OpenAI API error (status {status}): {body}"))
}

/// # Errors
///
/// Returns `Parse` if the payload carries no output text.
pub fn output_text_or_error(response_json: &Value) -> Result<String, SummaryError> {
    extract_output_text(response_json)
        .ok_or_else(|| SummaryError::Parse("No text in response".to_string()))
}

/// Pulls the text out of a Responses API payload, preferring the
/// `output_text` convenience field over the `output[].content[]` parts.
#[must_use]
pub fn extract_output_text(response_json: &Value) -> Option<String> {
    if let Some(text) = response_json.get("output_text").and_then(|v| v.as_str()) {
        return Some(text.to_string());
    }

    let mut collected: Vec<String> = Vec::new();
    if let Some(items) = response_json.get("output").and_then(|o| o.as_array()) {
        for item in items {
            let Some(parts) = item.get("content").and_then(|c| c.as_array()) else {
                continue;
            };
            for p in parts {
                let is_output_text = p
                    .get("type")
                    .and_then(|t| t.as_str())
                    .is_some_and(|t| t == "output_text");
                if !is_output_text {
                    continue;
                }
                if let Some(s) = p.get("text").and_then(|t| t.as_str()) {
                    collected.push(s.to_string());
                } else if let Some(s) = p
                    .get("text")
                    .and_then(|t| t.get("value"))
                    .and_then(|v| v.as_str())
                {
                    collected.push(s.to_string());
                }
            }
        }
    }

    if collected.is_empty() {
        None
    } else {
        Some(collected.join("\n"))
    }
}

/// Responses API `input` for a single text message.
pub(crate) fn build_responses_input(
    prompt: &ChatCompletionMessage,
) -> Result<Vec<Value>, SummaryError> {
    let Content::Text(text) = &prompt.content else {
        return Err(SummaryError::provider(None, "Hosted prompt must be plain text"));
    };
    let role = match prompt.role {
        MessageRole::system => "system",
        _ => "user",
    };

    Ok(vec![json!({
        "role": role,
        "content": [{
            "type": "input_text",
            "text": text
        }]
    })])
}
