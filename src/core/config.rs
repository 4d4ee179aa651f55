use std::env;
use std::time::Duration;

pub const DEFAULT_MUSIXMATCH_URL: &str = "https://api.musixmatch.com/ws/1.1/";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_INFERENCE_API_URL: &str = "https://api-inference.huggingface.co/";
pub const DEFAULT_CLASSIFIER_MODEL: &str = "facebook/bart-large-mnli";
pub const DEFAULT_NER_MODEL: &str = "dbmdz/bert-large-cased-finetuned-conll03-english";
pub const DEFAULT_GENERATOR_MODEL: &str = "gpt2-medium";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub musixmatch_api_key: String,
    pub musixmatch_url: Option<String>,
    pub openai_api_key: String,
    pub openai_org_id: Option<String>,
    pub openai_model: Option<String>,
    pub inference_api_url: Option<String>,
    pub inference_api_token: Option<String>,
    pub classifier_model: Option<String>,
    pub ner_model: Option<String>,
    pub generator_model: Option<String>,
    pub http_timeout_secs: Option<u64>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let http_timeout_secs = match env::var("HTTP_TIMEOUT_SECS") {
            Ok(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|e| format!("HTTP_TIMEOUT_SECS: {}", e))?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            musixmatch_api_key: env::var("MUSIXMATCH_API_KEY")
                .map_err(|e| format!("MUSIXMATCH_API_KEY: {}", e))?,
            musixmatch_url: env::var("MUSIXMATCH_URL").ok(),
            openai_api_key: env::var("OPENAI_API_KEY")
                .map_err(|e| format!("OPENAI_API_KEY: {}", e))?,
            openai_org_id: env::var("OPENAI_ORG_ID").ok(),
            openai_model: env::var("OPENAI_MODEL").ok(),
            inference_api_url: env::var("INFERENCE_API_URL").ok(),
            inference_api_token: env::var("INFERENCE_API_TOKEN").ok(),
            classifier_model: env::var("CLASSIFIER_MODEL").ok(),
            ner_model: env::var("NER_MODEL").ok(),
            generator_model: env::var("GENERATOR_MODEL").ok(),
            http_timeout_secs,
        })
    }

    #[must_use]
    pub fn musixmatch_url(&self) -> &str {
        self.musixmatch_url
            .as_deref()
            .unwrap_or(DEFAULT_MUSIXMATCH_URL)
    }

    #[must_use]
    pub fn openai_model(&self) -> &str {
        self.openai_model.as_deref().unwrap_or(DEFAULT_OPENAI_MODEL)
    }

    #[must_use]
    pub fn inference_api_url(&self) -> &str {
        self.inference_api_url
            .as_deref()
            .unwrap_or(DEFAULT_INFERENCE_API_URL)
    }

    #[must_use]
    pub fn classifier_model(&self) -> &str {
        self.classifier_model
            .as_deref()
            .unwrap_or(DEFAULT_CLASSIFIER_MODEL)
    }

    #[must_use]
    pub fn ner_model(&self) -> &str {
        self.ner_model.as_deref().unwrap_or(DEFAULT_NER_MODEL)
    }

    #[must_use]
    pub fn generator_model(&self) -> &str {
        self.generator_model
            .as_deref()
            .unwrap_or(DEFAULT_GENERATOR_MODEL)
    }

    /// Timeout applied to every outbound HTTP call.
    #[must_use]
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS))
    }
}
