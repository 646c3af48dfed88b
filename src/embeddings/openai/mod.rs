
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::{EmbeddingProvider, ProviderError};
use crate::config::{ConfigError, EmbeddingConfig};

const EMBEDDINGS_PATH: &str = "v1/embeddings";

/// Blocking client for an OpenAI-compatible `/v1/embeddings` endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    endpoint: Url,
    model: String,
    api_key: String,
    agent: ureq::Agent,
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
    encoding_format: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f64>,
}

impl OpenAiClient {
    /// Build a client from configuration and an already-resolved API key.
    #[inline]
    pub fn new(config: &EmbeddingConfig, api_key: String) -> Result<Self, ConfigError> {
        let mut base_url = config.api_url()?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let endpoint = base_url
            .join(EMBEDDINGS_PATH)
            .map_err(|_| ConfigError::InvalidUrl(config.base_url.clone()))?;

        Ok(Self {
            endpoint,
            model: config.model.clone(),
            api_key,
            agent: build_agent(config.timeout()),
        })
    }

    #[inline]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.agent = build_agent(timeout);
        self
    }

    #[inline]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[inline]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl EmbeddingProvider for OpenAiClient {
    fn embed(&self, text: &str) -> Result<Vec<f64>, ProviderError> {
        debug!("Requesting embedding for text (length: {})", text.len());

        let request = EmbeddingRequest {
            model: &self.model,
            input: text,
            encoding_format: "float",
        };
        let request_json = serde_json::to_string(&request)
            .map_err(|e| ProviderError::Request(format!("Failed to serialize request: {e}")))?;

        let response_text = self
            .agent
            .post(self.endpoint.as_str())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .send(&request_json)
            .and_then(|mut resp| resp.body_mut().read_to_string())
            .map_err(classify_error)?;

        let response: EmbeddingResponse = serde_json::from_str(&response_text)
            .map_err(|e| ProviderError::Malformed(format!("Failed to parse response: {e}")))?;

        let embedding = response
            .data
            .into_iter()
            .next()
            .map(|data| data.embedding)
            .filter(|embedding| !embedding.is_empty())
            .ok_or_else(|| ProviderError::Malformed("response contained no embedding".to_string()))?;

        debug!("Received embedding with {} dimensions", embedding.len());
        Ok(embedding)
    }
}

fn build_agent(timeout: Duration) -> ureq::Agent {
    ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .build()
        .into()
}

/// Sort transport failures into the ones worth retrying and the ones that
/// will fail the same way again.
fn classify_error(error: ureq::Error) -> ProviderError {
    match error {
        ureq::Error::StatusCode(429) => {
            ProviderError::Transient("rate limited (HTTP 429)".to_string())
        }
        ureq::Error::StatusCode(status) if status >= 500 => {
            ProviderError::Transient(format!("server error (HTTP {status})"))
        }
        ureq::Error::StatusCode(status) => ProviderError::Rejected { status },
        ureq::Error::ConnectionFailed
        | ureq::Error::HostNotFound
        | ureq::Error::Timeout(_)
        | ureq::Error::Io(_) => ProviderError::Transient(error.to_string()),
        other => ProviderError::Request(other.to_string()),
    }
}
