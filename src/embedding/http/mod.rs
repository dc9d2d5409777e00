//! Embedding provider for OpenAI-compatible `/v1/embeddings` endpoints.

pub mod config;

#[cfg(test)]
mod tests;

pub use config::{DEFAULT_EMBEDDING_MODEL, HttpEmbedderConfig};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::error::EmbeddingError;
use super::provider::EmbeddingProvider;

/// HTTP embedding provider.
pub struct HttpEmbedder {
    client: reqwest::Client,
    config: HttpEmbedderConfig,
    /// `model@endpoint`, so vectors from different deployments never share cache keys.
    version: String,
}

impl std::fmt::Debug for HttpEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpEmbedder")
            .field("config", &self.config)
            .finish()
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    #[serde(default)]
    index: usize,
}

impl HttpEmbedder {
    pub fn new(config: HttpEmbedderConfig) -> Result<Self, EmbeddingError> {
        if config.base_url.trim().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "base_url is required".to_string(),
            });
        }

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| EmbeddingError::InvalidConfig {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        let version = format!("{}@{}", config.model, config.endpoint());

        Ok(Self {
            client,
            config,
            version,
        })
    }

    pub fn config(&self) -> &HttpEmbedderConfig {
        &self.config
    }

    #[instrument(skip(self, text), fields(model = %self.config.model, text_len = text.len()))]
    async fn request_embedding(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let body = EmbeddingRequest {
            model: &self.config.model,
            input: text,
        };

        let mut request = self.client.post(self.config.endpoint()).json(&body);
        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let status = status.as_u16();
            return Err(if status >= 500 {
                EmbeddingError::ProviderUnavailable {
                    reason: format!("HTTP {status}: {body}"),
                }
            } else {
                EmbeddingError::Http { status, body }
            });
        }

        let parsed: EmbeddingResponse = response.json().await?;
        let embedding = parsed
            .data
            .into_iter()
            .min_by_key(|d| d.index)
            .map(|d| d.embedding)
            .ok_or_else(|| EmbeddingError::InvalidVector {
                reason: "response contained no embeddings".to_string(),
            })?;

        debug!(dimension = embedding.len(), "Received embedding");
        Ok(embedding)
    }
}

impl EmbeddingProvider for HttpEmbedder {
    fn name(&self) -> &str {
        "http"
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.request_embedding(text).await
    }
}
