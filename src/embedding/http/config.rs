use std::time::Duration;

use crate::config::ConfigError;
use crate::constants::{DEFAULT_EMBEDDING_DIM, DEFAULT_PROVIDER_TIMEOUT_MS};

/// Default model requested from the endpoint.
pub const DEFAULT_EMBEDDING_MODEL: &str = "all-MiniLM-L6-v2";

#[derive(Clone)]
/// Configuration for [`HttpEmbedder`](super::HttpEmbedder).
pub struct HttpEmbedderConfig {
    /// Base URL; `/v1/embeddings` is appended.
    pub base_url: String,
    pub model: String,
    /// Sent as a bearer token when present.
    pub api_key: Option<String>,
    /// Dimension the model is expected to return.
    pub dimension: usize,
    /// Transport-level timeout. The semantic scorer applies its own on top.
    pub request_timeout: Duration,
}

impl std::fmt::Debug for HttpEmbedderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpEmbedderConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("dimension", &self.dimension)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl HttpEmbedderConfig {
    pub const ENV_URL: &'static str = "VERIFICATOR_EMBEDDING_URL";
    pub const ENV_MODEL: &'static str = "VERIFICATOR_EMBEDDING_MODEL";
    pub const ENV_API_KEY: &'static str = "VERIFICATOR_EMBEDDING_API_KEY";

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            api_key: None,
            dimension: DEFAULT_EMBEDDING_DIM,
            request_timeout: Duration::from_millis(DEFAULT_PROVIDER_TIMEOUT_MS),
        }
    }

    /// Loads config from environment variables. The URL is required.
    pub fn from_env(dimension: usize) -> Result<Self, ConfigError> {
        let base_url = read_env(Self::ENV_URL).ok_or(ConfigError::MissingEnvVar {
            name: Self::ENV_URL,
        })?;

        let mut config = Self::new(base_url).with_dimension(dimension);
        if let Some(model) = read_env(Self::ENV_MODEL) {
            config.model = model;
        }
        config.api_key = read_env(Self::ENV_API_KEY);
        Ok(config)
    }

    /// Returns `true` if an endpoint URL is configured in the environment.
    pub fn is_configured() -> bool {
        read_env(Self::ENV_URL).is_some()
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Full embeddings endpoint URL.
    pub fn endpoint(&self) -> String {
        format!("{}/v1/embeddings", self.base_url.trim_end_matches('/'))
    }
}

fn read_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
