//! Verifier configuration.
//!
//! Every setting has a default. Override with `VERIFICATOR_*` environment variables via
//! [`Config::from_env`], or build a [`Config`] directly and pass it to the verifier.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_CONCEPT_WEIGHT, DEFAULT_EMBEDDING_DIM, DEFAULT_HIGH_THRESHOLD,
    DEFAULT_LEXICAL_WEIGHT, DEFAULT_LOW_THRESHOLD, DEFAULT_PROVIDER_TIMEOUT_MS,
    DEFAULT_SEMANTIC_WEIGHT, DimConfig,
};
use crate::normalize::Language;

/// Weight of each signal kind in the aggregate confidence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalWeights {
    /// Default: `0.3`.
    pub lexical: f32,
    /// Default: `0.7`.
    pub semantic: f32,
    /// Default: `0.0` (coverage gates the verdict class instead).
    pub concept_coverage: f32,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            lexical: DEFAULT_LEXICAL_WEIGHT,
            semantic: DEFAULT_SEMANTIC_WEIGHT,
            concept_coverage: DEFAULT_CONCEPT_WEIGHT,
        }
    }
}

/// Confidence bands. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Minimum confidence for Correct. Default: `0.80`.
    pub high: f32,
    /// Minimum confidence for PartiallyCorrect. Default: `0.50`.
    pub low: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            high: DEFAULT_HIGH_THRESHOLD,
            low: DEFAULT_LOW_THRESHOLD,
        }
    }
}

/// Verifier configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub weights: SignalWeights,

    pub thresholds: Thresholds,

    /// Normalization resources. Default: English.
    pub language: Language,

    /// Upper bound on a single embedding provider call. Default: 5 s.
    pub provider_timeout: Duration,

    /// Max cached reference embeddings. Default: `1_000`.
    pub cache_capacity: u64,

    /// Evict reference embeddings unused for this long. Default: never.
    pub cache_idle_timeout: Option<Duration>,

    /// Dimension every provider embedding must have. Default: `384`.
    pub embedding_dim: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weights: SignalWeights::default(),
            thresholds: Thresholds::default(),
            language: Language::default(),
            provider_timeout: Duration::from_millis(DEFAULT_PROVIDER_TIMEOUT_MS),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_idle_timeout: None,
            embedding_dim: DEFAULT_EMBEDDING_DIM,
        }
    }
}

impl Config {
    const ENV_WEIGHT_LEXICAL: &'static str = "VERIFICATOR_WEIGHT_LEXICAL";
    const ENV_WEIGHT_SEMANTIC: &'static str = "VERIFICATOR_WEIGHT_SEMANTIC";
    const ENV_WEIGHT_CONCEPTS: &'static str = "VERIFICATOR_WEIGHT_CONCEPTS";
    const ENV_THRESHOLD_HIGH: &'static str = "VERIFICATOR_THRESHOLD_HIGH";
    const ENV_THRESHOLD_LOW: &'static str = "VERIFICATOR_THRESHOLD_LOW";
    const ENV_LANGUAGE: &'static str = "VERIFICATOR_LANGUAGE";
    const ENV_PROVIDER_TIMEOUT_MS: &'static str = "VERIFICATOR_PROVIDER_TIMEOUT_MS";
    const ENV_CACHE_CAPACITY: &'static str = "VERIFICATOR_CACHE_CAPACITY";
    const ENV_CACHE_IDLE_SECS: &'static str = "VERIFICATOR_CACHE_IDLE_SECS";
    const ENV_EMBEDDING_DIM: &'static str = "VERIFICATOR_EMBEDDING_DIM";

    /// Loads configuration from environment variables (falling back to defaults).
    ///
    /// Unparsable values are errors rather than silent fallbacks. The result is not
    /// validated; call [`Config::validate`] (the verifier does so on construction).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let weights = SignalWeights {
            lexical: Self::parse_from_env(Self::ENV_WEIGHT_LEXICAL, defaults.weights.lexical)?,
            semantic: Self::parse_from_env(Self::ENV_WEIGHT_SEMANTIC, defaults.weights.semantic)?,
            concept_coverage: Self::parse_from_env(
                Self::ENV_WEIGHT_CONCEPTS,
                defaults.weights.concept_coverage,
            )?,
        };

        let thresholds = Thresholds {
            high: Self::parse_from_env(Self::ENV_THRESHOLD_HIGH, defaults.thresholds.high)?,
            low: Self::parse_from_env(Self::ENV_THRESHOLD_LOW, defaults.thresholds.low)?,
        };

        let language = match Self::read_env(Self::ENV_LANGUAGE) {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::UnsupportedLanguage { value })?,
            None => defaults.language,
        };

        let timeout_ms = Self::parse_from_env(
            Self::ENV_PROVIDER_TIMEOUT_MS,
            defaults.provider_timeout.as_millis() as u64,
        )?;

        let cache_capacity = Self::parse_from_env(Self::ENV_CACHE_CAPACITY, defaults.cache_capacity)?;

        let cache_idle_timeout = match Self::read_env(Self::ENV_CACHE_IDLE_SECS) {
            Some(_) => Some(Duration::from_secs(Self::parse_from_env(
                Self::ENV_CACHE_IDLE_SECS,
                0u64,
            )?)),
            None => defaults.cache_idle_timeout,
        };

        let embedding_dim = Self::parse_from_env(Self::ENV_EMBEDDING_DIM, defaults.embedding_dim)?;

        Ok(Self {
            weights,
            thresholds,
            language,
            provider_timeout: Duration::from_millis(timeout_ms),
            cache_capacity,
            cache_idle_timeout,
            embedding_dim,
        })
    }

    /// Checks ranges and ordering of weights and thresholds plus basic resource bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::check_weight("lexical", self.weights.lexical)?;
        Self::check_weight("semantic", self.weights.semantic)?;
        Self::check_weight("concept_coverage", self.weights.concept_coverage)?;

        if self.weights.lexical == 0.0 && self.weights.semantic == 0.0 {
            return Err(ConfigError::ZeroWeights);
        }

        Self::check_threshold("high", self.thresholds.high)?;
        Self::check_threshold("low", self.thresholds.low)?;

        if self.thresholds.low > self.thresholds.high {
            return Err(ConfigError::ThresholdOrder {
                low: self.thresholds.low,
                high: self.thresholds.high,
            });
        }

        if self.provider_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }

        if self.cache_capacity == 0 {
            return Err(ConfigError::ZeroCacheCapacity);
        }

        self.dims()
            .validate()
            .map_err(|_| ConfigError::ZeroDimension)?;

        Ok(())
    }

    /// Embedding dimension settings derived from this config.
    pub fn dims(&self) -> DimConfig {
        DimConfig::new(self.embedding_dim)
    }

    /// Returns a copy with the given thresholds.
    pub fn with_thresholds(mut self, high: f32, low: f32) -> Self {
        self.thresholds = Thresholds { high, low };
        self
    }

    /// Returns a copy with the given lexical/semantic weights.
    pub fn with_weights(mut self, lexical: f32, semantic: f32) -> Self {
        self.weights.lexical = lexical;
        self.weights.semantic = semantic;
        self
    }

    fn check_weight(name: &'static str, value: f32) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::WeightOutOfRange { name, value });
        }
        Ok(())
    }

    fn check_threshold(name: &'static str, value: f32) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::ThresholdOutOfRange { name, value });
        }
        Ok(())
    }

    fn read_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_from_env<T>(var_name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match Self::read_env(var_name) {
            Some(value) => value.parse().map_err(|e: T::Err| ConfigError::ParseError {
                name: var_name,
                reason: e.to_string(),
                value,
            }),
            None => Ok(default),
        }
    }
}
