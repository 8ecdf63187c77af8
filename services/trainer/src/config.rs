//! Environment configuration for the trainer binary.
//!
//! Unlike a hosted service, the grammar advisory is an optional feature
//! here: a missing API key leaves it disabled instead of failing startup.
//! Only genuinely invalid values are configuration errors.

use async_openai::config::OpenAIConfig;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Defines the supported backend providers for the grammar advisory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Provider {
    OpenAI,
    Gemini,
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub provider: Provider,
    pub openai_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub chat_model: String,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let provider_str =
            std::env::var("GRAMMAR_PROVIDER").unwrap_or_else(|_| "openai".to_string());
        let provider = match provider_str.to_lowercase().as_str() {
            "gemini" => Provider::Gemini,
            _ => Provider::OpenAI,
        };

        let openai_api_key = std::env::var("OPENAI_API_KEY").ok();
        let gemini_api_key = std::env::var("GEMINI_API_KEY").ok();

        let chat_model = std::env::var("CHAT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            provider,
            openai_api_key,
            gemini_api_key,
            chat_model,
            log_level,
        })
    }

    /// The API key for the selected provider, if one is configured.
    pub fn api_key(&self) -> Option<&str> {
        match self.provider {
            Provider::OpenAI => self.openai_api_key.as_deref(),
            Provider::Gemini => self.gemini_api_key.as_deref(),
        }
    }

    /// Client configuration for the selected provider, or `None` when no
    /// key is available and the advisory cannot be constructed.
    pub fn advisory_client_config(&self) -> Option<OpenAIConfig> {
        let key = self.api_key()?;
        let config = match self.provider {
            Provider::OpenAI => OpenAIConfig::new()
                .with_api_key(key)
                .with_api_base("https://api.openai.com/v1/"),
            Provider::Gemini => OpenAIConfig::new()
                .with_api_key(key)
                .with_api_base("https://generativelanguage.googleapis.com/v1beta/openai"),
        };
        Some(config)
    }
}
