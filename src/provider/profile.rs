//! Provider configuration schema owned by the provider domain.

use crate::error::SeedError;
use crate::provider::{CompletionOptions, ModelProvider, OllamaClient, OpenAIClient};
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Environment variable consulted when no OpenAI key is configured.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Provider type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    OpenAI,
    Ollama,
}

impl ProviderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderType::OpenAI => "openai",
            ProviderType::Ollama => "ollama",
        }
    }

    pub fn default_endpoint(&self) -> &'static str {
        match self {
            ProviderType::OpenAI => OpenAIClient::DEFAULT_BASE_URL,
            ProviderType::Ollama => OllamaClient::DEFAULT_BASE_URL,
        }
    }
}

/// Provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider type
    #[serde(default = "default_provider_type")]
    pub provider_type: ProviderType,

    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// API key. Falls back to `OPENAI_API_KEY` for OpenAI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL override (OpenAI-compatible servers, remote Ollama)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Options applied to every completion request
    #[serde(default)]
    pub default_options: CompletionOptions,
}

fn default_provider_type() -> ProviderType {
    ProviderType::OpenAI
}

fn default_model() -> String {
    "gpt-4".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: default_provider_type(),
            model: default_model(),
            api_key: None,
            endpoint: None,
            default_options: CompletionOptions::default(),
        }
    }
}

impl ProviderConfig {
    /// Configured key, else the provider's environment variable. Empty keys count as absent.
    pub fn resolved_api_key(&self) -> Option<String> {
        let configured = self
            .api_key
            .as_ref()
            .filter(|key| !key.trim().is_empty())
            .cloned();
        match self.provider_type {
            ProviderType::OpenAI => configured.or_else(|| {
                std::env::var(OPENAI_API_KEY_ENV)
                    .ok()
                    .filter(|key| !key.trim().is_empty())
            }),
            ProviderType::Ollama => configured,
        }
    }

    /// Validate provider configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("Model cannot be empty".to_string());
        }

        if let Some(endpoint) = &self.endpoint {
            Url::parse(endpoint)
                .map_err(|e| format!("Invalid endpoint URL '{}': {}", endpoint, e))?;
        }

        if let Some(temperature) = self.default_options.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(format!(
                    "Temperature must be between 0.0 and 2.0, got {}",
                    temperature
                ));
            }
        }

        if self.provider_type == ProviderType::OpenAI && self.resolved_api_key().is_none() {
            return Err(format!(
                "API key is required for openai (set provider.api_key or {})",
                OPENAI_API_KEY_ENV
            ));
        }

        Ok(())
    }

    /// Configured endpoint, else the provider's default.
    pub fn resolved_endpoint(&self) -> &str {
        self.endpoint
            .as_deref()
            .filter(|endpoint| !endpoint.trim().is_empty())
            .unwrap_or_else(|| self.provider_type.default_endpoint())
    }

    /// Convert to the runtime provider description
    pub fn to_model_provider(&self) -> Result<ModelProvider, SeedError> {
        match self.provider_type {
            ProviderType::OpenAI => {
                let api_key = self.resolved_api_key().ok_or_else(|| {
                    SeedError::ConfigError(format!(
                        "API key is required for openai (set provider.api_key or {})",
                        OPENAI_API_KEY_ENV
                    ))
                })?;
                Ok(ModelProvider::OpenAI {
                    model: self.model.clone(),
                    api_key,
                    base_url: Some(self.resolved_endpoint().to_string()),
                })
            }
            ProviderType::Ollama => Ok(ModelProvider::Ollama {
                model: self.model.clone(),
                base_url: Some(self.resolved_endpoint().to_string()),
            }),
        }
    }
}
