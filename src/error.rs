//! Error types for companion seeding.

use crate::prompt::PromptKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while talking to a model provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider error: {0}")]
    Other(String),

    #[error("Provider request failed: {0}")]
    RequestFailed(String),

    #[error("Provider authentication failed: {0}")]
    AuthFailed(String),

    #[error("Provider rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Provider model not found: {0}")]
    ModelNotFound(String),

    #[error("Unexpected provider response: {0}")]
    InvalidResponse(String),
}

/// A single entity could not be generated. The entity is skipped; the run continues.
#[derive(Debug, Error)]
#[error("Generation failed for {entity} during {stage}: {source}")]
pub struct GenerationError {
    pub entity: String,
    pub stage: PromptKind,
    #[source]
    pub source: ProviderError,
}

/// Fatal errors that end a seeding run.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to read category file {path}: {source}")]
    CategoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid category file {path}: {source}")]
    CategoryParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read roster file {path}: {source}")]
    RosterRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid roster file {path}: {source}")]
    RosterParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl From<config::ConfigError> for SeedError {
    fn from(err: config::ConfigError) -> Self {
        SeedError::ConfigError(err.to_string())
    }
}
