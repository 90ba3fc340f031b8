//! Configuration System
//!
//! Layered configuration for a seeding run: built-in defaults, the global config file,
//! workspace config files, then `COMPANION_SEED_*` environment variables. Credentials and
//! owner identity are only ever supplied here, never compiled in.

use crate::generation::PromptDispatch;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use crate::provider::{ProviderConfig, ProviderType};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Prefix for environment overrides, e.g. `COMPANION_SEED_PROVIDER__API_KEY`.
pub const ENV_PREFIX: &str = "COMPANION_SEED";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Chat-completion provider
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Owner stamped onto every generated record
    #[serde(default)]
    pub owner: OwnerConfig,

    /// Input and output file locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Generation behavior
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Owner fields copied into `userId`, `userName` and `src`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerConfig {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Avatar source; empty by default
    #[serde(default)]
    pub src: String,
}

/// File locations. Relative paths resolve against the workspace root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_categories_path")]
    pub categories: PathBuf,

    /// Roster file; the built-in roster is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roster: Option<PathBuf>,

    #[serde(default = "default_output_path")]
    pub output: PathBuf,
}

fn default_categories_path() -> PathBuf {
    PathBuf::from("Category.json")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("Generated_Companions.json")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            categories: default_categories_path(),
            roster: None,
            output: default_output_path(),
        }
    }
}

/// Paths after resolution against a workspace root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub categories: PathBuf,
    pub roster: Option<PathBuf>,
    pub output: PathBuf,
}

impl PathsConfig {
    pub fn resolve(&self, workspace_root: &Path) -> ResolvedPaths {
        ResolvedPaths {
            categories: resolve_against(workspace_root, &self.categories),
            roster: self
                .roster
                .as_ref()
                .map(|roster| resolve_against(workspace_root, roster)),
            output: resolve_against(workspace_root, &self.output),
        }
    }
}

fn resolve_against(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Generation behavior
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// `sequential` (default) or `concurrent` dispatch of the three prompts
    #[serde(default)]
    pub dispatch: PromptDispatch,
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Provider(String),
    Owner(String),
    Paths(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Provider(msg) => write!(f, "Provider: {}", msg),
            ValidationError::Owner(msg) => write!(f, "Owner: {}", msg),
            ValidationError::Paths(msg) => write!(f, "Paths: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl OwnerConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("owner.id cannot be empty".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("owner.name cannot be empty".to_string());
        }
        Ok(())
    }
}

impl PathsConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.categories.as_os_str().is_empty() {
            return Err("paths.categories cannot be empty".to_string());
        }
        if self.output.as_os_str().is_empty() {
            return Err("paths.output cannot be empty".to_string());
        }
        Ok(())
    }
}

impl SeedConfig {
    /// Validate everything a generation run needs.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.provider.validate() {
            errors.push(ValidationError::Provider(e));
        }
        if let Err(e) = self.owner.validate() {
            errors.push(ValidationError::Owner(e));
        }
        if let Err(e) = self.paths.validate() {
            errors.push(ValidationError::Paths(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Copy with the API key masked, for display.
    pub fn redacted(&self) -> SeedConfig {
        let mut config = self.clone();
        if config.provider.api_key.is_some() {
            config.provider.api_key = Some("********".to_string());
        }
        config
    }
}
