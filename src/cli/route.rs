//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::catalog::CategoryCatalog;
use crate::config::{ConfigLoader, ResolvedPaths, SeedConfig};
use crate::error::SeedError;
use crate::generation::PromptDispatch;
use crate::provider::ProviderFactory;
use crate::roster::resolve_roster;
use crate::run::{run_generate, GenerateRequest};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_generate_summary, format_roster_json, format_roster_text, RosterRow,
};

/// Runtime context for CLI execution: workspace root and the loaded configuration.
/// Built from workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    workspace_root: PathBuf,
    config: SeedConfig,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, SeedError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        Ok(Self {
            workspace_root,
            config,
        })
    }

    /// Loaded configuration.
    pub fn config(&self) -> &SeedConfig {
        &self.config
    }

    /// Workspace root that relative paths resolve against.
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Execute a command and return its printable output.
    pub fn execute(&self, command: &Commands) -> Result<String, SeedError> {
        match command {
            Commands::Generate {
                output,
                categories,
                roster,
                concurrent_prompts,
                dry_run,
            } => self.handle_generate(
                output.as_deref(),
                categories.as_deref(),
                roster.as_deref(),
                *concurrent_prompts,
                *dry_run,
            ),
            Commands::Roster {
                categories,
                roster,
                format,
            } => self.handle_roster(categories.as_deref(), roster.as_deref(), format),
            Commands::Config => Ok(toml::to_string_pretty(&self.config.redacted())
                .map_err(|e| SeedError::ConfigError(format!("Failed to render config: {}", e)))?
                .trim_end()
                .to_string()),
        }
    }

    /// Config paths resolved against the workspace, with CLI overrides applied on top.
    fn resolve_paths(
        &self,
        output: Option<&Path>,
        categories: Option<&Path>,
        roster: Option<&Path>,
    ) -> ResolvedPaths {
        let mut paths = self.config.paths.clone();
        if let Some(output) = output {
            paths.output = output.to_path_buf();
        }
        if let Some(categories) = categories {
            paths.categories = categories.to_path_buf();
        }
        if let Some(roster) = roster {
            paths.roster = Some(roster.to_path_buf());
        }
        paths.resolve(&self.workspace_root)
    }

    fn handle_generate(
        &self,
        output: Option<&Path>,
        categories: Option<&Path>,
        roster: Option<&Path>,
        concurrent_prompts: bool,
        dry_run: bool,
    ) -> Result<String, SeedError> {
        if let Err(errors) = self.config.validate() {
            let joined = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(SeedError::ConfigError(joined));
        }

        let paths = self.resolve_paths(output, categories, roster);
        let dispatch = if concurrent_prompts {
            PromptDispatch::Concurrent
        } else {
            self.config.generation.dispatch
        };
        let request = GenerateRequest {
            categories_path: paths.categories,
            roster_path: paths.roster,
            output_path: paths.output,
            owner: self.config.owner.clone(),
            options: self.config.provider.default_options.clone(),
            dispatch,
            dry_run,
        };
        debug!(
            categories = ?request.categories_path,
            output = ?request.output_path,
            dry_run,
            "Resolved generate request"
        );

        let client = ProviderFactory::create_client(&self.config.provider.to_model_provider()?)?;

        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(SeedError::Runtime(
                "Cannot run generation from within an async runtime context".to_string(),
            ));
        }
        let rt = tokio::runtime::Runtime::new()
            .map_err(|e| SeedError::Runtime(format!("Failed to create runtime: {}", e)))?;

        let summary = rt.block_on(run_generate(client.as_ref(), &request))?;
        Ok(format_generate_summary(&summary))
    }

    fn handle_roster(
        &self,
        categories: Option<&Path>,
        roster: Option<&Path>,
        format: &str,
    ) -> Result<String, SeedError> {
        let paths = self.resolve_paths(None, categories, roster);
        let catalog = CategoryCatalog::load(&paths.categories)?;
        let entities = resolve_roster(paths.roster.as_deref())?;

        let rows: Vec<RosterRow> = entities
            .into_iter()
            .map(|entity| RosterRow {
                category_id: catalog.resolve(&entity.category).map(str::to_string),
                name: entity.name,
                category: entity.category,
            })
            .collect();

        match format {
            "json" => format_roster_json(&rows),
            _ => Ok(format_roster_text(&rows)),
        }
    }
}
