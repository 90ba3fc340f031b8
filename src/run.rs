//! Seeding run: category load, generation loop, then a single output write.

use crate::catalog::CategoryCatalog;
use crate::config::OwnerConfig;
use crate::error::SeedError;
use crate::generation::{CompanionGenerator, GenerationFailure, PromptDispatch};
use crate::output::{render_records, write_records};
use crate::provider::{CompletionOptions, ModelProviderClient};
use crate::roster::resolve_roster;
use std::path::PathBuf;
use tracing::info;

/// Inputs for one generation run. Paths are already resolved.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub categories_path: PathBuf,
    pub roster_path: Option<PathBuf>,
    pub output_path: PathBuf,
    pub owner: OwnerConfig,
    pub options: CompletionOptions,
    pub dispatch: PromptDispatch,
    /// Render the JSON instead of writing the output file.
    pub dry_run: bool,
}

/// What a run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub generated: usize,
    pub failed: usize,
    pub failures: Vec<GenerationFailure>,
    /// Set when the output file was written.
    pub output_path: Option<PathBuf>,
    /// Set on dry runs.
    pub rendered: Option<String>,
}

/// Execute a run against `client`. Category and output I/O errors are fatal; entity failures are not.
pub async fn run_generate(
    client: &dyn ModelProviderClient,
    request: &GenerateRequest,
) -> Result<RunSummary, SeedError> {
    let catalog = CategoryCatalog::load(&request.categories_path)?;
    let roster = resolve_roster(request.roster_path.as_deref())?;

    info!(
        provider = client.provider_name(),
        model = client.model_name(),
        entities = roster.len(),
        categories = catalog.len(),
        dispatch = ?request.dispatch,
        "Starting companion generation"
    );

    let report = CompanionGenerator::new(client, &catalog, &request.owner)
        .with_options(request.options.clone())
        .with_dispatch(request.dispatch)
        .generate_all(&roster)
        .await;

    let (output_path, rendered) = if request.dry_run {
        (None, Some(render_records(&report.records)?))
    } else {
        write_records(&request.output_path, &report.records)?;
        (Some(request.output_path.clone()), None)
    };

    Ok(RunSummary {
        generated: report.total_generated(),
        failed: report.total_failed(),
        failures: report.failures,
        output_path,
        rendered,
    })
}
