//! Companion generator: runs the three prompts for each roster entity and collects outcomes.
//! Entities are processed strictly in roster order; a failed entity yields no record.

use crate::catalog::CategoryCatalog;
use crate::config::OwnerConfig;
use crate::error::GenerationError;
use crate::generation::record::CompanionRecord;
use crate::prompt::PromptKind;
use crate::provider::{ChatMessage, CompletionOptions, ModelProviderClient};
use crate::roster::EntityDescriptor;
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// How the three prompts of a single entity are dispatched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptDispatch {
    /// Description, then instructions, then seed.
    #[default]
    Sequential,
    /// All three in flight together; the first failure abandons the entity.
    Concurrent,
}

/// The generated text for one entity, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFields {
    pub description: String,
    pub instructions: String,
    pub seed: String,
}

/// Result of generating one entity.
#[derive(Debug)]
pub enum GenerationOutcome {
    Generated(CompanionRecord),
    Failed(GenerationError),
}

/// Why an entity was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationFailure {
    pub entity: String,
    pub stage: PromptKind,
    pub message: String,
}

impl From<&GenerationError> for GenerationFailure {
    fn from(err: &GenerationError) -> Self {
        Self {
            entity: err.entity.clone(),
            stage: err.stage,
            message: err.source.to_string(),
        }
    }
}

/// Records in roster order plus the entities that were skipped.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub records: Vec<CompanionRecord>,
    pub failures: Vec<GenerationFailure>,
}

impl GenerationReport {
    pub fn total_generated(&self) -> usize {
        self.records.len()
    }

    pub fn total_failed(&self) -> usize {
        self.failures.len()
    }

    fn push(&mut self, outcome: GenerationOutcome) {
        match outcome {
            GenerationOutcome::Generated(record) => self.records.push(record),
            GenerationOutcome::Failed(err) => self.failures.push(GenerationFailure::from(&err)),
        }
    }
}

/// Generates companion records against a single provider client.
pub struct CompanionGenerator<'a> {
    client: &'a dyn ModelProviderClient,
    catalog: &'a CategoryCatalog,
    owner: &'a OwnerConfig,
    options: CompletionOptions,
    dispatch: PromptDispatch,
}

impl<'a> CompanionGenerator<'a> {
    pub fn new(
        client: &'a dyn ModelProviderClient,
        catalog: &'a CategoryCatalog,
        owner: &'a OwnerConfig,
    ) -> Self {
        Self {
            client,
            catalog,
            owner,
            options: CompletionOptions::default(),
            dispatch: PromptDispatch::default(),
        }
    }

    pub fn with_options(mut self, options: CompletionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_dispatch(mut self, dispatch: PromptDispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    /// Generate every entity in order. Failures are logged and omitted from the records.
    pub async fn generate_all(&self, roster: &[EntityDescriptor]) -> GenerationReport {
        let mut report = GenerationReport::default();
        for entity in roster {
            report.push(self.generate_outcome(entity).await);
        }
        info!(
            generated = report.total_generated(),
            failed = report.total_failed(),
            "Companion generation finished"
        );
        report
    }

    /// Generate one entity, folding any failure into the outcome.
    pub async fn generate_outcome(&self, entity: &EntityDescriptor) -> GenerationOutcome {
        match self.generate_one(entity).await {
            Ok(record) => GenerationOutcome::Generated(record),
            Err(err) => {
                error!(
                    entity = %err.entity,
                    stage = %err.stage,
                    error = %err.source,
                    "Error generating companion"
                );
                GenerationOutcome::Failed(err)
            }
        }
    }

    /// Generate one entity. Any prompt failure abandons the whole entity.
    pub async fn generate_one(
        &self,
        entity: &EntityDescriptor,
    ) -> Result<CompanionRecord, GenerationError> {
        info!(entity = %entity.name, "Generating companion");

        let fields = match self.dispatch {
            PromptDispatch::Sequential => GeneratedFields {
                description: self.complete_prompt(entity, PromptKind::Description).await?,
                instructions: self.complete_prompt(entity, PromptKind::Instructions).await?,
                seed: self.complete_prompt(entity, PromptKind::Seed).await?,
            },
            PromptDispatch::Concurrent => {
                let (description, instructions, seed) = futures::try_join!(
                    self.complete_prompt(entity, PromptKind::Description),
                    self.complete_prompt(entity, PromptKind::Instructions),
                    self.complete_prompt(entity, PromptKind::Seed),
                )?;
                GeneratedFields {
                    description,
                    instructions,
                    seed,
                }
            }
        };

        let category_id = self.catalog.resolve(&entity.category).map(str::to_string);
        if category_id.is_none() {
            info!(
                entity = %entity.name,
                category = %entity.category,
                "Category not found; categoryId will be null"
            );
        }

        Ok(CompanionRecord::assemble(
            entity,
            self.owner,
            fields,
            category_id,
            Local::now(),
        ))
    }

    async fn complete_prompt(
        &self,
        entity: &EntityDescriptor,
        kind: PromptKind,
    ) -> Result<String, GenerationError> {
        info!(entity = %entity.name, stage = %kind, "Generating {}", kind);
        let messages = vec![ChatMessage::user(kind.render(&entity.name))];
        let response = self
            .client
            .complete(messages, self.options.clone())
            .await
            .map_err(|source| GenerationError {
                entity: entity.name.clone(),
                stage: kind,
                source,
            })?;
        info!(entity = %entity.name, stage = %kind, "Generated {}", kind);
        Ok(response.content.trim().to_string())
    }
}
