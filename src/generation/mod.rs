//! Companion generation: three prompts per entity, one typed outcome per entity.

pub mod generator;
pub mod record;

pub use generator::{
    CompanionGenerator, GeneratedFields, GenerationFailure, GenerationOutcome, GenerationReport,
    PromptDispatch,
};
pub use record::{format_timestamp, CompanionRecord};
