//! Merge rules: defaults first, every later source overrides earlier ones.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("provider.provider_type", "openai")?
        .set_default("provider.model", "gpt-4")?
        .set_default("paths.categories", "Category.json")?
        .set_default("paths.output", "Generated_Companions.json")?
        .set_default("generation.dispatch", "sequential")
}
