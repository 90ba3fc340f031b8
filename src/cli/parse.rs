//! CLI parse: clap types for companion-seed. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// companion-seed - generate seed companion profiles with an LLM
#[derive(Parser)]
#[command(name = "companion-seed")]
#[command(about = "Generate seed companion profiles by prompting an LLM chat-completion API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root; relative config paths resolve against it
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging
    #[arg(long, default_value = "false", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate companions for every roster entity and write them as JSON
    Generate {
        /// Output file (overrides paths.output)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Category file (overrides paths.categories)
        #[arg(long)]
        categories: Option<PathBuf>,
        /// Roster file (overrides paths.roster)
        #[arg(long)]
        roster: Option<PathBuf>,
        /// Send the three prompts of each entity concurrently
        #[arg(long)]
        concurrent_prompts: bool,
        /// Print the JSON instead of writing the output file
        #[arg(long)]
        dry_run: bool,
    },
    /// Show roster entities and their resolved category ids
    Roster {
        /// Category file (overrides paths.categories)
        #[arg(long)]
        categories: Option<PathBuf>,
        /// Roster file (overrides paths.roster)
        #[arg(long)]
        roster: Option<PathBuf>,
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// Show the resolved configuration with secrets masked
    Config,
}
