//! Companion Seed: LLM-generated seed companions
//!
//! Builds a companion profile (description, instructions, example dialogue) for every
//! entity in a roster by prompting a chat-completion API, links each entity to a
//! category id, and writes the results as a JSON array for database seeding.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod logging;
pub mod output;
pub mod prompt;
pub mod provider;
pub mod roster;
pub mod run;
