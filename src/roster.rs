//! Roster: the ordered list of entities to generate companions for.

use crate::error::SeedError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// An entity to build a companion from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    pub name: String,
    /// Category display name, resolved against the catalog.
    pub category: String,
}

impl EntityDescriptor {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
        }
    }
}

const DEFAULT_ROSTER: &[(&str, &str)] = &[
    ("Albert Einstein", "Scientists"),
    ("Socrates", "Philosophy"),
    ("Call of Duty", "Games"),
    ("Fortnite", "Games"),
    ("Cat", "Animals"),
    ("Dog", "Animals"),
    ("Walter White", "Movies & TV"),
    ("Mr Beast", "Movies & TV"),
    ("IShowSpeed", "Movies & TV"),
    ("Bob Marley", "Musicians"),
    ("J. Cole", "Musicians"),
    ("The Weeknd", "Musicians"),
    ("Kendrick Lamar", "Musicians"),
    ("Taylor Swift", "Musicians"),
    ("Lionel Messi", "Musicians"),
    ("Cristiano Ronaldo", "Musicians"),
];

/// Built-in roster used when no roster file is configured.
pub fn default_roster() -> Vec<EntityDescriptor> {
    DEFAULT_ROSTER
        .iter()
        .map(|(name, category)| EntityDescriptor::new(*name, *category))
        .collect()
}

/// Load a roster from a JSON array of `{name, category}` objects.
pub fn load_roster(path: &Path) -> Result<Vec<EntityDescriptor>, SeedError> {
    let content = std::fs::read_to_string(path).map_err(|source| SeedError::RosterRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| SeedError::RosterParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Roster file when configured, otherwise the built-in roster.
pub fn resolve_roster(path: Option<&Path>) -> Result<Vec<EntityDescriptor>, SeedError> {
    match path {
        Some(path) => load_roster(path),
        None => Ok(default_roster()),
    }
}
