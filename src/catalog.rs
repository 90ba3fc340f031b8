//! Category catalog: maps category display names to category ids.

use crate::error::SeedError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// A category as exported by the companion store. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// Category list loaded once per run. Keeps file order so the first match wins.
#[derive(Debug, Clone, Default)]
pub struct CategoryCatalog {
    categories: Vec<Category>,
}

impl CategoryCatalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Load a JSON array of category objects.
    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let content = std::fs::read_to_string(path).map_err(|source| SeedError::CategoryRead {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&content).map_err(|source| SeedError::CategoryParse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            path = %path.display(),
            categories = catalog.len(),
            "Loaded category catalog"
        );
        Ok(catalog)
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let categories: Vec<Category> = serde_json::from_str(content)?;
        Ok(Self::new(categories))
    }

    /// Id of the first category whose name equals `name` exactly.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|category| category.name == name)
            .map(|category| category.id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
