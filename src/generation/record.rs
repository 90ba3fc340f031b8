//! The companion record written to the output file.

use crate::config::OwnerConfig;
use crate::generation::generator::GeneratedFields;
use crate::roster::EntityDescriptor;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// One generated companion. Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionRecord {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub src: String,
    pub name: String,
    pub description: String,
    pub instructions: String,
    pub seed: String,
    pub private: bool,
    pub created_at: String,
    pub updated_at: String,
    /// Always serialized; `null` when the category name did not resolve.
    pub category_id: Option<String>,
}

impl CompanionRecord {
    /// Build a record with a fresh id. Both timestamps come from `generated_at`.
    pub fn assemble(
        entity: &EntityDescriptor,
        owner: &OwnerConfig,
        fields: GeneratedFields,
        category_id: Option<String>,
        generated_at: DateTime<Local>,
    ) -> Self {
        let timestamp = format_timestamp(&generated_at);
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: owner.id.clone(),
            user_name: owner.name.clone(),
            src: owner.src.clone(),
            name: entity.name.clone(),
            description: fields.description,
            instructions: fields.instructions,
            seed: fields.seed,
            private: false,
            created_at: timestamp.clone(),
            updated_at: timestamp,
            category_id,
        }
    }
}

/// `YYYY-MM-DD HH:MM:SS.mmm` in local time.
pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}
