//! CLI presentation: text and json formatters per command.

use crate::error::SeedError;
use crate::run::RunSummary;
use comfy_table::Table;
use serde::Serialize;

/// One roster entity with its resolved category id.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterRow {
    pub name: String,
    pub category: String,
    pub category_id: Option<String>,
}

pub fn format_generate_summary(summary: &RunSummary) -> String {
    if let Some(rendered) = &summary.rendered {
        return rendered.trim_end().to_string();
    }

    let mut output = format!(
        "Generation completed: generated={}, failed={}",
        summary.generated, summary.failed
    );
    if let Some(path) = &summary.output_path {
        output.push_str(&format!("\nCompanion data saved to {}", path.display()));
    }
    if !summary.failures.is_empty() {
        output.push_str(&format!("\n\nSkipped ({}):", summary.failures.len()));
        for failure in &summary.failures {
            output.push_str(&format!(
                "\n  - {} [{}]: {}",
                failure.entity, failure.stage, failure.message
            ));
        }
    }
    output
}

pub fn format_roster_text(rows: &[RosterRow]) -> String {
    if rows.is_empty() {
        return "Roster is empty.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Name", "Category", "Category ID"]);
    for row in rows {
        table.add_row(vec![
            row.name.as_str(),
            row.category.as_str(),
            row.category_id.as_deref().unwrap_or("(none)"),
        ]);
    }
    let unresolved = rows.iter().filter(|r| r.category_id.is_none()).count();
    format!(
        "{}\nTotal: {} entit{} ({} without a category)",
        table,
        rows.len(),
        if rows.len() == 1 { "y" } else { "ies" },
        unresolved
    )
}

pub fn format_roster_json(rows: &[RosterRow]) -> Result<String, SeedError> {
    Ok(serde_json::to_string_pretty(rows)?)
}
