//! Output writer: the generated companions as one pretty-printed JSON array.

use crate::error::SeedError;
use crate::generation::CompanionRecord;
use std::path::Path;
use tracing::info;

/// Render records as a JSON array with 2-space indentation and literal UTF-8.
pub fn render_records(records: &[CompanionRecord]) -> Result<String, SeedError> {
    let mut rendered = serde_json::to_string_pretty(records)?;
    rendered.push('\n');
    Ok(rendered)
}

/// Write records to `path`, replacing any existing file.
pub fn write_records(path: &Path, records: &[CompanionRecord]) -> Result<(), SeedError> {
    let rendered = render_records(records)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| SeedError::OutputWrite {
            path: path.to_path_buf(),
            source,
        })?;
    }

    std::fs::write(path, rendered).map_err(|source| SeedError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        path = %path.display(),
        records = records.len(),
        "Companion data written"
    );
    Ok(())
}
