// File import and export for the JSON viewer
use crate::error::Result;
use shared::models::JsonViewMode;
use std::fs;
use std::path::{Path, PathBuf};

pub const FORMATTED_FILENAME: &str = "formatted-data.json";
pub const MINIFIED_FILENAME: &str = "minified-data.json";

/// Reads a user-selected file as text. Invalid UTF-8 is replaced rather than
/// rejected; the validator reports anything that is not JSON.
pub fn import_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Imported file");
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn export_filename(mode: JsonViewMode) -> &'static str {
    match mode {
        JsonViewMode::Minified => MINIFIED_FILENAME,
        JsonViewMode::Tree | JsonViewMode::Formatted => FORMATTED_FILENAME,
    }
}

/// Writes `content` under the fixed download name for `mode` and returns
/// the path written.
pub fn export(dir: &Path, mode: JsonViewMode, content: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(export_filename(mode));
    fs::write(&path, content)?;
    tracing::info!(path = %path.display(), "Exported JSON");
    Ok(path)
}
