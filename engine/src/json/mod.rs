// JSON viewer: validation, formatting, statistics
pub mod formatter;
pub mod helpers;
pub mod stats;
pub mod validator;

pub use formatter::{format, minify, sort_keys};
pub use helpers::{escape_json_string, looks_like_json, reformat_if_json, sample, tree, SampleKind};
pub use stats::stats;
pub use validator::validate;

use crate::error::Result;
use serde_json::Value;
use shared::models::{JsonFormatOptions, JsonViewMode};

/// Text for one of the three views of a parsed document.
pub fn render(value: &Value, mode: JsonViewMode, options: &JsonFormatOptions) -> Result<String> {
    match mode {
        JsonViewMode::Tree => Ok(tree(value)),
        JsonViewMode::Formatted => format(value, options),
        JsonViewMode::Minified => minify(value),
    }
}
