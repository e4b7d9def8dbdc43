// Engine settings, loaded from the embedded defaults and an optional user file
use crate::error::{EngineError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV_VAR: &str = "TOOLS_CONFIG";

const DEFAULT_CONFIG: &str = include_str!("../../assets/config/default.json");

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    /// File backing the key-value store (the countdown list lives here).
    pub storage_path: PathBuf,
    /// Directory that receives `formatted-data.json` / `minified-data.json`.
    pub export_dir: PathBuf,
    pub json_indent: usize,
    pub json_sort_keys: bool,
    pub refresh_interval_ms: u64,
    pub log_level: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            storage_path: PathBuf::from("tools-storage.json"),
            export_dir: PathBuf::from("."),
            json_indent: 2,
            json_sort_keys: false,
            refresh_interval_ms: 1000,
            log_level: "warn".to_string(),
        }
    }
}

impl EngineSettings {
    /// Settings from the defaults bundled with the binary.
    pub fn load_default() -> Result<Self> {
        serde_json::from_str(DEFAULT_CONFIG)
            .map_err(|e| EngineError::ConfigError(format!("embedded defaults are invalid: {}", e)))
    }

    /// Loads a user settings file on top of the bundled defaults.
    ///
    /// Keys missing from the user file keep their default values; unknown
    /// keys are ignored.
    pub fn load(path: &Path) -> Result<Self> {
        let mut merged: Value = serde_json::from_str(DEFAULT_CONFIG)?;
        let raw = std::fs::read_to_string(path).map_err(|e| {
            EngineError::ConfigError(format!("cannot read '{}': {}", path.display(), e))
        })?;
        let user: Value = serde_json::from_str(&raw).map_err(|e| {
            EngineError::ConfigError(format!("'{}' is not valid JSON: {}", path.display(), e))
        })?;

        match (merged.as_object_mut(), user) {
            (Some(base), Value::Object(overrides)) => {
                for (key, value) in overrides {
                    base.insert(key, value);
                }
            }
            _ => {
                return Err(EngineError::ConfigError(format!(
                    "'{}' must contain a JSON object",
                    path.display()
                )))
            }
        }

        let settings: EngineSettings = serde_json::from_value(merged)
            .map_err(|e| EngineError::ConfigError(format!("'{}': {}", path.display(), e)))?;
        settings.validate()?;
        tracing::debug!(path = %path.display(), "Loaded settings file");
        Ok(settings)
    }

    /// Resolves the settings source: explicit path, then `TOOLS_CONFIG`,
    /// then the bundled defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => Self::load(Path::new(&path)),
            _ => Self::load_default(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.refresh_interval_ms == 0 {
            return Err(EngineError::ConfigError(
                "refresh_interval_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
