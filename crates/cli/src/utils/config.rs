//! Config file reading utilities

use crate::error::{CliError, CliResult};
use flagd_codec::ValueType;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Config file looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = ".flagd-edit.yaml";

/// Editor configuration from `.flagd-edit.yaml`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Spaces per level when writing JSON
    pub indent: usize,
    /// Also run the JSON Schema check on validate and export
    pub strict: bool,
    /// Value type used by `new` when `--type` is not given
    pub default_type: ValueType,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            strict: false,
            default_type: ValueType::Boolean,
        }
    }
}

/// Load the editor configuration.
///
/// Without an explicit path, a missing `.flagd-edit.yaml` means defaults.
/// An explicit path must exist.
pub fn load_config(config_path: Option<&str>) -> CliResult<EditorConfig> {
    let (path, explicit) = match config_path {
        Some(path) => (Path::new(path), true),
        None => (Path::new(DEFAULT_CONFIG_PATH), false),
    };

    if !path.exists() {
        if explicit {
            return Err(CliError::Message(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        tracing::debug!("No config file, using defaults");
        return Ok(EditorConfig::default());
    }

    let config_content = fs::read_to_string(path)
        .map_err(|e| CliError::Message(format!("Failed to read config file: {e}")))?;

    // an empty file deserializes as null
    if config_content.trim().is_empty() {
        return Ok(EditorConfig::default());
    }

    let config: EditorConfig = serde_yaml::from_str(&config_content)
        .map_err(|e| CliError::Message(format!("Failed to parse config file: {e}")))?;

    tracing::debug!(
        path = %path.display(),
        indent = config.indent,
        strict = config.strict,
        default_type = %config.default_type,
        "Loaded config"
    );
    Ok(config)
}
