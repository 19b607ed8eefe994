//! Lineage configuration
//!
//! Read from a YAML file, then overridden by environment variables:
//!
//! - `OPENLINEAGE_DISABLED`: turn extraction off entirely
//! - `OPENLINEAGE_EXTRACTORS`: semicolon-separated custom extractor names
//! - `OPENLINEAGE_DISABLED_FOR_OPERATORS`: semicolon-separated task types
//! - `OPENLINEAGE_AIRFLOW_DISABLE_SOURCE_CODE`: drop `sourceCode` job facets

use crate::error::{LineageError, LineageResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const ENV_DISABLED: &str = "OPENLINEAGE_DISABLED";
const ENV_EXTRACTORS: &str = "OPENLINEAGE_EXTRACTORS";
const ENV_DISABLED_FOR_OPERATORS: &str = "OPENLINEAGE_DISABLED_FOR_OPERATORS";
const ENV_DISABLE_SOURCE_CODE: &str = "OPENLINEAGE_AIRFLOW_DISABLE_SOURCE_CODE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineageConfig {
    /// Skip extraction for every task
    pub disabled: bool,
    /// Fully-qualified names of custom extractors to register
    pub extractors: Vec<String>,
    /// Task types for which extraction is skipped
    pub disabled_for_operators: Vec<String>,
    /// Keep `sourceCode` job facets in extracted lineage
    pub include_source_code: bool,
}

impl Default for LineageConfig {
    fn default() -> Self {
        Self {
            disabled: false,
            extractors: Vec::new(),
            disabled_for_operators: Vec::new(),
            include_source_code: true,
        }
    }
}

impl LineageConfig {
    /// Default config file location (`<config dir>/oplineage/config.yaml`)
    pub fn default_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".config"));
        config_dir.join("oplineage").join("config.yaml")
    }

    pub fn from_yaml(yaml: &str) -> LineageResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read a config file; a missing file yields the defaults.
    pub fn from_path(path: &Path) -> LineageResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no lineage config file; using defaults");
            return Ok(Self::default());
        }
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// Load the file at `path` (or the default path) and apply the process environment.
    pub fn load(path: Option<&Path>) -> LineageResult<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);
        Self::from_path(&path)?.with_env(std::env::vars())
    }

    /// Apply environment overrides from the given variables.
    pub fn with_env<I>(mut self, vars: I) -> LineageResult<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            match key.as_str() {
                ENV_DISABLED => self.disabled = parse_bool(&key, &value)?,
                ENV_EXTRACTORS => self.extractors = parse_list(&value),
                ENV_DISABLED_FOR_OPERATORS => self.disabled_for_operators = parse_list(&value),
                ENV_DISABLE_SOURCE_CODE => {
                    self.include_source_code = !parse_bool(&key, &value)?
                }
                _ => {}
            }
        }
        Ok(self)
    }

    pub fn is_operator_disabled(&self, task_type: &str) -> bool {
        self.disabled_for_operators.iter().any(|t| t == task_type)
    }
}

fn parse_bool(key: &str, value: &str) -> LineageResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(LineageError::Config(format!(
            "invalid boolean for {}: {}",
            key, other
        ))),
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
