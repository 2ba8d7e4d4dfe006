//! Scoped configuration
//!
//! Job configuration is one YAML tree. Each component reads the subtree under
//! its dotted scope (ex: `extractor.mode_dashboard_execution`) and layers its
//! own defaults underneath through `#[serde(default)]`.

use serde::de::DeserializeOwned;
use serde_yaml::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("missing required key `{0}`")]
    Missing(String),

    #[error("invalid value for `{key}`: {reason}")]
    Invalid { key: String, reason: String },

    #[error("unreadable configuration: {0}")]
    Parse(String),
}

/// Subtree of `root` under a dotted `scope`.
///
/// A literal dotted key (`"extractor.restapi": {...}`) is accepted alongside
/// nested maps.
pub fn scoped<'a>(root: &'a Value, scope: &str) -> Option<&'a Value> {
    if scope.is_empty() {
        return Some(root);
    }
    if let Some(v) = root.get(scope) {
        return Some(v);
    }
    let (head, rest) = scope.split_once('.')?;
    scoped(root.get(head)?, rest)
}

/// Deserialize the subtree of `yaml` under `scope`.
///
/// A missing scope deserializes from an empty map so defaults still apply.
pub fn from_scoped_yaml<T: DeserializeOwned>(yaml: &str, scope: &str) -> Result<T, ConfigError> {
    let root: Value = serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
    let empty = Value::Mapping(Default::default());
    let tree = scoped(&root, scope).unwrap_or(&empty);
    serde_yaml::from_value(tree.clone()).map_err(|e| ConfigError::Parse(e.to_string()))
}

/// Fail with `Missing(key)` when a required value is empty.
pub fn require(key: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Missing(key.to_string()));
    }
    Ok(())
}
