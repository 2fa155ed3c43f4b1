//! Mapper configuration parsing.

use crate::{ConfigError, ConfigResult};
use kdl::{KdlDocument, KdlNode, KdlValue};
use pipesync_core::{DEFAULT_SCRIPT_PATH, PIPELINE_STRATEGY_TYPE};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options controlling how resources and jobs are mapped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapperConfig {
    /// Strategy type that marks a resource as pipeline-driven.
    pub strategy_type: String,
    /// Script path used when a resource names none.
    pub default_script_path: String,
    /// Re-derive git URL/ref from the job's checkout on every reconcile,
    /// including edits that only touched the script path.
    pub sync_remote: bool,
    /// Run inline scripts in the script sandbox.
    pub sandbox: bool,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            strategy_type: PIPELINE_STRATEGY_TYPE.to_string(),
            default_script_path: DEFAULT_SCRIPT_PATH.to_string(),
            sync_remote: true,
            sandbox: true,
        }
    }
}

/// Parse mapper configuration from KDL text. Absent nodes keep their defaults.
pub fn parse_mapper_config(kdl: &str) -> ConfigResult<MapperConfig> {
    let doc: KdlDocument = kdl.parse()?;
    let mut config = MapperConfig::default();

    for node in doc.nodes() {
        match node.name().value() {
            "strategy-type" => config.strategy_type = required_string(node)?,
            "default-script-path" => config.default_script_path = required_string(node)?,
            "sync-remote" => config.sync_remote = required_bool(node)?,
            "sandbox" => config.sandbox = required_bool(node)?,
            _ => {} // Ignore unknown nodes
        }
    }

    Ok(config)
}

/// Read and parse a configuration file.
pub fn load_mapper_config(path: impl AsRef<Path>) -> ConfigResult<MapperConfig> {
    let content = std::fs::read_to_string(path)?;
    parse_mapper_config(&content)
}

fn first_arg(node: &KdlNode) -> Option<&KdlValue> {
    node.entries()
        .iter()
        .find(|e| e.name().is_none())
        .map(|e| e.value())
}

fn required_string(node: &KdlNode) -> ConfigResult<String> {
    let field = node.name().value();
    let value = first_arg(node).ok_or_else(|| ConfigError::MissingField(field.to_string()))?;
    let s = value.as_string().ok_or_else(|| ConfigError::InvalidValue {
        field: field.to_string(),
        message: format!("expected a string, got {}", value),
    })?;
    if s.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            message: "must not be empty".to_string(),
        });
    }
    Ok(s.to_string())
}

fn required_bool(node: &KdlNode) -> ConfigResult<bool> {
    let field = node.name().value();
    let value = first_arg(node).ok_or_else(|| ConfigError::MissingField(field.to_string()))?;
    value.as_bool().ok_or_else(|| ConfigError::InvalidValue {
        field: field.to_string(),
        message: format!("expected #true or #false, got {}", value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = parse_mapper_config("").unwrap();
        assert_eq!(config, MapperConfig::default());
        assert_eq!(config.default_script_path, "Jenkinsfile");
        assert!(config.sync_remote);
    }

    #[test]
    fn test_parse_all_options() {
        let kdl = r#"
            strategy-type "CustomPipeline"
            default-script-path "ci/pipeline.groovy"
            sync-remote #false
            sandbox #false
            unknown-node "ignored"
        "#;

        let config = parse_mapper_config(kdl).unwrap();
        assert_eq!(config.strategy_type, "CustomPipeline");
        assert_eq!(config.default_script_path, "ci/pipeline.groovy");
        assert!(!config.sync_remote);
        assert!(!config.sandbox);
    }

    #[test]
    fn test_wrong_value_type() {
        let result = parse_mapper_config("sync-remote \"yes\"");
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidValue { field, .. } if field == "sync-remote"
        ));
    }

    #[test]
    fn test_empty_script_path_rejected() {
        let result = parse_mapper_config("default-script-path \"\"");
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidValue { .. }
        ));
    }

    #[test]
    fn test_missing_argument() {
        let result = parse_mapper_config("strategy-type");
        assert!(matches!(result.unwrap_err(), ConfigError::MissingField(_)));
    }

    #[test]
    fn test_invalid_kdl() {
        let result = parse_mapper_config("strategy-type \"unterminated");
        assert!(matches!(result.unwrap_err(), ConfigError::Parse(_)));
    }
}
