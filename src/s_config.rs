use crate::s_error::{Result, SiftError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Keyword filters for one file pattern.
///
/// Each list is optional; an absent list means the rule says nothing about
/// that category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuppressionRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tests: Option<Vec<String>>,
}

/// File pattern (`"*"` or a substring of the absolute path) to rule.
///
/// Mirrors the document shape:
///
/// ```yaml
/// ignore:
///   "Pods/":
///     warnings: ["*"]
///   "*":
///     warnings: ["todo"]
///     errors: ["Code signing"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuppressionConfig {
    #[serde(default)]
    pub ignore: BTreeMap<String, SuppressionRule>,
}

impl SuppressionConfig {
    pub fn with_rule(mut self, pattern: &str, rule: SuppressionRule) -> Self {
        self.ignore.insert(pattern.to_string(), rule);
        self
    }
}

/// Serialization formats accepted for a suppression config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "yml" | "yaml" => Ok(ConfigFormat::Yaml),
            "json" => Ok(ConfigFormat::Json),
            "toml" => Ok(ConfigFormat::Toml),
            _ => Err(SiftError::UnsupportedConfigFormat(ext)),
        }
    }
}

/// Decodes a suppression config from text.
pub fn parse_config_str(content: &str, format: ConfigFormat) -> Result<SuppressionConfig> {
    let config = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(content)?,
        ConfigFormat::Json => serde_json::from_str(content)?,
        ConfigFormat::Toml => toml::from_str(content)?,
    };
    Ok(config)
}

/// Reads and decodes a suppression config, choosing the decoder by extension.
pub fn load_config(path: &Path) -> Result<SuppressionConfig> {
    let format = ConfigFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    let config = parse_config_str(&content, format)?;
    log::debug!(
        "Loaded {} suppression rule(s) from {}",
        config.ignore.len(),
        path.display()
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
ignore:
  "*":
    warnings: ["todo", "deprecated"]
  "Pods/":
    warnings: ["*"]
    errors: ["Code signing"]
"#;
        let config = parse_config_str(yaml, ConfigFormat::Yaml).unwrap();
        assert_eq!(config.ignore.len(), 2);
        let pods = &config.ignore["Pods/"];
        assert_eq!(pods.warnings, Some(vec!["*".to_string()]));
        assert_eq!(pods.errors, Some(vec!["Code signing".to_string()]));
        assert_eq!(pods.tests, None);
    }

    #[test]
    fn test_parse_json_and_toml_agree() {
        let json = r#"{"ignore": {"Foo.swift": {"warnings": ["deprecated"]}}}"#;
        let toml_text = "[ignore.\"Foo.swift\"]\nwarnings = [\"deprecated\"]\n";
        let from_json = parse_config_str(json, ConfigFormat::Json).unwrap();
        let from_toml = parse_config_str(toml_text, ConfigFormat::Toml).unwrap();
        assert_eq!(from_json, from_toml);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let yaml = "ignore:\n  \"*\":\n    warning: [\"typo\"]\n";
        assert!(parse_config_str(yaml, ConfigFormat::Yaml).is_err());
    }

    #[test]
    fn test_load_config_by_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("suppress.yml");
        fs::write(&path, "ignore:\n  \"*\":\n    tests: [\"flaky\"]\n").unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.ignore["*"].tests, Some(vec!["flaky".to_string()]));

        let bad = dir.path().join("config.ini");
        fs::write(&bad, "").unwrap();
        assert!(matches!(
            load_config(&bad),
            Err(SiftError::UnsupportedConfigFormat(_))
        ));
    }

    #[test]
    fn test_empty_document_gives_empty_config() {
        let config = parse_config_str("{}", ConfigFormat::Json).unwrap();
        assert_eq!(config, SuppressionConfig::default());
    }
}
