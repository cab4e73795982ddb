//! Selector configuration.
//!
//! Configuration can be built in code or loaded from TOML or JSON:
//!
//! ```toml
//! tree_id_attribute = "data-tree-id"
//! left_value_attribute = "data-left-value"
//! level_indicator = "|--"
//! ```
//!
//! Missing keys fall back to the defaults shown above.

use std::path::Path;

use mptt_selectbox_core::logging::targets;
use mptt_selectbox_core::{Result, SelectError};
use serde::{Deserialize, Serialize};

/// Attribute names and label formatting shared by stores, choices and markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Option attribute carrying the tree id.
    pub tree_id_attribute: String,
    /// Option attribute carrying the left value.
    pub left_value_attribute: String,
    /// String repeated once per tree level in choice labels.
    pub level_indicator: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            tree_id_attribute: "data-tree-id".to_string(),
            left_value_attribute: "data-left-value".to_string(),
            level_indicator: "|--".to_string(),
        }
    }
}

impl SelectorConfig {
    /// Sets the level indicator.
    pub fn with_level_indicator(mut self, indicator: impl Into<String>) -> Self {
        self.level_indicator = indicator.into();
        self
    }

    /// Parses a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(SelectError::config)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s).map_err(SelectError::config)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that both attribute names can be written into option markup
    /// as-is.
    pub fn validate(&self) -> Result<()> {
        for (field, name) in [
            ("tree_id_attribute", &self.tree_id_attribute),
            ("left_value_attribute", &self.left_value_attribute),
        ] {
            if !is_attribute_name(name) {
                return Err(SelectError::config(format!(
                    "{field}: invalid attribute name {name:?}"
                )));
            }
        }
        Ok(())
    }

    /// Loads configuration from a file.
    ///
    /// Files ending in `.json` are read as JSON, everything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SelectError::io(path, e))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };

        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loaded selector configuration");
        Ok(config)
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(SelectError::config)
    }
}

/// HTML attribute name: non-empty, no whitespace, quotes, `=`, `<`, `>`, `/`
/// or control characters.
fn is_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|c| {
            !c.is_whitespace()
                && !c.is_control()
                && !matches!(c, '"' | '\'' | '=' | '<' | '>' | '/')
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SelectorConfig::default();
        assert_eq!(config.tree_id_attribute, "data-tree-id");
        assert_eq!(config.left_value_attribute, "data-left-value");
        assert_eq!(config.level_indicator, "|--");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = SelectorConfig::from_toml_str(r#"level_indicator = "--""#).unwrap();
        assert_eq!(config.level_indicator, "--");
        assert_eq!(config.tree_id_attribute, "data-tree-id");
    }

    #[test]
    fn test_json() {
        let config = SelectorConfig::from_json_str(r#"{"tree_id_attribute": "data-tree"}"#).unwrap();
        assert_eq!(config.tree_id_attribute, "data-tree");
        assert_eq!(config.left_value_attribute, "data-left-value");
    }

    #[test]
    fn test_invalid_toml() {
        let err = SelectorConfig::from_toml_str("level_indicator = ").unwrap_err();
        assert!(matches!(err, SelectError::Config(_)));
    }

    #[test]
    fn test_rejects_unsafe_attribute_names() {
        let err = SelectorConfig::from_toml_str(r#"tree_id_attribute = 'x" onclick="alert(1)'"#)
            .unwrap_err();
        assert!(matches!(err, SelectError::Config(_)));

        let err = SelectorConfig::from_json_str(r#"{"left_value_attribute": ""}"#).unwrap_err();
        assert!(matches!(err, SelectError::Config(_)));

        let err = SelectorConfig::from_json_str(r#"{"left_value_attribute": "data left"}"#)
            .unwrap_err();
        assert!(matches!(err, SelectError::Config(_)));

        assert!(SelectorConfig::default().validate().is_ok());
        let config = SelectorConfig::from_toml_str(r#"tree_id_attribute = "data-tree""#).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = SelectorConfig::default().with_level_indicator("»");
        let text = config.to_toml_string().unwrap();
        assert_eq!(SelectorConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_from_files() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("selectbox.toml");
        let mut file = std::fs::File::create(&toml_path).unwrap();
        writeln!(file, "left_value_attribute = \"data-lft\"").unwrap();
        let config = SelectorConfig::load(&toml_path).unwrap();
        assert_eq!(config.left_value_attribute, "data-lft");

        let json_path = dir.path().join("selectbox.json");
        std::fs::write(&json_path, r#"{"level_indicator": "."}"#).unwrap();
        let config = SelectorConfig::load(&json_path).unwrap();
        assert_eq!(config.level_indicator, ".");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SelectorConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, SelectError::Io { .. }));
    }
}
