use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Top-level project configuration loaded from `.flatschema.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FlatschemaConfig {
    /// Schema description document (YAML or JSON).
    pub input: String,
    /// Output directory for the generated `.schema.json`.
    pub output: String,
    /// Base name of the generated file; defaults to the input file stem.
    pub file_name: Option<String>,
    pub attribute_order: AttributeOrder,
}

impl Default for FlatschemaConfig {
    fn default() -> Self {
        Self {
            input: "schema.yaml".to_string(),
            output: "generated".to_string(),
            file_name: None,
            attribute_order: AttributeOrder::Declared,
        }
    }
}

/// Order in which definition attributes are recorded and emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeOrder {
    /// Keep the order of the schema description document.
    #[default]
    Declared,
    /// Sort attribute names lexicographically.
    Sorted,
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".flatschema.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<FlatschemaConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let config: FlatschemaConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# flatschema configuration
input: schema.yaml          # schema description document (.yaml, .yml or .json)
output: generated           # directory receiving <file_name>.schema.json
# file_name: monster        # defaults to the input file stem
attribute_order: declared   # declared | sorted
"#
}
