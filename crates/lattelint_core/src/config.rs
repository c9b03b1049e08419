//! Processor configuration.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use jsonschema::Validator;
use serde::{Deserialize, Serialize};

use crate::ProcessorError;

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// Configuration for the template processor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessorConfig {
    /// Drop diagnostics that resolve inside a directive.
    #[serde(default)]
    pub remove_latte_errors: bool,

    /// File name suffixes that are preprocessed. Other files pass through.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Exact directive content mapped to its substitution text.
    ///
    /// Consulted before the built-in rule; content not listed here falls
    /// through to it.
    #[serde(default)]
    pub replacements: HashMap<String, String>,
}

fn default_extensions() -> Vec<String> {
    vec![".latte".to_string()]
}

impl ProcessorConfig {
    /// Config file names searched for, in order.
    pub const CONFIG_FILES: &'static [&'static str] = &[".lattelint.jsonc", ".lattelint.json"];

    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            remove_latte_errors: false,
            extensions: default_extensions(),
            replacements: HashMap::new(),
        }
    }

    /// Finds a config file in `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        let dir = dir.as_ref();
        Self::CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Loads configuration from a file.
    ///
    /// Comments and trailing commas are accepted.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ProcessorError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ProcessorError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_jsonc(&content)
    }

    /// Parses configuration from JSONC text.
    pub fn from_jsonc(text: &str) -> Result<Self, ProcessorError> {
        let value = jsonc_parser::parse_to_serde_value(text, &Default::default())
            .map_err(|e| ProcessorError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

        Self::from_value(value)
    }

    /// Parses configuration from a JSON string with schema validation.
    pub fn from_json(json: &str) -> Result<Self, ProcessorError> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| ProcessorError::config(format!("Invalid JSON: {}", e)))?;

        Self::from_value(value)
    }

    fn from_value(value: serde_json::Value) -> Result<Self, ProcessorError> {
        let schema = CONFIG_SCHEMA.get_or_init(|| {
            let schema_json: serde_json::Value =
                serde_json::from_str(SCHEMA_JSON).expect("Invalid embedded config schema");
            Validator::new(&schema_json).expect("Invalid config schema compilation")
        });

        if let Err(e) = schema.validate(&value) {
            return Err(ProcessorError::config(format!(
                "Config validation failed: {} at {}",
                e,
                e.instance_path()
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| ProcessorError::config(format!("Invalid config: {}", e)))
    }

    /// Returns the first configured suffix `filename` ends with.
    pub fn matching_extension(&self, filename: &str) -> Option<&str> {
        self.extensions
            .iter()
            .map(String::as_str)
            .find(|ext| filename.ends_with(ext))
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self::new()
    }
}
