//! Export options
//!
//! Options come from the command line or from a JSON options file. Both map
//! onto [`ExportOptions`]; missing fields take their defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ExportError, ExportResult, IoContext};

/// Shape of the exported document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    /// Mapping keyed by camelCased variable name
    #[default]
    Structured,
    /// Ordered list of declaration records
    Array,
}

impl FromStr for OutputType {
    type Err = ExportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "structured" => Ok(Self::Structured),
            "array" => Ok(Self::Array),
            _ => Err(ExportError::InvalidOption {
                option: "type".to_string(),
                value: value.to_string(),
            }),
        }
    }
}

/// Serialization format of the exported document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn render(&self, value: &Value) -> ExportResult<String> {
        match self {
            Self::Json => Ok(serde_json::to_string_pretty(value)?),
            Self::Yaml => Ok(serde_yaml::to_string(value)?),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ExportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(ExportError::InvalidOption {
                option: "format".to_string(),
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportOptions {
    /// File paths or glob patterns, read in order
    pub input_files: Vec<String>,
    /// Search paths handed to the compiler
    pub include_paths: Vec<PathBuf>,
    /// Full declaration records instead of bare values
    pub detailed: bool,
    #[serde(rename = "type")]
    pub output_type: OutputType,
    pub format: OutputFormat,
}

impl ExportOptions {
    pub fn from_json_file(path: &Path) -> ExportResult<Self> {
        let content = fs::read_to_string(path).with_io_context(path, "Failed to read options file")?;
        serde_json::from_str(&content).map_err(|e| ExportError::Json {
            message: format!("Invalid options file {}", path.display()),
            source: e,
        })
    }
}
