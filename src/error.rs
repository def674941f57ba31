//! Error types for SCSS export
//!
//! [`ExportError`] covers the fatal failures at the I/O boundary. [`CompileError`]
//! covers a single failed compiler invocation and never escapes the resolver,
//! which turns it into an empty value.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal error of an export run
#[derive(Error, Debug)]
pub enum ExportError {
    /// IO errors (reading sources, writing output)
    #[error("IO error for {path:?}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid glob pattern in the input list
    #[error("Invalid input pattern '{pattern}'")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// An input given as a plain path does not exist
    #[error("Input file not found: {path:?}")]
    MissingInput { path: PathBuf },

    /// None of the input patterns matched a file
    #[error("No input files matched {patterns:?}")]
    NoInputFiles { patterns: Vec<String> },

    /// JSON parsing/serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// YAML serialization errors
    #[error("YAML error: {message}")]
    Yaml {
        message: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// Tree-sitter language setup errors
    #[error("Failed to set up tree-sitter language: {message}")]
    TreeSitterLanguage { message: String },

    /// Unknown value for an enumerated option
    #[error("Invalid value '{value}' for option '{option}'")]
    InvalidOption { option: String, value: String },
}

/// Result type alias for export operations
pub type ExportResult<T> = Result<T, ExportError>;

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Json {
            source: err,
            message: "JSON operation failed".to_string(),
        }
    }
}

impl From<serde_yaml::Error> for ExportError {
    fn from(err: serde_yaml::Error) -> Self {
        ExportError::Yaml {
            source: err,
            message: "YAML operation failed".to_string(),
        }
    }
}

/// Failure of one external compiler invocation
#[derive(Error, Debug)]
pub enum CompileError {
    /// The compiler process could not be started or talked to
    #[error("Failed to run compiler '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The compiler rejected the snippet
    #[error("Compiler exited with {status}: {stderr}")]
    Rejected { status: String, stderr: String },

    /// The compiler wrote something that is not UTF-8
    #[error("Compiler output is not valid UTF-8")]
    InvalidOutput(#[from] std::string::FromUtf8Error),

    /// The rendered CSS does not contain the wrapper rule
    #[error("Wrapped value not found in compiled CSS")]
    MissingWrapper,
}

/// Helper trait for converting IO errors with path context
pub trait IoContext<T> {
    fn with_io_context(self, path: impl Into<PathBuf>, message: &str) -> ExportResult<T>;
}

impl<T> IoContext<T> for Result<T, std::io::Error> {
    fn with_io_context(self, path: impl Into<PathBuf>, message: &str) -> ExportResult<T> {
        self.map_err(|e| ExportError::Io {
            path: path.into(),
            message: message.to_string(),
            source: e,
        })
    }
}
