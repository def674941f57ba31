//! Test utilities shared across the codebase

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::env;
use std::path::PathBuf;

use crate::error::CompileError;
use crate::scss::compiler::StyleCompiler;
use crate::scss::constants::{WRAPPED_VALUE_VARIABLE, WRAPPER_SELECTOR};

/// Helper function to get the project root directory for tests
/// This looks for the Cargo.toml file to determine the project root
pub fn get_project_root() -> PathBuf {
    // Try to get the manifest directory from environment (works during cargo test)
    if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        return PathBuf::from(manifest_dir);
    }

    // Fallback: start from current directory and walk up to find Cargo.toml
    let mut current_dir = env::current_dir().expect("Failed to get current directory");
    loop {
        if current_dir.join("Cargo.toml").exists() {
            return current_dir;
        }
        if let Some(parent) = current_dir.parent() {
            current_dir = parent.to_path_buf();
        } else {
            panic!("Could not find project root (Cargo.toml not found)");
        }
    }
}

/// Directory holding the SCSS fixtures
pub fn get_fixtures_dir() -> PathBuf {
    get_project_root().join("tests").join("fixtures")
}

/// Stand-in for the external compiler.
///
/// Finds the value the resolver wrapped, looks up a canned rendering for it
/// (echoing the raw value when there is none) and returns it in a wrapper rule
/// the way the real compiler would. Values registered as failures are rejected.
#[derive(Default)]
pub struct FakeCompiler {
    responses: HashMap<String, String>,
    failures: HashSet<String>,
    calls: RefCell<Vec<String>>,
}

impl FakeCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, raw_value: &str, rendered: &str) -> Self {
        self.responses.insert(raw_value.to_string(), rendered.to_string());
        self
    }

    pub fn with_failure(mut self, raw_value: &str) -> Self {
        self.failures.insert(raw_value.to_string());
        self
    }

    /// Raw values resolved so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn wrapped_value(snippet: &str) -> Option<&str> {
        let marker = format!("{}: ", WRAPPED_VALUE_VARIABLE);
        let start = snippet.rfind(&marker)? + marker.len();
        let end = snippet[start..].find(&format!(";\n{}", WRAPPER_SELECTOR))?;
        Some(&snippet[start..start + end])
    }
}

impl StyleCompiler for FakeCompiler {
    fn render(&self, source: &str, _include_paths: &[PathBuf]) -> Result<String, CompileError> {
        let raw_value = Self::wrapped_value(source).ok_or(CompileError::MissingWrapper)?;
        self.calls.borrow_mut().push(raw_value.to_string());

        if self.failures.contains(raw_value) {
            return Err(CompileError::Rejected {
                status: "exit status: 65".to_string(),
                stderr: format!("Error: Undefined variable in {}", raw_value),
            });
        }

        let rendered = self
            .responses
            .get(raw_value)
            .map(String::as_str)
            .unwrap_or(raw_value);
        let escaped = rendered
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\n', "\\a ");

        Ok(format!("{} {{\n  content: \"{}\";\n}}\n", WRAPPER_SELECTOR, escaped))
    }
}
