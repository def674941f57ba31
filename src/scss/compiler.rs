//! External style compiler boundary
//!
//! The compiler is a black box: it takes a source snippet and include paths
//! and returns rendered CSS. [`SassCli`] drives the Sass command-line
//! compiler, tests substitute their own [`StyleCompiler`].

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::CompileError;

/// Environment variable overriding the compiler program
pub const SASS_PROGRAM_ENV: &str = "SCSS_EXPORT_SASS";
const DEFAULT_SASS_PROGRAM: &str = "sass";

pub trait StyleCompiler {
    /// Render `source` to CSS, resolving imports against `include_paths`
    fn render(&self, source: &str, include_paths: &[PathBuf]) -> Result<String, CompileError>;
}

impl<F> StyleCompiler for F
where
    F: Fn(&str, &[PathBuf]) -> Result<String, CompileError>,
{
    fn render(&self, source: &str, include_paths: &[PathBuf]) -> Result<String, CompileError> {
        self(source, include_paths)
    }
}

/// Runs the Sass command-line compiler, feeding the snippet on stdin
#[derive(Debug, Clone)]
pub struct SassCli {
    program: PathBuf,
}

impl SassCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Use the program named by `SCSS_EXPORT_SASS`, or `sass` from `PATH`
    pub fn from_env() -> Self {
        let program = std::env::var_os(SASS_PROGRAM_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SASS_PROGRAM));
        Self::new(program)
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command(&self, include_paths: &[PathBuf]) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg("--stdin")
            .arg("--no-source-map")
            .arg("--style=expanded");
        for path in include_paths {
            command.arg(format!("--load-path={}", path.display()));
        }
        command
    }

    fn spawn_error(&self, source: std::io::Error) -> CompileError {
        CompileError::Spawn {
            program: self.program.display().to_string(),
            source,
        }
    }
}

impl Default for SassCli {
    fn default() -> Self {
        Self::from_env()
    }
}

impl StyleCompiler for SassCli {
    fn render(&self, source: &str, include_paths: &[PathBuf]) -> Result<String, CompileError> {
        let mut child = self
            .command(include_paths)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        // Dropping stdin closes the pipe so the compiler sees end of input
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(source.as_bytes()) {
                drop(stdin);
                // Reap the child so a compiler that quit early is not left behind
                let _ = child.kill();
                let _ = child.wait();
                return Err(self.spawn_error(e));
            }
        }

        let output = child.wait_with_output().map_err(|e| self.spawn_error(e))?;
        if !output.status.success() {
            return Err(CompileError::Rejected {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8(output.stdout)?)
    }
}
