//! Source loading
//!
//! Expands the input patterns, reads every matched file, joins the contents
//! with line breaks and strips comments. The result is the single document
//! both parsers and the resolver work on.

use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ExportError, ExportResult, IoContext};

const LINE_BREAK: &str = "\n";

/// Block comments and line comments. Line comments start at any `//`,
/// including one inside an unquoted `url(http://...)`.
static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/|//[^\n]*").expect("Failed to compile comment regex"));

/// Expand file paths and glob patterns, in pattern order
pub fn expand_inputs(patterns: &[String]) -> ExportResult<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for pattern in patterns {
        let entries = glob::glob(pattern).map_err(|e| ExportError::Pattern {
            pattern: pattern.clone(),
            source: e,
        })?;

        let before = paths.len();
        for entry in entries {
            match entry {
                Ok(path) => paths.push(path),
                Err(e) => {
                    let path = e.path().to_path_buf();
                    return Err(e.into_error()).with_io_context(path, "Failed to read input entry");
                }
            }
        }

        if paths.len() == before {
            if !is_glob_pattern(pattern) {
                return Err(ExportError::MissingInput {
                    path: PathBuf::from(pattern),
                });
            }
            log::warn!("Input pattern '{}' matched no files", pattern);
        }
    }

    if paths.is_empty() {
        return Err(ExportError::NoInputFiles {
            patterns: patterns.to_vec(),
        });
    }

    log::info!("Reading {} input files", paths.len());
    Ok(paths)
}

/// True when `pattern` contains glob metacharacters
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Read and join files with a line break between each
pub fn read_concatenated(paths: &[PathBuf]) -> ExportResult<String> {
    let contents = paths
        .iter()
        .map(|path| fs::read_to_string(path).with_io_context(path, "Failed to read input file"))
        .collect::<ExportResult<Vec<String>>>()?;

    Ok(contents.join(LINE_BREAK))
}

pub fn strip_comments(content: &str) -> String {
    COMMENT.replace_all(content, "").into_owned()
}

/// Load the comment-stripped document described by `patterns`
pub fn load_source(patterns: &[String]) -> ExportResult<String> {
    let paths = expand_inputs(patterns)?;
    let content = read_concatenated(&paths)?;
    Ok(strip_comments(&content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::get_fixtures_dir;

    #[test]
    fn test_strip_comments() {
        let content = "/* header\n * block */\n$a: 1; // trailing\n// whole line\n$b: 2;";
        assert_eq!(strip_comments(content), "\n$a: 1; \n\n$b: 2;");
    }

    #[test]
    fn test_strip_comments_in_url() {
        assert_eq!(strip_comments("$u: url(http://x.y);"), "$u: url(http:");
    }

    #[test]
    fn test_expand_and_concatenate() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.scss"), "$a: 1;").unwrap();
        fs::write(dir.path().join("b.scss"), "$b: 2;").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let pattern = dir.path().join("*.scss").to_string_lossy().into_owned();
        let paths = expand_inputs(&[pattern]).unwrap();
        assert_eq!(paths.len(), 2);

        let content = read_concatenated(&paths).unwrap();
        assert_eq!(content, "$a: 1;\n$b: 2;");
    }

    #[test]
    fn test_no_matches_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = dir.path().join("*.scss").to_string_lossy().into_owned();
        assert!(matches!(
            expand_inputs(&[pattern]),
            Err(ExportError::NoInputFiles { .. })
        ));
    }

    #[test]
    fn test_missing_literal_input_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("a.scss");
        let missing = dir.path().join("typo.scss");
        fs::write(&present, "$a: 1;").unwrap();

        let result = load_source(&[
            present.to_string_lossy().into_owned(),
            missing.to_string_lossy().into_owned(),
        ]);
        match result {
            Err(ExportError::MissingInput { path }) => assert_eq!(path, missing),
            other => panic!("Expected missing input error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_glob_among_inputs_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("a.scss");
        fs::write(&present, "$a: 1;").unwrap();

        let content = load_source(&[
            present.to_string_lossy().into_owned(),
            dir.path().join("partials/*.scss").to_string_lossy().into_owned(),
        ])
        .unwrap();
        assert_eq!(content, "$a: 1;");
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            expand_inputs(&["styles/[".to_string()]),
            Err(ExportError::Pattern { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = read_concatenated(&[PathBuf::from("/definitely/missing/file.scss")]);
        assert!(matches!(result, Err(ExportError::Io { .. })));
    }

    #[test]
    fn test_load_fixture() {
        let pattern = get_fixtures_dir().join("theme.scss").to_string_lossy().into_owned();
        let content = load_source(&[pattern]).unwrap();
        assert!(content.contains("$base-size: 10px;"));
        assert!(!content.contains("Theme fixture"));
    }
}
