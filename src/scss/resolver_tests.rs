use std::cell::RefCell;
use std::path::PathBuf;

use crate::error::CompileError;
use crate::scss::compiled_css::CompiledCssReader;
use crate::scss::declaration::Declaration;
use crate::scss::resolver::{wrap_value, ValueResolver};
use crate::test_utils::FakeCompiler;

#[test]
fn test_wrap_value() {
    assert_eq!(
        wrap_value("$base * 2"),
        "$sass-export-value: $base * 2;\n\
         #sass-export-id { content: \"#{if(type-of($sass-export-value) == map, inspect($sass-export-value), $sass-export-value)}\"; }\n"
    );
}

#[test]
fn test_snippet_follows_source() {
    let seen = RefCell::new(Vec::new());
    let compiler = |source: &str, include_paths: &[PathBuf]| -> Result<String, CompileError> {
        seen.borrow_mut().push((source.to_string(), include_paths.to_vec()));
        Ok("#sass-export-id {\n  content: \"4px\";\n}\n".to_string())
    };
    let include_paths = vec![PathBuf::from("node_modules")];
    let source = "$gap: 4px;";

    let mut resolver = ValueResolver::new(
        &compiler,
        source,
        &include_paths,
        CompiledCssReader::new().unwrap(),
    );
    let value = resolver.resolve(&Declaration::new("gap", "4px"));
    assert_eq!(value, "4px");

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].0.starts_with("$gap: 4px;\n$sass-export-value: 4px;"));
    assert_eq!(seen[0].1, include_paths);
}

#[test]
fn test_resolve_all_fills_entries() {
    let compiler = FakeCompiler::new().with_response("$x", "12px");
    let mut resolver = ValueResolver::new(&compiler, "", &[], CompiledCssReader::new().unwrap());

    let mut declaration = Declaration::new("m", "(a: $x, b: 1)").with_map_entries(vec![
        Declaration::new("a", "$x"),
        Declaration::new("b", "1"),
    ]);
    resolver.resolve_all(&mut declaration);

    assert_eq!(declaration.compiled_value, "(a: $x, b: 1)");
    let entries = declaration.map_entries.unwrap();
    assert_eq!(entries[0].compiled_value, "12px");
    assert_eq!(entries[1].compiled_value, "1");
}

#[test]
fn test_compiler_failure_yields_empty() {
    let compiler = FakeCompiler::new().with_failure("$undefined");
    let mut resolver = ValueResolver::new(&compiler, "", &[], CompiledCssReader::new().unwrap());

    assert_eq!(resolver.resolve(&Declaration::new("a", "$undefined")), "");
    assert_eq!(resolver.resolve(&Declaration::new("b", "2px")), "2px");
}
