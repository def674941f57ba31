//! Value resolution through the external compiler
//!
//! Each value is resolved in the context of the whole source: the source is
//! followed by a synthetic variable bound to the value and a wrapper rule that
//! echoes it as a quoted `content` string. Maps cannot be interpolated, so they
//! are echoed through `inspect()` which renders them as `(key: value, ...)`.
//!
//! Failures never propagate. A declaration whose snippet does not compile, or
//! whose echo cannot be found, resolves to the empty string and is logged.

use std::path::PathBuf;

use super::compiled_css::CompiledCssReader;
use super::compiler::StyleCompiler;
use super::constants::{WRAPPED_VALUE_VARIABLE, WRAPPER_PROPERTY, WRAPPER_SELECTOR};
use super::declaration::Declaration;
use crate::error::CompileError;

pub struct ValueResolver<'a, C: StyleCompiler + ?Sized> {
    compiler: &'a C,
    source: &'a str,
    include_paths: &'a [PathBuf],
    reader: CompiledCssReader,
}

impl<'a, C: StyleCompiler + ?Sized> ValueResolver<'a, C> {
    pub fn new(
        compiler: &'a C,
        source: &'a str,
        include_paths: &'a [PathBuf],
        reader: CompiledCssReader,
    ) -> Self {
        Self {
            compiler,
            source,
            include_paths,
            reader,
        }
    }

    /// Compiled value of `declaration`, empty when the compiler fails
    pub fn resolve(&mut self, declaration: &Declaration) -> String {
        match self.try_resolve(&declaration.raw_value) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Failed to resolve ${}: {}", declaration.name, e);
                String::new()
            }
        }
    }

    /// Resolve `declaration` and each of its map entries in place
    pub fn resolve_all(&mut self, declaration: &mut Declaration) {
        declaration.compiled_value = self.resolve(declaration);

        if let Some(entries) = declaration.map_entries.as_mut() {
            for entry in entries.iter_mut() {
                entry.compiled_value = self.resolve(entry);
            }
        }
    }

    fn try_resolve(&mut self, raw_value: &str) -> Result<String, CompileError> {
        let snippet = format!("{}\n{}", self.source, wrap_value(raw_value));
        let css = self.compiler.render(&snippet, self.include_paths)?;
        self.reader
            .wrapped_value(&css)
            .ok_or(CompileError::MissingWrapper)
    }
}

/// Synthetic SCSS echoing `raw_value` as the content of the wrapper rule
pub fn wrap_value(raw_value: &str) -> String {
    let variable = WRAPPED_VALUE_VARIABLE;
    format!(
        "{variable}: {raw_value};\n\
         {WRAPPER_SELECTOR} {{ {WRAPPER_PROPERTY}: \"#{{if(type-of({variable}) == map, inspect({variable}), {variable})}}\"; }}\n"
    )
}
