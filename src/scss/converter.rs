//! Conversion pipeline
//!
//! source text -> declaration parser -> resolver -> normalizer -> structurer,
//! with the mixin parser feeding the reserved `mixins` key. Declarations are
//! processed one at a time in source order and a failed resolution only
//! empties that declaration's value.

use serde_json::Value;

use super::compiled_css::CompiledCssReader;
use super::compiler::StyleCompiler;
use super::declaration::Declaration;
use super::declaration_parser::DeclarationParser;
use super::mixin_parser::MixinParser;
use super::normalizer::normalize_value;
use super::resolver::ValueResolver;
use super::structurer::{attach_mixins, objectify, StructuredOutput};
use crate::error::ExportResult;
use crate::options::{ExportOptions, OutputType};
use crate::source::load_source;

pub struct Converter<C: StyleCompiler> {
    options: ExportOptions,
    compiler: C,
}

impl<C: StyleCompiler> Converter<C> {
    pub fn new(options: ExportOptions, compiler: C) -> Self {
        Self { options, compiler }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    pub fn compiler(&self) -> &C {
        &self.compiler
    }

    /// The comment-stripped, concatenated input files
    pub fn content(&self) -> ExportResult<String> {
        load_source(&self.options.input_files)
    }

    /// Resolved and normalized declarations of the input files, in source order
    pub fn declarations(&self) -> ExportResult<Vec<Declaration>> {
        self.declarations_from(&self.content()?)
    }

    /// Structured output of the input files
    pub fn structured(&self) -> ExportResult<StructuredOutput> {
        self.structured_from(&self.content()?)
    }

    /// Export document for the configured output type
    pub fn export(&self) -> ExportResult<Value> {
        let content = self.content()?;
        match self.options.output_type {
            OutputType::Structured => Ok(Value::Object(self.structured_from(&content)?)),
            OutputType::Array => Ok(serde_json::to_value(self.declarations_from(&content)?)?),
        }
    }

    pub fn declarations_from(&self, content: &str) -> ExportResult<Vec<Declaration>> {
        let mut resolver = ValueResolver::new(
            &self.compiler,
            content,
            &self.options.include_paths,
            CompiledCssReader::new()?,
        );

        let mut declarations = DeclarationParser::new(content).parse();
        for declaration in declarations.iter_mut() {
            resolver.resolve_all(declaration);
            normalize(declaration);
        }

        Ok(declarations)
    }

    pub fn structured_from(&self, content: &str) -> ExportResult<StructuredOutput> {
        let declarations = self.declarations_from(content)?;
        let mut output = objectify(&declarations, self.options.detailed)?;
        attach_mixins(&mut output, &MixinParser::new(content).parse())?;
        Ok(output)
    }
}

fn normalize(declaration: &mut Declaration) {
    declaration.normalized_value = Some(normalize_value(&declaration.compiled_value));

    if let Some(entries) = declaration.map_entries.as_mut() {
        for entry in entries.iter_mut() {
            entry.normalized_value = Some(normalize_value(&entry.compiled_value));
        }
    }
}
