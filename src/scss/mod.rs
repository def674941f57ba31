//! SCSS variable export
//!
//! Extracts variable declarations and mixins from SCSS source, resolves each
//! value through an external Sass compiler and restructures the results into
//! a JSON-compatible mapping:
//! - `declaration_parser` / `mixin_parser` scan the source text
//! - `resolver` asks the compiler for each value, `compiled_css` reads it back
//! - `normalizer` turns compiled text into objects, arrays or strings
//! - `structurer` builds the output mapping, `converter` drives the pipeline

pub mod compiled_css;
pub mod compiler;
pub mod constants;
pub mod converter;
pub mod declaration;
pub mod declaration_parser;
pub mod mixin_parser;
pub mod normalizer;
pub mod resolver;
pub mod scanner;
pub mod structurer;

#[cfg(test)]
mod resolver_tests;
