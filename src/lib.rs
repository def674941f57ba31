//! SCSS Export Library
//! 
//! This library extracts SCSS variables, maps and mixins from stylesheets,
//! resolves their values with the Sass compiler and exports them as JSON.

pub mod error;
pub mod logging;
pub mod options;
pub mod scss;
pub mod source;
#[cfg(test)]
pub mod test_utils;

pub use error::{CompileError, ExportError, ExportResult};
pub use options::{ExportOptions, OutputFormat, OutputType};
pub use scss::compiler::{SassCli, StyleCompiler};
pub use scss::converter::Converter;
pub use scss::declaration::{Declaration, DeclarationFlag, Mixin};
pub use scss::structurer::StructuredOutput;
