//! SCSS export constants
//!
//! Markers and names shared by the parsers, the resolver and the structurer.
//! Tree-sitter node kinds refer to the CSS grammar used to read compiled output.

/// Prefix of every variable name in source
pub const VARIABLE_SIGIL: char = '$';

/// Reserved output key holding the parsed mixins
pub const MIXINS_KEY: &str = "mixins";

/// Synthetic variable the resolver binds each value to
pub const WRAPPED_VALUE_VARIABLE: &str = "$sass-export-value";
/// Selector of the synthetic rule echoing a resolved value
pub const WRAPPER_SELECTOR: &str = "#sass-export-id";
/// Property of the synthetic rule carrying the value
pub const WRAPPER_PROPERTY: &str = "content";

/// Flag suffixes accepted after a declaration value
pub const FLAG_DEFAULT: &str = "default";
pub const FLAG_GLOBAL: &str = "global";

// Tree-sitter node kinds
pub const NODE_RULE_SET: &str = "rule_set";
pub const NODE_SELECTORS: &str = "selectors";
pub const NODE_BLOCK: &str = "block";
pub const NODE_DECLARATION: &str = "declaration";
pub const NODE_PROPERTY_NAME: &str = "property_name";
