//! Records produced by the parsers
//!
//! A [`Declaration`] is created by the declaration parser, receives its
//! compiled value from the resolver and its normalized value from the
//! normalizer, and is never touched again afterwards. A [`Mixin`] goes to
//! the output untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Flag written after a declaration value (`!default`, `!global`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationFlag {
    Default,
    Global,
}

impl DeclarationFlag {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            super::constants::FLAG_DEFAULT => Some(Self::Default),
            super::constants::FLAG_GLOBAL => Some(Self::Global),
            _ => None,
        }
    }
}

/// One variable binding found in source
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Declaration {
    /// Variable name without the `$` sigil
    pub name: String,
    /// Right-hand side as written, flags removed
    pub raw_value: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<DeclarationFlag>,
    /// Entries of a map literal value, `None` for any other value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_entries: Option<Vec<Declaration>>,
    /// Value echoed by the compiler, empty when resolution failed
    pub compiled_value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_value: Option<Value>,
}

impl Declaration {
    pub fn new(name: impl Into<String>, raw_value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_value: raw_value.into(),
            flags: Vec::new(),
            map_entries: None,
            compiled_value: String::new(),
            normalized_value: None,
        }
    }

    pub fn with_map_entries(mut self, entries: Vec<Declaration>) -> Self {
        self.map_entries = Some(entries);
        self
    }

    pub fn with_flags(mut self, flags: Vec<DeclarationFlag>) -> Self {
        self.flags = flags;
        self
    }
}

/// A `@mixin` definition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mixin {
    pub name: String,
    /// Parameters as written, including `$` and any default value
    pub parameters: Vec<String>,
    /// Raw text between the body braces
    pub body: String,
}
