//! Structuring declarations into the output mapping
//!
//! Keys are variable names without the sigil, camelCased (`$primary-color`
//! becomes `primaryColor`). Names that collapse onto the same key overwrite
//! each other, the last declaration wins.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::{Map, Value};

use super::constants::{MIXINS_KEY, VARIABLE_SIGIL};
use super::declaration::{Declaration, Mixin};
use crate::error::ExportResult;

/// Output of a structured export, keyed by camelCased variable name
pub type StructuredOutput = Map<String, Value>;

static DASHED_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-([a-zA-Z0-9])").expect("Failed to compile camel case regex"));

/// Output key for a variable name, with or without its sigil
pub fn output_key(name: &str) -> String {
    let name = name.strip_prefix(VARIABLE_SIGIL).unwrap_or(name);
    DASHED_SEGMENT
        .replace_all(name, |captures: &Captures| captures[1].to_uppercase())
        .into_owned()
}

/// Build the output mapping from resolved and normalized declarations.
///
/// Detailed mode stores whole declaration records, compact mode only their
/// normalized values.
pub fn objectify(declarations: &[Declaration], detailed: bool) -> ExportResult<StructuredOutput> {
    let mut output = StructuredOutput::new();

    for declaration in declarations {
        let value = if detailed {
            serde_json::to_value(declaration)?
        } else {
            declaration.normalized_value.clone().unwrap_or(Value::Null)
        };
        output.insert(output_key(&declaration.name), value);
    }

    Ok(output)
}

/// Store `mixins` under the reserved key; nothing is added when there are none
pub fn attach_mixins(output: &mut StructuredOutput, mixins: &[Mixin]) -> ExportResult<()> {
    if mixins.is_empty() {
        return Ok(());
    }

    if output.contains_key(MIXINS_KEY) {
        log::warn!("Variable '{}' is replaced by the parsed mixins", MIXINS_KEY);
    }
    output.insert(MIXINS_KEY.to_string(), serde_json::to_value(mixins)?);
    Ok(())
}
