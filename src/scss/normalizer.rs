//! Compiled value normalization
//!
//! Turns the compiler's text rendering of a value into JSON:
//!
//! - **Object**: text shaped like `(key: value, ...)`. Entries are split on
//!   top-level commas and then on their first colon. Keys lose their
//!   quotes, values stay trimmed strings.
//! - **Array**: text containing a non-letter followed by `(`, and later a
//!   `, ` separator. Elements are split on commas and trimmed.
//! - **Primitive**: anything else, kept verbatim as a string.
//!
//! Classification is a single-level heuristic over the compiler's two
//! aggregate renderings. Nested aggregates are not normalized recursively, and
//! the array test also accepts plain strings such as `Arial (bold), serif`.
//! Both are known limitations kept for output compatibility.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::scanner::{find_matching, split_top_level};

static MAP_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(.+:.+\)$").expect("Failed to compile map shape regex"));

static LIST_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z]\(.+, .+").expect("Failed to compile list shape regex"));

/// Convert a compiled value to its JSON form
pub fn normalize_value(compiled: &str) -> Value {
    if MAP_SHAPE.is_match(compiled) {
        Value::Object(parse_map(compiled))
    } else if LIST_SHAPE.is_match(compiled) {
        Value::Array(parse_list(compiled))
    } else {
        Value::String(compiled.to_string())
    }
}

fn parse_map(compiled: &str) -> Map<String, Value> {
    let interior = &compiled[1..compiled.len() - 1];
    let mut object = Map::new();

    for entry in split_top_level(interior, ',') {
        let Some(colon) = entry.find(':') else {
            continue;
        };
        let key = entry[..colon].trim().replace(['"', '\''], "");
        if key.is_empty() {
            continue;
        }
        object.insert(
            key,
            Value::String(entry[colon + 1..].trim().to_string()),
        );
    }

    object
}

fn parse_list(compiled: &str) -> Vec<Value> {
    let mut text = compiled.trim();
    if text.starts_with('(') && find_matching(text, 0) == Some(text.len() - 1) {
        text = &text[1..text.len() - 1];
    }

    text.split(',')
        .map(|element| Value::String(element.trim().to_string()))
        .collect()
}
