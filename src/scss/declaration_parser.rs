//! Variable declaration parser
//!
//! Extracts every top-level `$name: value;` assignment from comment-stripped
//! source text. Scanning is pattern based: a regex recognizes the declaration
//! marker and a [`DepthTracker`] decides whether the marker sits at top level
//! and where the statement ends. Assignments inside blocks (mixin bodies,
//! control flow, rule sets) and keyword arguments inside parentheses are
//! skipped.

use std::sync::LazyLock;

use regex::Regex;

use super::declaration::{Declaration, DeclarationFlag};
use super::scanner::{find_matching, find_top_level, split_top_level, unquote, DepthTracker};

/// `$name:` at the start of the haystack, name optionally quoted
static DECLARATION_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\$['"]?([\p{L}_-][\p{L}\p{N}_-]*)['"]?\s*:"#)
        .expect("Failed to compile declaration marker regex")
});

/// Trailing `!default` / `!global`
static TRAILING_FLAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*!\s*(default|global)\s*$").expect("Failed to compile flag regex")
});

/// Parser over a full, comment-stripped source document
pub struct DeclarationParser<'a> {
    source: &'a str,
}

impl<'a> DeclarationParser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    /// Parse all top-level declarations in source order
    pub fn parse(&self) -> Vec<Declaration> {
        let source = self.source;
        let mut declarations = Vec::new();
        let mut tracker = DepthTracker::new();
        let mut position = 0;

        while let Some(ch) = source[position..].chars().next() {
            if ch == '$' && tracker.is_top_level() {
                if let Some(captures) = DECLARATION_MARKER.captures(&source[position..]) {
                    let name = captures[1].to_string();
                    let value_start = position + captures[0].len();
                    let rest = &source[value_start..];

                    // An unterminated statement runs to the end of the text
                    let (value_end, next_position) = match find_top_level(rest, ';') {
                        Some(offset) => (value_start + offset, value_start + offset + 1),
                        None => (source.len(), source.len()),
                    };

                    declarations.push(parse_assignment(name, &source[value_start..value_end]));
                    position = next_position;
                    continue;
                }
            }

            tracker.feed(ch);
            position += ch.len_utf8();
        }

        log::debug!("Parsed {} declarations", declarations.len());
        declarations
    }
}

/// Build a declaration from its name and raw right-hand side
fn parse_assignment(name: String, raw: &str) -> Declaration {
    let (value, flags) = split_flags(raw);
    let declaration = Declaration::new(name, value).with_flags(flags);

    match parse_map_literal(value) {
        Some(entries) => declaration.with_map_entries(entries),
        None => declaration,
    }
}

/// Strip trailing flags, returning the trimmed value and the flags in source order
fn split_flags(raw: &str) -> (&str, Vec<DeclarationFlag>) {
    let mut value = raw.trim();
    let mut flags = Vec::new();

    while let Some(captures) = TRAILING_FLAG.captures(value) {
        let Some(flag) = DeclarationFlag::from_name(&captures[1]) else {
            break;
        };
        flags.insert(0, flag);
        let start = captures.get(0).map_or(value.len(), |m| m.start());
        value = value[..start].trim_end();
    }

    (value, flags)
}

/// Entries of `value` when it is a map literal, `None` otherwise.
///
/// A map literal is wrapped in one pair of parentheses and holds at least one
/// top-level `key: value` entry. Entries without a colon are dropped. Entry
/// values are kept raw, nested maps are not expanded.
pub fn parse_map_literal(value: &str) -> Option<Vec<Declaration>> {
    let value = value.trim();
    if !value.starts_with('(') {
        return None;
    }

    let close = find_matching(value, 0)?;
    if close != value.len() - 1 {
        return None;
    }

    let entries: Vec<Declaration> = split_top_level(&value[1..close], ',')
        .into_iter()
        .filter_map(|entry| {
            let entry = entry.trim();
            let colon = find_top_level(entry, ':')?;
            let key = unquote(entry[..colon].trim());
            if key.is_empty() {
                return None;
            }
            Some(Declaration::new(key, entry[colon + 1..].trim()))
        })
        .collect();

    if entries.is_empty() { None } else { Some(entries) }
}
