//! Mixin definition parser
//!
//! Finds `@mixin name(params) { body }` definitions. The parameter list and
//! the body are delimited with [`find_matching`] so nested calls and nested
//! blocks do not end them early. Bodies are kept as raw text.

use std::sync::LazyLock;

use regex::Regex;

use super::declaration::Mixin;
use super::scanner::{find_matching, split_top_level};

static MIXIN_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@mixin\s+([\p{L}_-][\p{L}\p{N}_-]*)\s*").expect("Failed to compile mixin header regex")
});

pub struct MixinParser<'a> {
    source: &'a str,
}

impl<'a> MixinParser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    /// Parse all mixin definitions in source order, nested definitions included
    pub fn parse(&self) -> Vec<Mixin> {
        let mixins: Vec<Mixin> = MIXIN_HEADER
            .captures_iter(self.source)
            .filter_map(|captures| {
                let header = captures.get(0)?;
                let name = captures[1].to_string();
                let mixin = self.parse_definition(name, header.end());
                if mixin.is_none() {
                    log::debug!("Skipping malformed mixin definition '{}'", &captures[1]);
                }
                mixin
            })
            .collect();

        log::debug!("Parsed {} mixins", mixins.len());
        mixins
    }

    /// Parse the optional parameter list and the body following a header ending at `start`
    fn parse_definition(&self, name: String, start: usize) -> Option<Mixin> {
        let source = self.source;
        let mut position = start;
        let mut parameters = Vec::new();

        if source[position..].starts_with('(') {
            let close = find_matching(source, position)?;
            parameters = split_top_level(&source[position + 1..close], ',')
                .into_iter()
                .map(str::trim)
                .filter(|parameter| !parameter.is_empty())
                .map(str::to_string)
                .collect();
            position = close + 1;
        }

        let skipped = source[position..].len() - source[position..].trim_start().len();
        position += skipped;
        if !source[position..].starts_with('{') {
            return None;
        }

        let close = find_matching(source, position)?;
        Some(Mixin {
            name,
            parameters,
            body: source[position + 1..close].to_string(),
        })
    }
}
