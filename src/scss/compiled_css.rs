//! Reading values back out of compiled CSS
//!
//! The resolver makes the compiler echo a value as the `content` of a
//! synthetic rule. The compiled CSS is plain CSS, so tree-sitter-css parses
//! it and we pick the wrapper rule's declaration out of the syntax tree.

use tree_sitter::{Node, Parser, Tree};

use super::constants::*;
use crate::error::{ExportError, ExportResult};

/// tree-sitter-css parser specialised for finding the wrapper rule
pub struct CompiledCssReader {
    parser: Parser,
}

impl CompiledCssReader {
    pub fn new() -> ExportResult<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_css::LANGUAGE.into())
            .map_err(|e| ExportError::TreeSitterLanguage {
                message: e.to_string(),
            })?;

        Ok(Self { parser })
    }

    pub fn parse(&mut self, css: &str) -> Option<Tree> {
        self.parser.parse(css, None)
    }

    /// Unquoted `content` value of the last wrapper rule in `css`
    pub fn wrapped_value(&mut self, css: &str) -> Option<String> {
        let css = css.trim_start_matches('\u{feff}');
        let tree = self.parse(css)?;
        let root = tree.root_node();

        let mut found = None;
        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            if child.kind() == NODE_RULE_SET && is_wrapper_rule(child, css) {
                if let Some(value) = wrapper_content(child, css) {
                    found = Some(value);
                }
            }
        }

        found
    }
}

fn node_text<'a>(node: Node, content: &'a str) -> &'a str {
    &content[node.start_byte()..node.end_byte()]
}

fn is_wrapper_rule(rule: Node, css: &str) -> bool {
    let mut cursor = rule.walk();
    let is_wrapper = rule
        .children(&mut cursor)
        .find(|child| child.kind() == NODE_SELECTORS)
        .is_some_and(|selectors| node_text(selectors, css).trim() == WRAPPER_SELECTOR);
    is_wrapper
}

/// Value of the `content` declaration inside the rule's block
fn wrapper_content(rule: Node, css: &str) -> Option<String> {
    let mut cursor = rule.walk();
    let block = rule
        .children(&mut cursor)
        .find(|child| child.kind() == NODE_BLOCK)?;

    let mut block_cursor = block.walk();
    for declaration in block.children(&mut block_cursor) {
        if declaration.kind() != NODE_DECLARATION {
            continue;
        }

        let Some(property) = declaration.child(0) else {
            continue;
        };
        if property.kind() != NODE_PROPERTY_NAME || node_text(property, css) != WRAPPER_PROPERTY {
            continue;
        }

        // Everything between the colon and the end of the declaration
        let colon = declaration.child(1)?;
        let value = css[colon.end_byte()..declaration.end_byte()]
            .trim()
            .trim_end_matches(';')
            .trim();
        return Some(unescape_css_string(value));
    }

    None
}

/// Strip the quotes of a CSS string literal and resolve its escapes.
///
/// Text that is not quoted is returned unchanged.
pub fn unescape_css_string(value: &str) -> String {
    let Some(quote) = value.chars().next().filter(|c| *c == '"' || *c == '\'') else {
        return value.to_string();
    };
    if value.len() < 2 || !value.ends_with(quote) {
        return value.to_string();
    }

    let inner = &value[1..value.len() - 1];
    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        let mut hex = String::new();
        while hex.len() < 6 {
            match chars.peek() {
                Some(c) if c.is_ascii_hexdigit() => {
                    hex.push(*c);
                    chars.next();
                }
                _ => break,
            }
        }

        if hex.is_empty() {
            // Escaped newline is a line continuation
            match chars.next() {
                Some('\n') | None => {}
                Some(c) => result.push(c),
            }
            continue;
        }

        if chars.peek() == Some(&' ') {
            chars.next();
        }
        let code = u32::from_str_radix(&hex, 16).unwrap_or(0xfffd);
        result.push(char::from_u32(code).unwrap_or('\u{fffd}'));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_creation() {
        assert!(CompiledCssReader::new().is_ok());
    }

    #[test]
    fn test_wrapped_value_expanded_style() {
        let mut reader = CompiledCssReader::new().unwrap();
        let css = "#sass-export-id {\n  content: \"10px\";\n}\n";
        assert_eq!(reader.wrapped_value(css), Some("10px".to_string()));
    }

    #[test]
    fn test_wrapped_value_ignores_other_rules() {
        let mut reader = CompiledCssReader::new().unwrap();
        let css = r#".icon::before {
  content: "x";
}

#sass-export-id {
  color: red;
  content: "(small: 8px, large: 16px)";
}
"#;
        assert_eq!(
            reader.wrapped_value(css),
            Some("(small: 8px, large: 16px)".to_string())
        );
    }

    #[test]
    fn test_wrapped_value_missing() {
        let mut reader = CompiledCssReader::new().unwrap();
        assert_eq!(reader.wrapped_value(".a { content: \"x\"; }"), None);
        assert_eq!(reader.wrapped_value(""), None);
    }

    #[test]
    fn test_unescape_css_string() {
        assert_eq!(unescape_css_string(r#""10px""#), "10px");
        assert_eq!(unescape_css_string(r#"'"Helvetica", Arial'"#), r#""Helvetica", Arial"#);
        assert_eq!(unescape_css_string(r#""a \"b\"""#), r#"a "b""#);
        assert_eq!(unescape_css_string(r#""\2014 dash""#), "\u{2014}dash");
        assert_eq!(unescape_css_string("plain"), "plain");
        assert_eq!(unescape_css_string("\""), "\"");
    }
}
