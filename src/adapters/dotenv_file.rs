// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dotenv (`KEY=VALUE`) format adapter.

use crate::domain::{ConfigError, Document, FlatNamespace, Result, ValueNode};
use crate::ports::ConfigParser;
use indexmap::IndexMap;

/// Parser for `.env` files.
///
/// Parsing is delegated to `dotenvy`, so the accepted syntax is the usual
/// dotenv dialect: `#` comments, an optional `export` prefix, single quotes
/// kept literal, double quotes with `\n`, `\"`, `\\` and `\$` escapes,
/// quoted values spanning several lines, and `$VAR` / `${VAR}` substitution
/// from earlier lines or the process environment. Values are left raw for
/// inference, and a repeated key keeps its last value.
///
/// # Examples
///
/// ```rust
/// use envdot::adapters::DotEnvParser;
/// use envdot::domain::{flatten_document, TypedValue};
/// use envdot::ports::ConfigParser;
///
/// let doc = DotEnvParser::new().parse("PORT=8080\nDEBUG=yes\n").unwrap();
/// let entries = flatten_document(&doc);
/// assert_eq!(entries[0].1, TypedValue::Integer(8080));
/// assert_eq!(entries[1].1, TypedValue::Boolean(true));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DotEnvParser;

impl DotEnvParser {
    /// Creates a new dotenv parser.
    pub fn new() -> Self {
        DotEnvParser
    }

    fn parse_error(content: &str, err: dotenvy::Error) -> ConfigError {
        match err {
            dotenvy::Error::LineParse(fragment, index) => match line_of(content, &fragment) {
                Some(line) => ConfigError::parse_at_line(
                    "dotenv",
                    line,
                    format!("cannot parse '{}' at position {}", fragment.trim_end(), index),
                ),
                None => ConfigError::ParseError {
                    message: format!("dotenv: cannot parse '{}'", fragment.trim_end()),
                    source: None,
                },
            },
            other => ConfigError::ParseError {
                message: format!("dotenv: {}", other),
                source: Some(Box::new(other)),
            },
        }
    }

    fn needs_quotes(value: &str) -> bool {
        value
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '#' | '"' | '\'' | '\\' | '$'))
    }

    fn quote(value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 2);
        out.push('"');
        for ch in value.chars() {
            match ch {
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                '$' => out.push_str("\\$"),
                '\n' => out.push_str("\\n"),
                _ => out.push(ch),
            }
        }
        out.push('"');
        out
    }
}

// Number of the first line holding the start of a fragment reported by dotenvy.
fn line_of(content: &str, fragment: &str) -> Option<usize> {
    let needle = fragment.lines().next().map(str::trim).unwrap_or_default();
    if needle.is_empty() {
        return None;
    }
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

impl ConfigParser for DotEnvParser {
    fn name(&self) -> &str {
        "dotenv"
    }

    fn parse(&self, content: &str) -> Result<Document> {
        let mut values: IndexMap<String, ValueNode> = IndexMap::new();
        for item in dotenvy::from_read_iter(content.as_bytes()) {
            let (key, value) = item.map_err(|e| Self::parse_error(content, e))?;
            values.insert(key, ValueNode::raw(value));
        }
        Ok(Document::Tree(ValueNode::Mapping(values.into_iter().collect())))
    }

    fn render(&self, namespace: &FlatNamespace) -> Result<String> {
        let mut out = String::new();
        for (key, value) in namespace {
            let text = value.stringify();
            out.push_str(key.as_str());
            out.push('=');
            if Self::needs_quotes(&text) {
                out.push_str(&Self::quote(&text));
            } else {
                out.push_str(&text);
            }
            out.push('\n');
        }
        Ok(out)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["env"]
    }
}
