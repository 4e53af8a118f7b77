// SPDX-License-Identifier: MIT OR Apache-2.0

//! TOML format adapter.

use crate::domain::{ConfigError, Document, FlatNamespace, Result, TypedValue, ValueNode};
use crate::ports::ConfigParser;
use toml::{Table, Value};

/// Parser for TOML files.
///
/// Tables become mappings and arrays (including arrays of tables) become
/// sequences. Datetimes are kept as raw text.
///
/// # Examples
///
/// ```rust
/// use envdot::adapters::TomlParser;
/// use envdot::domain::{flatten_document, TypedValue};
/// use envdot::ports::ConfigParser;
///
/// let doc = TomlParser::new().parse("[server]\nport = 8080\n").unwrap();
/// let entries = flatten_document(&doc);
/// assert_eq!(entries[0].0.as_str(), "SERVER_PORT");
/// assert_eq!(entries[0].1, TypedValue::Integer(8080));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TomlParser;

impl TomlParser {
    /// Creates a new TOML parser.
    pub fn new() -> Self {
        TomlParser
    }

    fn to_node(value: Value) -> ValueNode {
        match value {
            Value::String(s) => ValueNode::raw(s),
            Value::Integer(i) => ValueNode::typed(i),
            Value::Float(f) => ValueNode::typed(f),
            Value::Boolean(b) => ValueNode::typed(b),
            Value::Datetime(dt) => ValueNode::raw(dt.to_string()),
            Value::Array(items) => ValueNode::Sequence(items.into_iter().map(Self::to_node).collect()),
            Value::Table(table) => Self::table_node(table),
        }
    }

    fn table_node(table: Table) -> ValueNode {
        ValueNode::Mapping(
            table
                .into_iter()
                .map(|(k, v)| (k, Self::to_node(v)))
                .collect(),
        )
    }

    // TOML has no null.
    fn to_toml(value: &TypedValue) -> Value {
        match value {
            TypedValue::Null => Value::String(String::new()),
            TypedValue::Boolean(b) => Value::Boolean(*b),
            TypedValue::Integer(i) => Value::Integer(*i),
            TypedValue::Float(f) => Value::Float(*f),
            TypedValue::String(s) => Value::String(s.clone()),
        }
    }
}

impl ConfigParser for TomlParser {
    fn name(&self) -> &str {
        "toml"
    }

    fn parse(&self, content: &str) -> Result<Document> {
        let table: Table = content.parse().map_err(|e: toml::de::Error| ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
            source: Some(Box::new(e)),
        })?;
        Ok(Document::Tree(Self::table_node(table)))
    }

    fn render(&self, namespace: &FlatNamespace) -> Result<String> {
        let table: Table = namespace
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), Self::to_toml(v)))
            .collect();
        toml::to_string(&table).map_err(|e| ConfigError::SerializeError {
            format: "toml".to_string(),
            message: e.to_string(),
            source: Some(Box::new(e)),
        })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["toml"]
    }
}
