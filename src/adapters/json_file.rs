// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON format adapter.

use crate::domain::{ConfigError, Document, FlatNamespace, Result, TypedValue, ValueNode};
use crate::ports::ConfigParser;
use serde_json::Value;

/// Parser for JSON files.
///
/// Numbers, booleans and `null` keep their JSON types. Strings are left raw
/// and go through inference when flattened.
///
/// # Examples
///
/// ```rust
/// use envdot::adapters::JsonParser;
/// use envdot::domain::{flatten_document, TypedValue};
/// use envdot::ports::ConfigParser;
///
/// let doc = JsonParser::new().parse(r#"{"database": {"port": 5432}}"#).unwrap();
/// let entries = flatten_document(&doc);
/// assert_eq!(entries[0].0.as_str(), "DATABASE_PORT");
/// assert_eq!(entries[0].1, TypedValue::Integer(5432));
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonParser;

impl JsonParser {
    /// Creates a new JSON parser.
    pub fn new() -> Self {
        JsonParser
    }

    fn to_node(value: Value) -> ValueNode {
        match value {
            Value::Null => ValueNode::typed(TypedValue::Null),
            Value::Bool(b) => ValueNode::typed(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => ValueNode::typed(i),
                None => ValueNode::typed(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => ValueNode::raw(s),
            Value::Array(items) => ValueNode::Sequence(items.into_iter().map(Self::to_node).collect()),
            Value::Object(map) => ValueNode::Mapping(
                map.into_iter()
                    .map(|(k, v)| (k, Self::to_node(v)))
                    .collect(),
            ),
        }
    }
}

impl ConfigParser for JsonParser {
    fn name(&self) -> &str {
        "json"
    }

    fn parse(&self, content: &str) -> Result<Document> {
        let value: Value = serde_json::from_str(content).map_err(|e| ConfigError::ParseError {
            message: format!("Failed to parse JSON: {}", e),
            source: Some(Box::new(e)),
        })?;
        Ok(Document::Tree(Self::to_node(value)))
    }

    fn render(&self, namespace: &FlatNamespace) -> Result<String> {
        let mut out =
            serde_json::to_string_pretty(namespace).map_err(|e| ConfigError::SerializeError {
                format: "json".to_string(),
                message: e.to_string(),
                source: Some(Box::new(e)),
            })?;
        out.push('\n');
        Ok(out)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }
}
