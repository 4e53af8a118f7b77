// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML format adapter.
//!
//! This module provides a parser that converts YAML documents into value trees
//! and renders flat namespaces back to YAML.

use crate::domain::{ConfigError, Document, FlatNamespace, Result, TypedValue, ValueNode};
use crate::ports::ConfigParser;
use serde_yaml::Value;

/// YAML parser implementation.
///
/// Numbers, booleans and nulls keep their YAML types; strings are left raw.
/// Scalar mapping keys that are not strings (`1: x`, `true: y`) are used in
/// their text form. Sequence or mapping keys are skipped. Tagged values are
/// read through to the value they wrap.
///
/// # Examples
///
/// ```rust
/// use envdot::adapters::YamlParser;
/// use envdot::domain::{flatten_document, TypedValue};
/// use envdot::ports::ConfigParser;
///
/// let parser = YamlParser::new();
/// let yaml_content = "database:\n  host: localhost\n  port: 5432";
/// let entries = flatten_document(&parser.parse(yaml_content).unwrap());
/// assert_eq!(entries[0].0.as_str(), "DATABASE_HOST");
/// assert_eq!(entries[1].1, TypedValue::Integer(5432));
/// ```
#[derive(Debug, Clone)]
pub struct YamlParser;

impl YamlParser {
    /// Creates a new YAML parser.
    pub fn new() -> Self {
        YamlParser
    }

    /// Converts a YAML value into a value tree.
    fn to_node(value: Value) -> ValueNode {
        match value {
            Value::Null => ValueNode::typed(TypedValue::Null),
            Value::Bool(b) => ValueNode::typed(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => ValueNode::typed(i),
                None => ValueNode::typed(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => ValueNode::raw(s),
            Value::Sequence(seq) => ValueNode::Sequence(seq.into_iter().map(Self::to_node).collect()),
            Value::Mapping(map) => {
                let mut entries = Vec::with_capacity(map.len());
                for (key, val) in map {
                    match Self::key_text(&key) {
                        Some(name) => entries.push((name, Self::to_node(val))),
                        None => tracing::debug!("Skipping YAML entry with a non-scalar key"),
                    }
                }
                ValueNode::Mapping(entries)
            }
            Value::Tagged(tagged) => Self::to_node(tagged.value),
        }
    }

    fn key_text(key: &Value) -> Option<String> {
        match key {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Tagged(tagged) => Self::key_text(&tagged.value),
            _ => None,
        }
    }
}

impl Default for YamlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigParser for YamlParser {
    fn name(&self) -> &str {
        "yaml"
    }

    fn parse(&self, content: &str) -> Result<Document> {
        let value: Value = serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: format!("Failed to parse YAML: {}", e),
            source: Some(Box::new(e)),
        })?;
        Ok(Document::Tree(Self::to_node(value)))
    }

    fn render(&self, namespace: &FlatNamespace) -> Result<String> {
        serde_yaml::to_string(namespace).map_err(|e| ConfigError::SerializeError {
            format: "yaml".to_string(),
            message: e.to_string(),
            source: Some(Box::new(e)),
        })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{flatten_document, FlatKey};

    fn parse(content: &str) -> Vec<(String, TypedValue)> {
        let doc = YamlParser::new().parse(content).unwrap();
        flatten_document(&doc)
            .into_iter()
            .map(|(k, v)| (k.into_string(), v))
            .collect()
    }

    #[test]
    fn test_yaml_parser_simple() {
        assert_eq!(parse("key: value"), vec![("KEY".to_string(), TypedValue::from("value"))]);
    }

    #[test]
    fn test_yaml_parser_nested() {
        let yaml = r#"
database:
  host: localhost
  port: 5432
"#;
        assert_eq!(
            parse(yaml),
            vec![
                ("DATABASE_HOST".to_string(), TypedValue::from("localhost")),
                ("DATABASE_PORT".to_string(), TypedValue::Integer(5432)),
            ]
        );
    }

    #[test]
    fn test_yaml_parser_deeply_nested() {
        let yaml = r#"
app:
  database:
    connection:
      host: localhost
      port: 5432
"#;
        let result = parse(yaml);
        assert_eq!(result[0].0, "APP_DATABASE_CONNECTION_HOST");
        assert_eq!(result[1].0, "APP_DATABASE_CONNECTION_PORT");
    }

    #[test]
    fn test_yaml_parser_array() {
        let yaml = r#"
servers:
  - server1
  - server2
  - server3
"#;
        let keys: Vec<String> = parse(yaml).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["SERVERS_0", "SERVERS_1", "SERVERS_2"]);
    }

    #[test]
    fn test_yaml_parser_mixed_types() {
        let yaml = r#"
string_value: hello
number_value: 42
bool_value: true
null_value: null
float_value: 30.5
quoted_number: "8080"
"#;
        let result = parse(yaml);
        assert_eq!(result[0].1, TypedValue::from("hello"));
        assert_eq!(result[1].1, TypedValue::Integer(42));
        assert_eq!(result[2].1, TypedValue::Boolean(true));
        assert_eq!(result[3].1, TypedValue::Null);
        assert_eq!(result[4].1, TypedValue::Float(30.5));
        assert_eq!(result[5].1, TypedValue::Integer(8080));
    }

    #[test]
    fn test_yaml_parser_non_string_keys() {
        let yaml = "codes:\n  404: missing\n  true: yes\n";
        let result = parse(yaml);
        assert_eq!(result[0], ("CODES_404".to_string(), TypedValue::from("missing")));
        assert_eq!(result[1], ("CODES_TRUE".to_string(), TypedValue::Boolean(true)));
    }

    #[test]
    fn test_yaml_parser_tagged_value() {
        let result = parse("port: !custom 8080\n");
        assert_eq!(result[0].1, TypedValue::Integer(8080));
    }

    #[test]
    fn test_yaml_parser_invalid() {
        let parser = YamlParser::new();
        let yaml = "invalid: yaml: content:";
        assert!(parser.parse(yaml).is_err());
    }

    #[test]
    fn test_yaml_parser_supported_extensions() {
        let parser = YamlParser::new();
        let extensions = parser.supported_extensions();

        assert_eq!(extensions.len(), 2);
        assert!(extensions.contains(&"yaml"));
        assert!(extensions.contains(&"yml"));
    }

    #[test]
    fn test_yaml_render_round_trip() {
        let ns = FlatNamespace::from_entries(vec![
            (FlatKey::normalize("DATABASE_HOST"), TypedValue::from("localhost")),
            (FlatKey::normalize("DATABASE_PORT"), TypedValue::Integer(5432)),
            (FlatKey::normalize("DEBUG"), TypedValue::Boolean(true)),
            (FlatKey::normalize("NOTHING"), TypedValue::Null),
        ]);
        let parser = YamlParser::new();
        let rendered = parser.render(&ns).unwrap();
        assert!(rendered.contains("DATABASE_HOST: localhost"));
        let reparsed = parse(&rendered);
        let original: Vec<(String, TypedValue)> = ns
            .into_iter()
            .map(|(k, v)| (k.into_string(), v))
            .collect();
        assert_eq!(reparsed, original);
    }

    #[test]
    fn test_yaml_parser_default() {
        let parser = YamlParser::default();
        assert_eq!(parser.name(), "yaml");
    }
}
