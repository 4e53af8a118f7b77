// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration parser trait definition.
//!
//! This module defines the `ConfigParser` trait, the interface for reading and
//! writing configuration files in a particular format (dotenv, INI, JSON, YAML,
//! TOML).

use crate::domain::{Document, FlatNamespace, Result};

/// A trait for parsing and rendering configuration files.
///
/// A parser turns file content into a `Document`, the nested tree the
/// flattener consumes. It does not flatten or infer anything itself: formats
/// without native types emit raw scalars and leave typing to the flattener.
/// Rendering goes the other way, from a flat namespace to file content.
///
/// # Examples
///
/// ```rust
/// use envdot::ports::ConfigParser;
/// use envdot::domain::{Document, FlatNamespace, Result, ValueNode};
///
/// struct LineParser;
///
/// impl ConfigParser for LineParser {
///     fn name(&self) -> &str {
///         "lines"
///     }
///
///     fn parse(&self, content: &str) -> Result<Document> {
///         let items = content.lines().map(ValueNode::raw);
///         Ok(Document::Tree(ValueNode::mapping(vec![("line", ValueNode::sequence(items))])))
///     }
///
///     fn render(&self, namespace: &FlatNamespace) -> Result<String> {
///         Ok(namespace.iter().map(|(_, v)| v.stringify() + "\n").collect())
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["lines"]
///     }
/// }
///
/// let doc = LineParser.parse("a\nb").unwrap();
/// assert!(matches!(doc, Document::Tree(_)));
/// ```
pub trait ConfigParser: Send + Sync {
    /// Returns the format name used in logs and error messages.
    fn name(&self) -> &str;

    /// Parses configuration content into a document.
    ///
    /// # Returns
    ///
    /// * `Ok(Document)` - The parsed tree or sections
    /// * `Err(ConfigError::ParseError)` - The content is not valid for this format
    fn parse(&self, content: &str) -> Result<Document>;

    /// Renders a flat namespace as file content in this format.
    ///
    /// Loading the rendered content again yields the same flat keys.
    fn render(&self, namespace: &FlatNamespace) -> Result<String>;

    /// Returns the file extensions this parser handles, without the dot.
    fn supported_extensions(&self) -> &[&str];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{flatten_document, ValueNode};

    struct TestParser;

    impl ConfigParser for TestParser {
        fn name(&self) -> &str {
            "test"
        }

        fn parse(&self, content: &str) -> Result<Document> {
            let entries = content
                .lines()
                .filter_map(|line| line.split_once('='))
                .map(|(k, v)| (k.to_string(), ValueNode::raw(v)))
                .collect();
            Ok(Document::Tree(ValueNode::Mapping(entries)))
        }

        fn render(&self, namespace: &FlatNamespace) -> Result<String> {
            Ok(namespace
                .iter()
                .map(|(k, v)| format!("{}={}\n", k, v.stringify()))
                .collect())
        }

        fn supported_extensions(&self) -> &[&str] {
            &["test", "tst"]
        }
    }

    #[test]
    fn test_parser_parse_feeds_flattener() {
        let doc = TestParser.parse("a.b=1\nc=hello").unwrap();
        let entries = flatten_document(&doc);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0.as_str(), "A_B");
    }

    #[test]
    fn test_parser_render_round_trip() {
        let doc = TestParser.parse("port=8080").unwrap();
        let ns = FlatNamespace::from_entries(flatten_document(&doc));
        assert_eq!(TestParser.render(&ns).unwrap(), "PORT=8080\n");
    }

    #[test]
    fn test_parser_supported_extensions() {
        assert_eq!(TestParser.supported_extensions(), &["test", "tst"]);
        assert_eq!(TestParser.name(), "test");
    }

    #[test]
    fn test_parser_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn ConfigParser>();
    }
}
