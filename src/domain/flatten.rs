// SPDX-License-Identifier: MIT OR Apache-2.0

//! The structure flattener.
//!
//! Walks a `ValueNode` tree depth-first in pre-order and emits one
//! `(FlatKey, TypedValue)` pair per leaf. Mapping children are keyed by their
//! normalized name, sequence children by their zero-based index. Raw scalars
//! are inferred, typed scalars pass through.
//!
//! The walk uses an explicit stack, so tree depth is bounded only by memory.
//! An empty mapping or sequence emits nothing.

use crate::domain::flat_key::FlatKey;
use crate::domain::typed_value::TypedValue;
use crate::domain::value_node::{Document, Scalar, ValueNode};

/// One flattened leaf.
pub type FlatEntry = (FlatKey, TypedValue);

/// Name of the section whose keys are not prefixed.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Flattens a tree from the root.
///
/// # Examples
///
/// ```
/// use envdot::domain::flatten::flatten;
/// use envdot::domain::value_node::ValueNode;
/// use envdot::domain::TypedValue;
///
/// let tree = ValueNode::mapping(vec![(
///     "database",
///     ValueNode::mapping(vec![
///         ("host", ValueNode::raw("localhost")),
///         ("port", ValueNode::typed(5432_i64)),
///     ]),
/// )]);
///
/// let entries = flatten(&tree);
/// assert_eq!(entries[0].0.as_str(), "DATABASE_HOST");
/// assert_eq!(entries[1].1, TypedValue::Integer(5432));
/// ```
pub fn flatten(root: &ValueNode) -> Vec<FlatEntry> {
    flatten_with_prefix(root, &FlatKey::root())
}

/// Flattens a tree under `prefix`.
///
/// A scalar at the root key has no name and is dropped.
pub fn flatten_with_prefix(root: &ValueNode, prefix: &FlatKey) -> Vec<FlatEntry> {
    resolve(leaves_with_prefix(root, prefix))
}

/// Walks a tree under `prefix` and returns each leaf key with its unresolved scalar.
pub fn leaves_with_prefix<'a>(root: &'a ValueNode, prefix: &FlatKey) -> Vec<(FlatKey, &'a Scalar)> {
    let mut out = Vec::new();
    let mut stack: Vec<(FlatKey, &ValueNode)> = vec![(prefix.clone(), root)];

    while let Some((key, node)) = stack.pop() {
        match node {
            ValueNode::Scalar(scalar) => {
                if key.is_empty() {
                    tracing::debug!("Skipping scalar with empty flat key");
                    continue;
                }
                out.push((key, scalar));
            }
            // Children are pushed in reverse so they pop in source order.
            ValueNode::Mapping(entries) => {
                for (name, child) in entries.iter().rev() {
                    stack.push((key.child(name), child));
                }
            }
            ValueNode::Sequence(items) => {
                for (i, child) in items.iter().enumerate().rev() {
                    stack.push((key.index(i), child));
                }
            }
        }
    }

    out
}

fn resolve(leaves: Vec<(FlatKey, &Scalar)>) -> Vec<FlatEntry> {
    leaves
        .into_iter()
        .map(|(key, scalar)| (key, scalar.resolve()))
        .collect()
}

/// Returns `true` for a section whose keys are not prefixed.
pub fn is_default_section(name: &str) -> bool {
    name.is_empty() || name == DEFAULT_SECTION
}

/// Flattens section-style input.
///
/// Keys of the `DEFAULT` section and of the unnamed section are emitted
/// without a prefix; keys of every other section are prefixed with the
/// normalized section name. Defaults are not copied into other sections.
///
/// # Examples
///
/// ```
/// use envdot::domain::flatten::flatten_sections;
/// use envdot::domain::value_node::ValueNode;
///
/// let sections = vec![
///     ("DEFAULT".to_string(), ValueNode::mapping(vec![("app_name", ValueNode::raw("My App"))])),
///     ("database".to_string(), ValueNode::mapping(vec![("host", ValueNode::raw("localhost"))])),
/// ];
/// let keys: Vec<String> = flatten_sections(&sections)
///     .into_iter()
///     .map(|(k, _)| k.into_string())
///     .collect();
/// assert_eq!(keys, vec!["APP_NAME", "DATABASE_HOST"]);
/// ```
pub fn flatten_sections(sections: &[(String, ValueNode)]) -> Vec<FlatEntry> {
    resolve(section_leaves(sections))
}

fn section_leaves(sections: &[(String, ValueNode)]) -> Vec<(FlatKey, &Scalar)> {
    let mut out = Vec::new();
    for (name, body) in sections {
        let prefix = if is_default_section(name) {
            FlatKey::root()
        } else {
            FlatKey::normalize(name)
        };
        out.extend(leaves_with_prefix(body, &prefix));
    }
    out
}

/// Flattens any parsed document.
pub fn flatten_document(document: &Document) -> Vec<FlatEntry> {
    resolve(document_leaves(document))
}

/// Flattens any parsed document without resolving its scalars.
///
/// Raw scalars keep their source text, which the namespace stores alongside
/// the inferred value for later casts.
pub fn document_leaves(document: &Document) -> Vec<(FlatKey, &Scalar)> {
    match document {
        Document::Tree(root) => leaves_with_prefix(root, &FlatKey::root()),
        Document::Sections(sections) => section_leaves(sections),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(entries: &[FlatEntry]) -> Vec<&str> {
        entries.iter().map(|(k, _)| k.as_str()).collect()
    }

    #[test]
    fn test_flatten_nested_mapping() {
        let tree = ValueNode::mapping(vec![(
            "database",
            ValueNode::mapping(vec![
                ("host", ValueNode::raw("localhost")),
                ("port", ValueNode::typed(5432_i64)),
            ]),
        )]);
        let entries = flatten(&tree);
        assert_eq!(
            entries,
            vec![
                (FlatKey::normalize("DATABASE_HOST"), TypedValue::String("localhost".to_string())),
                (FlatKey::normalize("DATABASE_PORT"), TypedValue::Integer(5432)),
            ]
        );
    }

    #[test]
    fn test_flatten_sequence() {
        let tree = ValueNode::mapping(vec![(
            "features",
            ValueNode::sequence(vec![ValueNode::raw("auth"), ValueNode::raw("cache")]),
        )]);
        let entries = flatten(&tree);
        assert_eq!(keys(&entries), vec!["FEATURES_0", "FEATURES_1"]);
        assert_eq!(entries[0].1, TypedValue::String("auth".to_string()));
        assert_eq!(entries[1].1, TypedValue::String("cache".to_string()));
    }

    #[test]
    fn test_flatten_preserves_pre_order() {
        let tree = ValueNode::mapping(vec![
            ("z", ValueNode::raw("1")),
            (
                "a",
                ValueNode::mapping(vec![
                    ("y", ValueNode::raw("2")),
                    ("b", ValueNode::sequence(vec![ValueNode::raw("3"), ValueNode::raw("4")])),
                ]),
            ),
            ("m", ValueNode::raw("5")),
        ]);
        assert_eq!(keys(&flatten(&tree)), vec!["Z", "A_Y", "A_B_0", "A_B_1", "M"]);
    }

    #[test]
    fn test_flatten_flat_mapping_only_normalizes() {
        let tree = ValueNode::mapping(vec![
            ("debug", ValueNode::raw("true")),
            ("app.name", ValueNode::raw("demo")),
        ]);
        let entries = flatten(&tree);
        assert_eq!(keys(&entries), vec!["DEBUG", "APP_NAME"]);
        assert_eq!(entries[0].1, TypedValue::Boolean(true));
    }

    #[test]
    fn test_typed_string_is_not_inferred() {
        let tree = ValueNode::mapping(vec![("version", ValueNode::typed("1"))]);
        assert_eq!(flatten(&tree)[0].1, TypedValue::String("1".to_string()));
    }

    #[test]
    fn test_root_sequence_uses_bare_indices() {
        let tree = ValueNode::sequence(vec![ValueNode::raw("a"), ValueNode::raw("b")]);
        assert_eq!(keys(&flatten(&tree)), vec!["0", "1"]);
    }

    #[test]
    fn test_nested_sequences() {
        let tree = ValueNode::mapping(vec![(
            "matrix",
            ValueNode::sequence(vec![ValueNode::sequence(vec![ValueNode::raw("x")])]),
        )]);
        assert_eq!(keys(&flatten(&tree)), vec!["MATRIX_0_0"]);
    }

    #[test]
    fn test_root_scalar_is_dropped() {
        assert!(flatten(&ValueNode::raw("lonely")).is_empty());
    }

    #[test]
    fn test_scalar_with_prefix() {
        let entries = flatten_with_prefix(&ValueNode::raw("on"), &FlatKey::normalize("flag"));
        assert_eq!(entries, vec![(FlatKey::normalize("FLAG"), TypedValue::Boolean(true))]);
    }

    #[test]
    fn test_empty_containers_emit_nothing() {
        let tree = ValueNode::mapping(vec![
            ("empty_map", ValueNode::Mapping(vec![])),
            ("empty_list", ValueNode::Sequence(vec![])),
        ]);
        assert!(flatten(&tree).is_empty());
    }

    #[test]
    fn test_colliding_paths_are_all_emitted() {
        let tree = ValueNode::mapping(vec![
            ("a.b", ValueNode::raw("first")),
            ("a", ValueNode::mapping(vec![("b", ValueNode::raw("second"))])),
        ]);
        let entries = flatten(&tree);
        assert_eq!(keys(&entries), vec!["A_B", "A_B"]);
        assert_eq!(entries[1].1, TypedValue::String("second".to_string()));
    }

    #[test]
    fn test_deep_tree_does_not_overflow() {
        let mut node = ValueNode::raw("leaf");
        for _ in 0..1_000 {
            node = ValueNode::mapping(vec![("n", node)]);
        }
        let entries = flatten(&node);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].0.as_str().starts_with("N_N_"));
    }

    #[test]
    fn test_sections_default_is_unprefixed() {
        let sections = vec![
            (
                "DEFAULT".to_string(),
                ValueNode::mapping(vec![("app_name", ValueNode::raw("My App"))]),
            ),
            (
                "database".to_string(),
                ValueNode::mapping(vec![("host", ValueNode::raw("localhost"))]),
            ),
        ];
        assert_eq!(
            flatten_sections(&sections),
            vec![
                (FlatKey::normalize("APP_NAME"), TypedValue::String("My App".to_string())),
                (FlatKey::normalize("DATABASE_HOST"), TypedValue::String("localhost".to_string())),
            ]
        );
    }

    #[test]
    fn test_unnamed_section_is_unprefixed() {
        let sections = vec![(String::new(), ValueNode::mapping(vec![("k", ValueNode::raw("v"))]))];
        assert_eq!(keys(&flatten_sections(&sections)), vec!["K"]);
    }

    #[test]
    fn test_lowercase_default_is_a_named_section() {
        let sections = vec![(
            "default".to_string(),
            ValueNode::mapping(vec![("k", ValueNode::raw("v"))]),
        )];
        assert_eq!(keys(&flatten_sections(&sections)), vec!["DEFAULT_K"]);
    }

    #[test]
    fn test_document_leaves_keep_raw_text() {
        let tree = Document::Tree(ValueNode::mapping(vec![
            ("workers", ValueNode::raw("1")),
            ("port", ValueNode::typed(8080_i64)),
        ]));
        let leaves = document_leaves(&tree);
        assert_eq!(leaves[0].1, &Scalar::Raw("1".to_string()));
        assert_eq!(leaves[1].1, &Scalar::Typed(TypedValue::Integer(8080)));
    }

    #[test]
    fn test_flatten_document() {
        let tree = Document::Tree(ValueNode::mapping(vec![("a", ValueNode::raw("1"))]));
        assert_eq!(keys(&flatten_document(&tree)), vec!["A"]);

        let sections = Document::Sections(vec![(
            "s".to_string(),
            ValueNode::mapping(vec![("a", ValueNode::raw("1"))]),
        )]);
        assert_eq!(keys(&flatten_document(&sections)), vec!["S_A"]);
    }
}
