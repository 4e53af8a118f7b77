// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parsed configuration trees.
//!
//! Format readers hand their output to the flattener as a `Document`: either a
//! single `ValueNode` tree or, for section-style formats, a list of named
//! sections.

use crate::domain::inference::infer;
use crate::domain::typed_value::TypedValue;

/// A leaf of a configuration tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    /// Text from a format without native types. Inferred when flattened.
    Raw(String),
    /// A value the format already typed. Passed through unchanged.
    Typed(TypedValue),
}

impl Scalar {
    /// Resolves the scalar to its final typed value.
    pub fn resolve(&self) -> TypedValue {
        match self {
            Scalar::Raw(raw) => infer(raw),
            Scalar::Typed(value) => value.clone(),
        }
    }
}

/// One node of a parsed configuration tree.
///
/// Mapping entries keep the order in which the reader produced them.
///
/// # Examples
///
/// ```
/// use envdot::domain::value_node::ValueNode;
///
/// let tree = ValueNode::mapping(vec![
///     ("host", ValueNode::raw("localhost")),
///     ("port", ValueNode::typed(5432_i64)),
/// ]);
/// assert!(tree.is_mapping());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum ValueNode {
    /// A leaf value.
    Scalar(Scalar),
    /// Ordered key/value pairs.
    Mapping(Vec<(String, ValueNode)>),
    /// Ordered elements.
    Sequence(Vec<ValueNode>),
}

impl ValueNode {
    /// Creates a raw string leaf.
    pub fn raw(value: impl Into<String>) -> Self {
        ValueNode::Scalar(Scalar::Raw(value.into()))
    }

    /// Creates a typed leaf.
    pub fn typed(value: impl Into<TypedValue>) -> Self {
        ValueNode::Scalar(Scalar::Typed(value.into()))
    }

    /// Creates a mapping from key/node pairs.
    pub fn mapping<K: Into<String>>(entries: impl IntoIterator<Item = (K, ValueNode)>) -> Self {
        ValueNode::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Creates a sequence.
    pub fn sequence(items: impl IntoIterator<Item = ValueNode>) -> Self {
        ValueNode::Sequence(items.into_iter().collect())
    }

    /// Returns `true` for a `Mapping`.
    pub fn is_mapping(&self) -> bool {
        matches!(self, ValueNode::Mapping(_))
    }

    /// Returns `true` for a `Scalar`.
    pub fn is_scalar(&self) -> bool {
        matches!(self, ValueNode::Scalar(_))
    }
}

/// The result of parsing one configuration file.
#[derive(Clone, Debug, PartialEq)]
pub enum Document {
    /// A single tree, flattened from the root.
    Tree(ValueNode),
    /// Named sections. `DEFAULT` and the unnamed section are not prefixed.
    Sections(Vec<(String, ValueNode)>),
}
