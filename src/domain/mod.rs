// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core logic and types.
//!
//! This module holds the type inferencer, the structure flattener and the
//! types they exchange. It performs no I/O and does not depend on any adapter.

pub mod errors;
pub mod flat_key;
pub mod flatten;
pub mod inference;
pub mod namespace;
pub mod service;
pub mod typed_value;
pub mod value_node;

// Re-export commonly used types
pub use errors::{ConfigError, Result};
pub use flat_key::FlatKey;
pub use flatten::{
    document_leaves, flatten, flatten_document, flatten_sections, flatten_with_prefix, FlatEntry,
};
pub use inference::{cast, infer};
pub use namespace::FlatNamespace;
pub use service::ConfigurationService;
pub use typed_value::{CastKind, CastValue, TypedValue};
pub use value_node::{Document, Scalar, ValueNode};
