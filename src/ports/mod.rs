// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the trait definitions (ports) that define the interfaces
//! for the collaborators of the core: format readers and writers, sources of
//! flat namespaces, and environment stores. These traits are implemented by
//! adapters in the adapters layer.

pub mod environment;
pub mod parser;
pub mod source;

// Re-export commonly used types
pub use environment::EnvironmentStore;
pub use parser::ConfigParser;
pub use source::ConfigSource;
