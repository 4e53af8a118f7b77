// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the configuration context.
//!
//! This module provides `DotEnv`, the caller-constructed object that loads
//! sources into a flat namespace and answers lookups through the
//! `ConfigurationService` trait.

pub mod dot_env;

// Re-export commonly used types
pub use dot_env::{DotEnv, DotEnvBuilder, LoadOptions};
