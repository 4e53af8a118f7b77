// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration source trait definition.
//!
//! This module defines the `ConfigSource` trait, the port for anything that can
//! produce a flat namespace: files of any supported format, the process
//! environment, or a fixed set of values.

use crate::domain::{FlatNamespace, Result};

/// A trait for configuration sources.
///
/// Every call to `load` builds a fresh namespace from the underlying data.
/// Sources are applied by the service in the order they were registered, so a
/// later source overwrites the keys of an earlier one.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow for use in multi-threaded contexts.
///
/// # Examples
///
/// ```rust
/// use envdot::ports::ConfigSource;
/// use envdot::domain::{FlatKey, FlatNamespace, Result, TypedValue};
///
/// struct Defaults;
///
/// impl ConfigSource for Defaults {
///     fn name(&self) -> &str {
///         "defaults"
///     }
///
///     fn load(&self) -> Result<FlatNamespace> {
///         let mut ns = FlatNamespace::new();
///         ns.insert(FlatKey::normalize("port"), TypedValue::Integer(8080));
///         Ok(ns)
///     }
/// }
///
/// assert_eq!(Defaults.load().unwrap().len(), 1);
/// ```
pub trait ConfigSource: Send + Sync {
    /// Returns the name of this configuration source.
    ///
    /// This name is used for logging, error messages, and debugging. It should be
    /// a short, descriptive identifier like "env" or the file path.
    fn name(&self) -> &str;

    /// Reads the source and returns its flattened, typed contents.
    ///
    /// # Returns
    ///
    /// * `Ok(FlatNamespace)` - The source's entries
    /// * `Err(ConfigError)` - The source could not be read or parsed
    fn load(&self) -> Result<FlatNamespace>;
}
