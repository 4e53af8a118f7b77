// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory environment store.

use crate::ports::EnvironmentStore;
use indexmap::IndexMap;

/// An `EnvironmentStore` kept in an ordered map.
///
/// Useful when the namespace should be mirrored somewhere other than the
/// process environment, for example when building the environment of a child
/// process or in tests.
///
/// # Examples
///
/// ```rust
/// use envdot::adapters::MemoryEnv;
/// use envdot::ports::EnvironmentStore;
///
/// let mut env = MemoryEnv::new();
/// env.set("PORT", "8080");
/// assert_eq!(env.get("PORT").as_deref(), Some("8080"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryEnv {
    vars: IndexMap<String, String>,
}

impl MemoryEnv {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with initial variables.
    pub fn with_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns `true` if no variable is set.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl EnvironmentStore for MemoryEnv {
    fn name(&self) -> &str {
        "memory-env"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.vars.shift_remove(key);
    }

    fn vars(&self) -> Vec<(String, String)> {
        self.vars
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}
