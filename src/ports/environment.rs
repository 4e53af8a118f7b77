// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment store trait definition.
//!
//! This module defines the `EnvironmentStore` trait, the port the service
//! mirrors its namespace into. The process environment is one implementation;
//! an in-memory map is another.

/// A string-keyed variable store that mirrors a flat namespace.
///
/// Writes are last-writer-wins. The store holds stringified values only.
///
/// # Examples
///
/// ```rust
/// use envdot::ports::EnvironmentStore;
/// use std::collections::BTreeMap;
///
/// #[derive(Default)]
/// struct MapStore(BTreeMap<String, String>);
///
/// impl EnvironmentStore for MapStore {
///     fn name(&self) -> &str { "map" }
///     fn get(&self, key: &str) -> Option<String> { self.0.get(key).cloned() }
///     fn set(&mut self, key: &str, value: &str) { self.0.insert(key.into(), value.into()); }
///     fn remove(&mut self, key: &str) { self.0.remove(key); }
///     fn vars(&self) -> Vec<(String, String)> {
///         self.0.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
///     }
/// }
///
/// let mut store = MapStore::default();
/// store.set("PORT", "8080");
/// assert_eq!(store.get("PORT").as_deref(), Some("8080"));
/// ```
pub trait EnvironmentStore: Send + Sync {
    /// Returns the store name used in logs.
    fn name(&self) -> &str;

    /// Returns the variable's value, if set.
    fn get(&self, key: &str) -> Option<String>;

    /// Sets a variable, replacing any previous value.
    fn set(&mut self, key: &str, value: &str);

    /// Removes a variable. Removing an unknown variable is a no-op.
    fn remove(&mut self, key: &str);

    /// Returns every variable in the store.
    fn vars(&self) -> Vec<(String, String)>;

    /// Returns `true` if the variable is set.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}
