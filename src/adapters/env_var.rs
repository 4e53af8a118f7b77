// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process environment adapters.
//!
//! This module provides `EnvVarAdapter`, a configuration source that reads
//! environment variables, and `ProcessEnv`, the environment store that writes
//! them.

use crate::domain::{FlatKey, FlatNamespace, Result};
use crate::ports::{ConfigSource, EnvironmentStore};
use std::env;

/// Maximum length for environment variable keys (prevents DoS)
const MAX_ENV_KEY_LEN: usize = 512;

/// Maximum length for environment variable values (prevents DoS)
const MAX_ENV_VALUE_LEN: usize = 1048576; // 1MB

/// Configuration source adapter for environment variables.
///
/// Variable names are normalized into flat keys and values are inferred, so a
/// process started with `PORT=8080` yields `PORT → Integer(8080)`. With a
/// prefix, only matching variables are read and the prefix is stripped.
///
/// # Examples
///
/// ```rust
/// use envdot::adapters::EnvVarAdapter;
/// use envdot::domain::TypedValue;
/// use envdot::ports::ConfigSource;
///
/// let adapter = EnvVarAdapter::with_values(vec![
///     ("MYAPP_PORT", "8080"),
///     ("OTHER", "x"),
/// ])
/// .prefix("MYAPP_");
///
/// let ns = adapter.load().unwrap();
/// assert_eq!(ns.get("PORT"), Some(&TypedValue::Integer(8080)));
/// assert!(!ns.contains_key("OTHER"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvVarAdapter {
    /// Optional prefix to filter environment variables
    prefix: Option<String>,
    /// Fixed values read instead of the process environment
    values: Option<Vec<(String, String)>>,
}

impl EnvVarAdapter {
    /// Creates an adapter over the whole process environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an adapter that only reads variables starting with `prefix`.
    ///
    /// The prefix is stripped from the key when storing values.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::new().prefix(prefix)
    }

    /// Creates an adapter over a fixed set of variables instead of the
    /// process environment.
    pub fn with_values<K, V>(values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            prefix: None,
            values: Some(
                values
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Sets the prefix filter.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    fn raw_vars(&self) -> Vec<(String, String)> {
        match &self.values {
            Some(values) => values.clone(),
            None => process_vars(),
        }
    }
}

impl ConfigSource for EnvVarAdapter {
    fn name(&self) -> &str {
        "env"
    }

    fn load(&self) -> Result<FlatNamespace> {
        let mut namespace = FlatNamespace::new();

        for (key, value) in self.raw_vars() {
            // Validate input sizes to prevent DoS
            if key.len() > MAX_ENV_KEY_LEN || value.len() > MAX_ENV_VALUE_LEN {
                tracing::debug!(
                    "Skipping oversized environment variable: key_len={}, value_len={} (max key={}, max value={})",
                    key.len(),
                    value.len(),
                    MAX_ENV_KEY_LEN,
                    MAX_ENV_VALUE_LEN
                );
                continue;
            }

            let name = match &self.prefix {
                Some(prefix) => match key.strip_prefix(prefix.as_str()) {
                    Some(stripped) => stripped,
                    None => continue,
                },
                None => key.as_str(),
            };

            let flat = FlatKey::normalize(name);
            if flat.is_empty() {
                continue;
            }
            namespace.insert_raw(flat, &value);
        }

        tracing::debug!(
            "Loaded {} environment variables (prefix={:?})",
            namespace.len(),
            self.prefix
        );

        Ok(namespace)
    }
}

/// Returns the process environment, skipping variables that are not valid
/// Unicode.
fn process_vars() -> Vec<(String, String)> {
    env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}

/// The process environment as an `EnvironmentStore`.
///
/// Writes are visible to the whole process, including child processes
/// spawned afterwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl ProcessEnv {
    /// Creates a handle to the process environment.
    pub fn new() -> Self {
        ProcessEnv
    }
}

impl EnvironmentStore for ProcessEnv {
    fn name(&self) -> &str {
        "process-env"
    }

    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }

    fn set(&mut self, key: &str, value: &str) {
        if key.is_empty() || key.contains('=') || key.contains('\0') || value.contains('\0') {
            tracing::warn!("Refusing to set invalid environment variable {:?}", key);
            return;
        }
        env::set_var(key, value);
    }

    fn remove(&mut self, key: &str) {
        if key.is_empty() || key.contains('=') || key.contains('\0') {
            return;
        }
        env::remove_var(key);
    }

    fn vars(&self) -> Vec<(String, String)> {
        process_vars()
    }
}
