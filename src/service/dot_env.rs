// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `DotEnv` context object.
//!
//! This module provides `DotEnv`, which owns a flat namespace, the sources it
//! was loaded from and an optional environment mirror, together with its
//! builder.

use crate::adapters::{write_config, FileSource, Format};
use crate::domain::{
    infer, ConfigError, ConfigurationService, FlatKey, FlatNamespace, Result, TypedValue,
};
use crate::ports::{ConfigSource, EnvironmentStore};
use globset::{GlobBuilder, GlobMatcher};
use std::path::{Path, PathBuf};

/// How a load merges into the namespace.
///
/// # Examples
///
/// ```rust
/// use envdot::service::LoadOptions;
///
/// let options = LoadOptions::default().override_existing(false);
/// assert!(!options.override_existing);
/// assert!(options.apply_to_env);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Replace values already in the namespace (and in the environment mirror).
    pub override_existing: bool,
    /// Mirror loaded values into the environment store, if there is one.
    pub apply_to_env: bool,
}

impl LoadOptions {
    /// Sets `override_existing`.
    pub fn override_existing(mut self, enabled: bool) -> Self {
        self.override_existing = enabled;
        self
    }

    /// Sets `apply_to_env`.
    pub fn apply_to_env(mut self, enabled: bool) -> Self {
        self.apply_to_env = enabled;
        self
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            override_existing: true,
            apply_to_env: true,
        }
    }
}

struct Registered {
    source: Box<dyn ConfigSource>,
    options: LoadOptions,
    optional: bool,
}

/// A caller-owned configuration context.
///
/// Sources are applied in registration order, so a later source overwrites
/// the keys of an earlier one unless its `LoadOptions` say otherwise. When an
/// environment store is attached, every write to the namespace is mirrored to
/// it as text.
///
/// # Examples
///
/// ```rust
/// use envdot::prelude::*;
/// use envdot::adapters::MemoryEnv;
///
/// # fn main() -> Result<()> {
/// let mut config = DotEnv::builder().mirror_to(MemoryEnv::new()).build()?;
/// config.set("database.port", 5432).set_raw("debug", "yes");
///
/// assert_eq!(config.get("DATABASE_PORT")?, TypedValue::Integer(5432));
/// assert!(config.get_bool("debug")?);
/// assert_eq!(
///     config.env_store().and_then(|env| env.get("DATABASE_PORT")).as_deref(),
///     Some("5432")
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct DotEnv {
    namespace: FlatNamespace,
    sources: Vec<Registered>,
    env: Option<Box<dyn EnvironmentStore>>,
}

impl DotEnv {
    /// Creates an empty context with no environment mirror.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty context that mirrors into `store`.
    pub fn with_env_store(store: impl EnvironmentStore + 'static) -> Self {
        Self {
            env: Some(Box::new(store)),
            ..Self::default()
        }
    }

    /// Creates a new builder.
    pub fn builder() -> DotEnvBuilder {
        DotEnvBuilder::new()
    }

    /// Loads a file with the default options. Returns the number of keys written.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        self.load_file_with(path, LoadOptions::default())
    }

    /// Loads a file, detecting its format from the name.
    pub fn load_file_with(&mut self, path: impl AsRef<Path>, options: LoadOptions) -> Result<usize> {
        let source = FileSource::new(path)?;
        self.load_source(Box::new(source), options)
    }

    /// Loads any source and remembers it for `reload`.
    pub fn load_source(
        &mut self,
        source: Box<dyn ConfigSource>,
        options: LoadOptions,
    ) -> Result<usize> {
        self.register(source, options, false)
    }

    fn register(
        &mut self,
        source: Box<dyn ConfigSource>,
        options: LoadOptions,
        optional: bool,
    ) -> Result<usize> {
        let written = match Self::fetch(source.as_ref(), optional)? {
            Some(loaded) => self.absorb(loaded, options, source.name()),
            None => 0,
        };
        self.sources.push(Registered {
            source,
            options,
            optional,
        });
        Ok(written)
    }

    // Ok(None) is an optional source that does not exist.
    fn fetch(source: &dyn ConfigSource, optional: bool) -> Result<Option<FlatNamespace>> {
        match source.load() {
            Ok(namespace) => Ok(Some(namespace)),
            Err(e) if optional && e.is_not_found() => {
                tracing::debug!("Optional source '{}' not found, skipping", source.name());
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn absorb(&mut self, loaded: FlatNamespace, options: LoadOptions, name: &str) -> usize {
        if options.apply_to_env {
            if let Some(env) = self.env.as_mut() {
                for (key, value) in &loaded {
                    if !options.override_existing && env.contains(key.as_str()) {
                        continue;
                    }
                    env.set(key.as_str(), &value.stringify());
                }
            }
        }

        let written = self.namespace.merge(loaded, options.override_existing);
        tracing::debug!("Applied {} keys from '{}'", written, name);
        written
    }

    /// Stores a typed value as-is.
    pub fn set(&mut self, key: &str, value: impl Into<TypedValue>) -> &mut Self {
        let key = FlatKey::normalize(key);
        let value = value.into();
        if let Some(env) = self.env.as_mut() {
            env.set(key.as_str(), &value.stringify());
        }
        self.namespace.insert(key, value);
        self
    }

    /// Stores a raw string, inferring its type. Casts see `raw` itself.
    pub fn set_raw(&mut self, key: &str, raw: &str) -> &mut Self {
        let key = FlatKey::normalize(key);
        if let Some(env) = self.env.as_mut() {
            env.set(key.as_str(), &infer(raw).stringify());
        }
        self.namespace.insert_raw(key, raw);
        self
    }

    /// Removes a key from the namespace and the environment mirror.
    pub fn delete(&mut self, key: &str) -> Option<TypedValue> {
        let key = FlatKey::normalize(key);
        if let Some(env) = self.env.as_mut() {
            env.remove(key.as_str());
        }
        self.namespace.remove(key.as_str())
    }

    /// Empties the namespace. With `clear_env`, its keys are also removed from
    /// the environment mirror.
    pub fn clear(&mut self, clear_env: bool) {
        if clear_env {
            if let Some(env) = self.env.as_mut() {
                for key in self.namespace.keys() {
                    env.remove(key.as_str());
                }
            }
        }
        self.namespace.clear();
    }

    /// Iterates over the keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &FlatKey> {
        self.namespace.keys()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.namespace.len()
    }

    /// Returns `true` if the namespace is empty.
    pub fn is_empty(&self) -> bool {
        self.namespace.is_empty()
    }

    /// Returns the first entry whose key matches the glob `pattern`.
    ///
    /// Matching is case-insensitive and a `.` in the pattern stands for the
    /// flat separator, so `"database.*"` matches `DATABASE_HOST`.
    pub fn find(&self, pattern: &str) -> Result<Option<(&FlatKey, &TypedValue)>> {
        let matcher = key_matcher(pattern)?;
        Ok(self.namespace.iter().find(|(key, _)| matcher.is_match(key.as_str())))
    }

    /// Returns every entry whose key matches the glob `pattern`, in order.
    ///
    /// ```rust
    /// use envdot::prelude::*;
    ///
    /// let mut config = DotEnv::new();
    /// config.set("database.host", "db").set("database.port", 5432).set("debug", true);
    /// let keys: Vec<&str> = config
    ///     .filter("database.*")
    ///     .unwrap()
    ///     .into_iter()
    ///     .map(|(k, _)| k.as_str())
    ///     .collect();
    /// assert_eq!(keys, vec!["DATABASE_HOST", "DATABASE_PORT"]);
    /// ```
    pub fn filter(&self, pattern: &str) -> Result<Vec<(&FlatKey, &TypedValue)>> {
        let matcher = key_matcher(pattern)?;
        Ok(self
            .namespace
            .iter()
            .filter(|(key, _)| matcher.is_match(key.as_str()))
            .collect())
    }

    /// Returns every entry whose key or stringified value contains `needle`,
    /// ignoring case.
    pub fn search(&self, needle: &str) -> Vec<(&FlatKey, &TypedValue)> {
        let needle = needle.to_lowercase();
        self.namespace
            .iter()
            .filter(|(key, value)| {
                key.as_str().to_lowercase().contains(&needle)
                    || value.stringify().to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Returns the namespace.
    pub fn namespace(&self) -> &FlatNamespace {
        &self.namespace
    }

    /// Returns the environment mirror, if any.
    pub fn env_store(&self) -> Option<&dyn EnvironmentStore> {
        self.env.as_deref()
    }

    /// Writes every entry to the environment mirror. Returns the number of
    /// variables written, or 0 without a mirror.
    pub fn apply_to_env(&mut self) -> usize {
        match self.env.as_mut() {
            Some(env) => {
                for (key, value) in &self.namespace {
                    env.set(key.as_str(), &value.stringify());
                }
                self.namespace.len()
            }
            None => 0,
        }
    }

    /// Renders the namespace in `format`.
    pub fn render(&self, format: Format) -> Result<String> {
        format.parser()?.render(&self.namespace)
    }

    /// Saves the namespace, choosing the format from the file name.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let format = Format::from_path(path.as_ref())?;
        self.save_as(path, format)
    }

    /// Saves the namespace in an explicit format.
    pub fn save_as(&self, path: impl AsRef<Path>, format: Format) -> Result<()> {
        let content = self.render(format)?;
        write_config(path, &content)
    }
}

impl ConfigurationService for DotEnv {
    fn get(&self, key: &str) -> Result<TypedValue> {
        let key = FlatKey::normalize(key);
        self.namespace
            .get(key.as_str())
            .cloned()
            .ok_or_else(|| ConfigError::ConfigKeyNotFound {
                key: key.into_string(),
            })
    }

    fn get_raw(&self, key: &str) -> Result<String> {
        let key = FlatKey::normalize(key);
        self.namespace
            .cast_text(key.as_str())
            .ok_or_else(|| ConfigError::ConfigKeyNotFound {
                key: key.into_string(),
            })
    }

    fn has(&self, key: &str) -> bool {
        self.namespace.contains_key(FlatKey::normalize(key).as_str())
    }

    // Every source is loaded before anything is replaced, so a failed reload
    // leaves the namespace and the mirror as they were.
    fn reload(&mut self) -> Result<()> {
        let mut fetched = Vec::with_capacity(self.sources.len());
        for registered in &self.sources {
            match Self::fetch(registered.source.as_ref(), registered.optional) {
                Ok(loaded) => {
                    fetched.push((loaded, registered.options, registered.source.name().to_string()))
                }
                Err(e) => {
                    tracing::warn!("Failed to reload source '{}': {}", registered.source.name(), e);
                    return Err(e);
                }
            }
        }

        self.namespace = FlatNamespace::new();
        for (loaded, options, name) in fetched {
            if let Some(loaded) = loaded {
                self.absorb(loaded, options, &name);
            }
        }
        Ok(())
    }
}

fn key_matcher(pattern: &str) -> Result<GlobMatcher> {
    let glob = GlobBuilder::new(&pattern.replace('.', "_"))
        .case_insensitive(true)
        .build()
        .map_err(|e| ConfigError::ParseError {
            message: format!("invalid key pattern '{}': {}", pattern, e),
            source: Some(Box::new(e)),
        })?;
    Ok(glob.compile_matcher())
}

enum Pending {
    File { path: PathBuf, optional: bool },
    Source(Box<dyn ConfigSource>),
}

/// Builder for constructing a `DotEnv`.
///
/// Sources are loaded by `build` in the order they were added.
///
/// # Examples
///
/// ```rust,no_run
/// use envdot::service::DotEnv;
///
/// # fn main() -> envdot::domain::Result<()> {
/// let config = DotEnv::builder()
///     .with_file("config.yaml")
///     .with_optional_file(".env.local")
///     .with_env_prefix("MYAPP_")
///     .mirror_to_process_env()
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct DotEnvBuilder {
    pending: Vec<Pending>,
    env: Option<Box<dyn EnvironmentStore>>,
    options: LoadOptions,
}

impl DotEnvBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a required file. A missing file fails `build`.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.pending.push(Pending::File {
            path: path.as_ref().to_path_buf(),
            optional: false,
        });
        self
    }

    /// Adds a file that is skipped when it does not exist.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        self.pending.push(Pending::File {
            path: path.as_ref().to_path_buf(),
            optional: true,
        });
        self
    }

    /// Adds any configuration source.
    pub fn with_source(mut self, source: Box<dyn ConfigSource>) -> Self {
        self.pending.push(Pending::Source(source));
        self
    }

    /// Adds the process environment variables starting with `prefix`.
    #[cfg(feature = "env")]
    pub fn with_env_prefix(self, prefix: impl Into<String>) -> Self {
        use crate::adapters::EnvVarAdapter;
        self.with_source(Box::new(EnvVarAdapter::with_prefix(prefix)))
    }

    /// Mirrors the namespace into `store`.
    pub fn mirror_to(mut self, store: impl EnvironmentStore + 'static) -> Self {
        self.env = Some(Box::new(store));
        self
    }

    /// Mirrors the namespace into the process environment.
    #[cfg(feature = "env")]
    pub fn mirror_to_process_env(self) -> Self {
        use crate::adapters::ProcessEnv;
        self.mirror_to(ProcessEnv::new())
    }

    /// Sets `override_existing` for every source added to this builder.
    pub fn override_existing(mut self, enabled: bool) -> Self {
        self.options.override_existing = enabled;
        self
    }

    /// Sets `apply_to_env` for every source added to this builder.
    pub fn apply_to_env(mut self, enabled: bool) -> Self {
        self.options.apply_to_env = enabled;
        self
    }

    /// Loads every source and returns the context.
    pub fn build(self) -> Result<DotEnv> {
        let mut dot_env = DotEnv {
            env: self.env,
            ..DotEnv::default()
        };

        for pending in self.pending {
            match pending {
                Pending::File { path, optional } => {
                    let source = FileSource::new(&path)?;
                    dot_env.register(Box::new(source), self.options, optional)?;
                }
                Pending::Source(source) => {
                    dot_env.register(source, self.options, false)?;
                }
            }
        }

        Ok(dot_env)
    }
}
