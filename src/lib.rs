// SPDX-License-Identifier: MIT OR Apache-2.0

//! Multi-format configuration loading with key flattening and type inference.
//!
//! This crate loads key/value settings from dotenv, INI, JSON, YAML and TOML
//! files, flattens nested structures into a single namespace of uppercase
//! keys, infers the type of every textual value, and can mirror the result
//! into an environment store. The namespace can be written back out in any of
//! the supported formats.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: The type inferencer, the structure flattener and the
//!   types they exchange (`TypedValue`, `FlatKey`, `ValueNode`, `FlatNamespace`)
//! - **Ports**: Trait definitions for collaborators (`ConfigParser`,
//!   `ConfigSource`, `EnvironmentStore`)
//! - **Adapters**: Format parsers, file and environment sources, environment stores
//! - **Service**: `DotEnv`, the caller-owned context that ties everything together
//!
//! # Type Inference
//!
//! | Raw text                          | Inferred value    |
//! |-----------------------------------|-------------------|
//! | `""`, `none`, `null`              | `Null`            |
//! | `true`, `yes`, `on`, `1`          | `Boolean(true)`   |
//! | `false`, `no`, `off`, `0`         | `Boolean(false)`  |
//! | `-?[0-9]+`                        | `Integer`         |
//! | `-?[0-9]+.[0-9]+`                 | `Float`           |
//! | anything else                     | `String`          |
//!
//! Matching is case-insensitive and the rules apply top to bottom, so `"0"`
//! is `Boolean(false)`, not `Integer(0)`.
//!
//! # Feature Flags
//!
//! - `yaml`: Enable YAML file support (default)
//! - `json`: Enable JSON file support (default)
//! - `toml`: Enable TOML file support (default)
//! - `env`: Enable process environment support (default)
//! - `cli`: Build the `envdot` command-line tool (default)
//! - `full`: Enable all features
//!
//! Dotenv and INI support is always compiled in.
//!
//! # Quick Start
//!
//! ```rust
//! use envdot::prelude::*;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let dir = tempfile::tempdir()?;
//! let path = dir.path().join("config.json");
//! std::fs::write(&path, r#"{"database": {"host": "localhost", "port": 5432}}"#)?;
//!
//! let mut config = DotEnv::new();
//! config.load_file(&path)?;
//!
//! assert_eq!(config.get("DATABASE_HOST")?, TypedValue::from("localhost"));
//! assert_eq!(config.get_int("database.port")?, 5432);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::adapters::{FileSource, Format, MemoryEnv};
    pub use crate::domain::{
        cast, infer, CastKind, CastValue, ConfigError, ConfigurationService, FlatKey,
        FlatNamespace, Result, TypedValue,
    };
    pub use crate::ports::{ConfigParser, ConfigSource, EnvironmentStore};
    pub use crate::service::{DotEnv, DotEnvBuilder, LoadOptions};

    // Re-export adapters based on feature flags
    #[cfg(feature = "env")]
    pub use crate::adapters::{EnvVarAdapter, ProcessEnv};
}
