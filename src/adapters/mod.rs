// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing format and environment implementations.
//!
//! This module contains concrete implementations of the traits defined in the
//! ports layer: one `ConfigParser` per file format, the file and environment
//! `ConfigSource`s, and the `EnvironmentStore`s.

pub mod dotenv_file;
#[cfg(feature = "env")]
pub mod env_var;
pub mod file_source;
pub mod format;
pub mod ini_file;
#[cfg(feature = "json")]
pub mod json_file;
pub mod memory_env;
#[cfg(feature = "toml")]
pub mod toml_file;
#[cfg(feature = "yaml")]
pub mod yaml_file;

// Re-export adapters based on feature flags
pub use dotenv_file::DotEnvParser;
#[cfg(feature = "env")]
pub use env_var::{EnvVarAdapter, ProcessEnv};
pub use file_source::{write_config, FileSource};
pub use format::Format;
pub use ini_file::IniParser;
#[cfg(feature = "json")]
pub use json_file::JsonParser;
pub use memory_env::MemoryEnv;
#[cfg(feature = "toml")]
pub use toml_file::TomlParser;
#[cfg(feature = "yaml")]
pub use yaml_file::YamlParser;
