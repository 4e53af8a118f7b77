// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration crate.
//!
//! This module defines the error types that can occur when loading, converting or
//! saving configuration values. All errors use `thiserror` for proper error
//! handling and conversion.

use crate::domain::typed_value::CastKind;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for configuration operations.
///
/// Type inference itself never fails; only explicit casts, lookups of missing
/// keys and the file/format collaborators produce errors. It is marked as
/// `#[non_exhaustive]` to allow for future additions without breaking
/// backwards compatibility.
///
/// # Examples
///
/// ```
/// use envdot::domain::errors::ConfigError;
/// use envdot::domain::CastKind;
///
/// let error = ConfigError::TypeConversionError {
///     key: "APP_NAME".to_string(),
///     value: "MyApplication".to_string(),
///     kind: CastKind::Integer,
/// };
/// assert!(error.to_string().contains("APP_NAME"));
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The requested configuration key is not in the namespace.
    #[error("Configuration key not found: {key}")]
    ConfigKeyNotFound {
        /// The normalized key that was not found
        key: String,
    },

    /// An explicit cast was requested but the value is not a literal of that kind.
    #[error("Failed to convert value '{value}' for key '{key}' to {kind}")]
    TypeConversionError {
        /// The key being converted
        key: String,
        /// The raw value that could not be converted
        value: String,
        /// The requested kind
        kind: CastKind,
    },

    /// A configuration file does not exist.
    #[error("Configuration file not found: {}", .path.display())]
    FileNotFound {
        /// The path that was looked up
        path: PathBuf,
    },

    /// The file format could not be determined or its support is not compiled in.
    #[error("Unsupported configuration format: {name}")]
    UnsupportedFormat {
        /// The format name or file name that was rejected
        name: String,
    },

    /// Failed to parse a configuration file or value.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to render a namespace into a file format.
    #[error("Failed to write {format} configuration: {message}")]
    SerializeError {
        /// The target format
        format: String,
        /// The error message
        message: String,
        /// The underlying serializer error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error occurred in a configuration source.
    #[error("Configuration source '{source_name}' error: {message}")]
    SourceError {
        /// The name of the source that encountered the error
        source_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An I/O error occurred while reading or writing configuration.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    /// Creates a `TypeConversionError`.
    pub fn conversion(key: impl Into<String>, value: impl Into<String>, kind: CastKind) -> Self {
        ConfigError::TypeConversionError {
            key: key.into(),
            value: value.into(),
            kind,
        }
    }

    /// Creates a `ParseError` for a specific line of a text format.
    pub fn parse_at_line(format: &str, line: usize, message: impl Into<String>) -> Self {
        ConfigError::ParseError {
            message: format!("{} line {}: {}", format, line, message.into()),
            source: None,
        }
    }

    /// Returns `true` for `FileNotFound`.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::FileNotFound { .. })
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_key_not_found_error() {
        let error = ConfigError::ConfigKeyNotFound {
            key: "TEST_KEY".to_string(),
        };
        assert_eq!(error.to_string(), "Configuration key not found: TEST_KEY");
    }

    #[test]
    fn test_type_conversion_error() {
        let error = ConfigError::conversion("APP_NAME", "MyApplication", CastKind::Integer);
        assert_eq!(
            error.to_string(),
            "Failed to convert value 'MyApplication' for key 'APP_NAME' to integer"
        );
        match error {
            ConfigError::TypeConversionError { key, value, kind } => {
                assert_eq!(key, "APP_NAME");
                assert_eq!(value, "MyApplication");
                assert_eq!(kind, CastKind::Integer);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_file_not_found_error() {
        let error = ConfigError::FileNotFound {
            path: PathBuf::from("missing.env"),
        };
        assert_eq!(error.to_string(), "Configuration file not found: missing.env");
        assert!(error.is_not_found());
    }

    #[test]
    fn test_unsupported_format_error() {
        let error = ConfigError::UnsupportedFormat {
            name: "config.xml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Unsupported configuration format: config.xml"
        );
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_parse_error_at_line() {
        let error = ConfigError::parse_at_line("dotenv", 3, "missing '='");
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration: dotenv line 3: missing '='"
        );
    }

    #[test]
    fn test_serialize_error() {
        let error = ConfigError::SerializeError {
            format: "toml".to_string(),
            message: "bad value".to_string(),
            source: None,
        };
        assert_eq!(error.to_string(), "Failed to write toml configuration: bad value");
    }

    #[test]
    fn test_source_error() {
        let error = ConfigError::SourceError {
            source_name: "env".to_string(),
            message: "Failed to read environment".to_string(),
            source: None,
        };
        assert_eq!(
            error.to_string(),
            "Configuration source 'env' error: Failed to read environment"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = ConfigError::from(io_error);
        assert!(matches!(error, ConfigError::IoError(_)));
    }
}
