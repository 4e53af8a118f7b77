// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration file formats and their detection.

use crate::adapters::{DotEnvParser, IniParser};
use crate::domain::{ConfigError, Result};
use crate::ports::ConfigParser;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A supported configuration file format.
///
/// Dotenv and INI are always available. JSON, YAML and TOML depend on the
/// crate features of the same name; asking a disabled format for its parser
/// returns `ConfigError::UnsupportedFormat`.
///
/// # Examples
///
/// ```rust
/// use envdot::adapters::Format;
///
/// assert_eq!(Format::from_path(".env.local").unwrap(), Format::DotEnv);
/// assert_eq!(Format::from_path("conf/app.yml").unwrap(), Format::Yaml);
/// assert!(Format::from_path("notes.txt").is_err());
/// assert_eq!("toml".parse::<Format>().unwrap(), Format::Toml);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    /// `KEY=VALUE` lines.
    DotEnv,
    /// JSON.
    Json,
    /// YAML.
    Yaml,
    /// TOML.
    Toml,
    /// INI with sections.
    Ini,
}

impl Format {
    /// Detects the format from a file name.
    ///
    /// Names starting with `.env` (`.env`, `.env.production`) are dotenv.
    /// Otherwise the extension decides, case-insensitively.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        if file_name.starts_with(".env") {
            return Ok(Format::DotEnv);
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "env" => Ok(Format::DotEnv),
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            "toml" => Ok(Format::Toml),
            "ini" | "cfg" | "conf" => Ok(Format::Ini),
            _ => Err(ConfigError::UnsupportedFormat {
                name: path.display().to_string(),
            }),
        }
    }

    /// Returns the lowercase format name.
    pub fn name(&self) -> &'static str {
        match self {
            Format::DotEnv => "dotenv",
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Toml => "toml",
            Format::Ini => "ini",
        }
    }

    /// Returns the parser for this format.
    pub fn parser(&self) -> Result<Box<dyn ConfigParser>> {
        match self {
            Format::DotEnv => Ok(Box::new(DotEnvParser::new())),
            Format::Ini => Ok(Box::new(IniParser::new())),
            #[cfg(feature = "json")]
            Format::Json => Ok(Box::new(crate::adapters::JsonParser::new())),
            #[cfg(feature = "yaml")]
            Format::Yaml => Ok(Box::new(crate::adapters::YamlParser::new())),
            #[cfg(feature = "toml")]
            Format::Toml => Ok(Box::new(crate::adapters::TomlParser::new())),
            #[allow(unreachable_patterns)]
            other => Err(ConfigError::UnsupportedFormat {
                name: format!("{} (feature not enabled)", other.name()),
            }),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "env" | "dotenv" => Ok(Format::DotEnv),
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            "toml" => Ok(Format::Toml),
            "ini" | "cfg" | "conf" => Ok(Format::Ini),
            _ => Err(ConfigError::UnsupportedFormat {
                name: s.to_string(),
            }),
        }
    }
}
