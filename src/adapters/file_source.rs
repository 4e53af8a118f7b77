// SPDX-License-Identifier: MIT OR Apache-2.0

//! File-backed configuration source.
//!
//! This module provides `FileSource`, which reads a configuration file of any
//! supported format, and the helpers used to find and write such files.

use crate::adapters::Format;
use crate::domain::{ConfigError, FlatNamespace, Result};
use crate::ports::ConfigSource;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum allowed size of a configuration file (10MB)
/// This prevents denial of service attacks via extremely large files
const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// File names tried, in order, by [`FileSource::discover`].
pub const DISCOVERY_CANDIDATES: [&str; 6] = [
    ".env",
    "config.json",
    "config.yaml",
    "config.yml",
    "config.toml",
    "config.ini",
];

/// Configuration source for a single file.
///
/// The file is read on every `load`, so reloading a service picks up changes
/// made since the previous load.
///
/// # Examples
///
/// ```rust,no_run
/// use envdot::adapters::FileSource;
/// use envdot::ports::ConfigSource;
///
/// // Format detected from the file name
/// let source = FileSource::new("/etc/myapp/config.yaml").unwrap();
/// let namespace = source.load().unwrap();
///
/// // Discover a config file in the OS config directory
/// let source = FileSource::from_default_location("myapp", "com.example").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    format: Format,
    name: String,
}

impl FileSource {
    /// Creates a source whose format is detected from the path.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let format = Format::from_path(path.as_ref())?;
        Ok(Self::with_format(path, format))
    }

    /// Creates a source with an explicit format.
    pub fn with_format(path: impl AsRef<Path>, format: Format) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path.display().to_string();
        Self { path, format, name }
    }

    /// Returns the first candidate file that exists in `dir`.
    ///
    /// See [`DISCOVERY_CANDIDATES`] for the search order.
    pub fn discover(dir: impl AsRef<Path>) -> Option<Self> {
        let dir = dir.as_ref();
        DISCOVERY_CANDIDATES
            .iter()
            .map(|candidate| dir.join(candidate))
            .find(|path| path.is_file())
            .and_then(|path| {
                tracing::debug!("Discovered configuration file {}", path.display());
                Self::new(path).ok()
            })
    }

    /// Discovers a configuration file in the OS-appropriate config directory.
    ///
    /// This method uses the `directories` crate to determine the appropriate
    /// configuration directory for the current operating system.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name (e.g., "myapp")
    /// * `qualifier` - The organization/qualifier (e.g., "com.example")
    pub fn from_default_location(app_name: &str, qualifier: &str) -> Result<Self> {
        let proj_dirs =
            ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| ConfigError::SourceError {
                source_name: "file".to_string(),
                message: "Failed to determine project directories".to_string(),
                source: None,
            })?;

        let config_dir = proj_dirs.config_dir();
        Self::discover(config_dir).ok_or_else(|| ConfigError::FileNotFound {
            path: config_dir.to_path_buf(),
        })
    }

    /// Returns the path to the configuration file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the file format.
    pub fn format(&self) -> Format {
        self.format
    }

    fn read(&self) -> Result<String> {
        if !self.path.exists() {
            return Err(ConfigError::FileNotFound {
                path: self.path.clone(),
            });
        }

        // Canonicalize path to prevent directory traversal attacks
        let canonical_path = self.path.canonicalize().map_err(|e| ConfigError::SourceError {
            source_name: self.name.clone(),
            message: "Invalid or inaccessible path".to_string(),
            source: Some(Box::new(e)),
        })?;

        // Check file size before reading to prevent DoS via large files
        let metadata = fs::metadata(&canonical_path).map_err(|e| ConfigError::SourceError {
            source_name: self.name.clone(),
            message: "Failed to read file metadata".to_string(),
            source: Some(Box::new(e)),
        })?;

        if metadata.len() > MAX_FILE_SIZE {
            return Err(ConfigError::SourceError {
                source_name: self.name.clone(),
                message: format!(
                    "Configuration file too large: {} bytes (max {} bytes)",
                    metadata.len(),
                    MAX_FILE_SIZE
                ),
                source: None,
            });
        }

        fs::read_to_string(&canonical_path).map_err(|e| ConfigError::SourceError {
            source_name: self.name.clone(),
            message: "Failed to read configuration file".to_string(),
            source: Some(Box::new(e)),
        })
    }
}

impl ConfigSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<FlatNamespace> {
        let content = self.read()?;
        let parser = self.format.parser()?;
        let document = parser.parse(&content)?;
        let namespace = FlatNamespace::from_document(&document);
        tracing::debug!(
            "Loaded {} entries from {} ({})",
            namespace.len(),
            self.path.display(),
            self.format
        );
        Ok(namespace)
    }
}

/// Writes `content` to `path`, creating missing parent directories.
pub fn write_config(path: impl AsRef<Path>, content: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;
    tracing::debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
