// SPDX-License-Identifier: MIT OR Apache-2.0

//! INI format adapter.

use crate::domain::flatten::DEFAULT_SECTION;
use crate::domain::{ConfigError, Document, FlatNamespace, Result, ValueNode};
use crate::ports::ConfigParser;
use indexmap::IndexMap;

/// Parser for INI files.
///
/// Recognizes `[section]` headers, `key = value` and `key: value` pairs, and
/// whole-line `;` or `#` comments. Indented lines continue the previous value
/// on a new line. Keys that appear before any header go to the unnamed
/// section, which, like `[DEFAULT]`, is not used as a key prefix.
///
/// # Examples
///
/// ```rust
/// use envdot::adapters::IniParser;
/// use envdot::domain::flatten_document;
/// use envdot::ports::ConfigParser;
///
/// let ini = "[DEFAULT]\napp_name = My App\n\n[database]\nhost = localhost\n";
/// let doc = IniParser::new().parse(ini).unwrap();
/// let keys: Vec<String> = flatten_document(&doc)
///     .into_iter()
///     .map(|(k, _)| k.into_string())
///     .collect();
/// assert_eq!(keys, vec!["APP_NAME", "DATABASE_HOST"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct IniParser;

type Section = IndexMap<String, String>;

impl IniParser {
    /// Creates a new INI parser.
    pub fn new() -> Self {
        IniParser
    }

    fn split_pair(line: &str) -> Option<(&str, &str)> {
        let pos = line.find(['=', ':'])?;
        Some((&line[..pos], &line[pos + 1..]))
    }
}

impl ConfigParser for IniParser {
    fn name(&self) -> &str {
        "ini"
    }

    fn parse(&self, content: &str) -> Result<Document> {
        let mut sections: IndexMap<String, Section> = IndexMap::new();
        let mut current = String::new();
        let mut last_key: Option<String> = None;

        for (i, line) in content.lines().enumerate() {
            let number = i + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with(';') || trimmed.starts_with('#') {
                continue;
            }

            if line.starts_with(char::is_whitespace) {
                if let Some(key) = &last_key {
                    if let Some(value) = sections
                        .get_mut(&current)
                        .and_then(|section| section.get_mut(key))
                    {
                        value.push('\n');
                        value.push_str(trimmed);
                        continue;
                    }
                }
            }

            if let Some(header) = trimmed.strip_prefix('[') {
                let name = header.strip_suffix(']').ok_or_else(|| {
                    ConfigError::parse_at_line("ini", number, "unterminated section header")
                })?;
                current = name.trim().to_string();
                sections.entry(current.clone()).or_default();
                last_key = None;
                continue;
            }

            let (key, value) = Self::split_pair(trimmed).ok_or_else(|| {
                ConfigError::parse_at_line("ini", number, "expected key = value")
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(ConfigError::parse_at_line("ini", number, "empty key"));
            }
            sections
                .entry(current.clone())
                .or_default()
                .insert(key.to_string(), value.trim().to_string());
            last_key = Some(key.to_string());
        }

        let sections = sections
            .into_iter()
            .map(|(name, values)| {
                let body = values
                    .into_iter()
                    .map(|(k, v)| (k, ValueNode::raw(v)))
                    .collect();
                (name, ValueNode::Mapping(body))
            })
            .collect();
        Ok(Document::Sections(sections))
    }

    /// Writes every key into a single `[DEFAULT]` section, so loading the
    /// output yields the same flat keys.
    fn render(&self, namespace: &FlatNamespace) -> Result<String> {
        let mut out = format!("[{}]\n", DEFAULT_SECTION);
        for (key, value) in namespace {
            let text = value.stringify();
            out.push_str(key.as_str());
            out.push_str(" = ");
            out.push_str(&text.replace('\n', "\n\t"));
            out.push('\n');
        }
        Ok(out)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["ini", "cfg", "conf"]
    }
}
