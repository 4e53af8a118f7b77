// SPDX-License-Identifier: MIT OR Apache-2.0

//! Flat namespace keys.
//!
//! This module provides the `FlatKey` type, a newtype wrapper around `String` that
//! only ever holds a normalized key: uppercase ASCII letters, digits and the
//! `_` separator, with no two separators in a row.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};

/// The character used to join key segments.
pub const SEPARATOR: char = '_';

/// A normalized key in a flat configuration namespace.
///
/// Every way of building a `FlatKey` goes through normalization: the input is
/// uppercased and every character outside `[A-Z0-9]` becomes the separator,
/// collapsing runs so that no two separators ever appear consecutively.
///
/// # Examples
///
/// ```
/// use envdot::domain::flat_key::FlatKey;
///
/// let key = FlatKey::normalize("database.host");
/// assert_eq!(key.as_str(), "DATABASE_HOST");
///
/// let port = FlatKey::normalize("database").child("port");
/// assert_eq!(port.as_str(), "DATABASE_PORT");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct FlatKey(String);

impl FlatKey {
    /// Returns the empty key used as the prefix of a document root.
    pub fn root() -> Self {
        FlatKey(String::new())
    }

    /// Normalizes an arbitrary source key into a `FlatKey`.
    ///
    /// # Examples
    ///
    /// ```
    /// use envdot::domain::flat_key::FlatKey;
    ///
    /// assert_eq!(FlatKey::normalize("max-connections").as_str(), "MAX_CONNECTIONS");
    /// assert_eq!(FlatKey::normalize("a..b").as_str(), "A_B");
    /// assert_eq!(FlatKey::normalize("APP_NAME").as_str(), "APP_NAME");
    /// ```
    pub fn normalize(raw: &str) -> Self {
        let mut buf = String::with_capacity(raw.len());
        push_normalized(&mut buf, raw);
        FlatKey(buf)
    }

    /// Returns the key for a named child of this key.
    ///
    /// At the root the child key is the normalized segment alone. An empty
    /// segment yields this key unchanged.
    pub fn child(&self, segment: &str) -> Self {
        if segment.is_empty() {
            return self.clone();
        }
        let mut buf = String::with_capacity(self.0.len() + segment.len() + 1);
        buf.push_str(&self.0);
        if !buf.is_empty() && !buf.ends_with(SEPARATOR) {
            buf.push(SEPARATOR);
        }
        push_normalized(&mut buf, segment);
        FlatKey(buf)
    }

    /// Returns the key for the element at `index` of a sequence under this key.
    pub fn index(&self, index: usize) -> Self {
        self.child(&index.to_string())
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the `FlatKey` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns `true` for the root key, which is never a valid namespace entry.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Appends the normalized form of `raw` to `buf`, continuing any separator run
/// already at the end of `buf`.
fn push_normalized(buf: &mut String, raw: &str) {
    for ch in raw.chars().flat_map(char::to_uppercase) {
        if ch.is_ascii_uppercase() || ch.is_ascii_digit() {
            buf.push(ch);
        } else if !buf.ends_with(SEPARATOR) {
            buf.push(SEPARATOR);
        }
    }
}

impl From<String> for FlatKey {
    fn from(s: String) -> Self {
        FlatKey::normalize(&s)
    }
}

impl From<&str> for FlatKey {
    fn from(s: &str) -> Self {
        FlatKey::normalize(s)
    }
}

impl From<FlatKey> for String {
    fn from(key: FlatKey) -> Self {
        key.0
    }
}

impl AsRef<str> for FlatKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for FlatKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FlatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Must hash exactly like `str` for the `Borrow<str>` lookups to work.
impl Hash for FlatKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}
