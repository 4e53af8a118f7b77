// SPDX-License-Identifier: MIT OR Apache-2.0

//! The flat namespace produced by every load.

use crate::domain::flat_key::FlatKey;
use crate::domain::flatten::{document_leaves, FlatEntry};
use crate::domain::inference::infer;
use crate::domain::typed_value::TypedValue;
use crate::domain::value_node::{Document, Scalar};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// An insertion-ordered mapping from `FlatKey` to `TypedValue`.
///
/// Keys keep the position of their first insertion. Writing an existing key
/// replaces its value in place (last writer wins). Values inferred from text
/// keep that text so casts see what the source wrote.
///
/// # Examples
///
/// ```
/// use envdot::domain::{FlatKey, FlatNamespace, TypedValue};
///
/// let mut ns = FlatNamespace::new();
/// ns.insert(FlatKey::normalize("port"), TypedValue::Integer(80));
/// ns.insert(FlatKey::normalize("host"), TypedValue::from("localhost"));
/// ns.insert(FlatKey::normalize("port"), TypedValue::Integer(8080));
///
/// assert_eq!(ns.get("PORT"), Some(&TypedValue::Integer(8080)));
/// assert_eq!(ns.keys().next().map(|k| k.as_str()), Some("PORT"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct FlatNamespace {
    entries: IndexMap<FlatKey, Stored>,
}

/// A value plus the text it was inferred from, when it came from text.
#[derive(Clone, Debug)]
struct Stored {
    value: TypedValue,
    raw: Option<String>,
}

impl Stored {
    fn typed(value: TypedValue) -> Self {
        Stored { value, raw: None }
    }

    fn from_scalar(scalar: &Scalar) -> Self {
        match scalar {
            Scalar::Raw(text) => Stored {
                value: infer(text),
                raw: Some(text.clone()),
            },
            Scalar::Typed(value) => Stored::typed(value.clone()),
        }
    }
}

impl FlatNamespace {
    /// Creates an empty namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds flattener output into a namespace.
    pub fn from_entries(entries: impl IntoIterator<Item = FlatEntry>) -> Self {
        let mut ns = Self::new();
        for (key, value) in entries {
            ns.fold(key, Stored::typed(value));
        }
        ns
    }

    /// Flattens a parsed document, keeping the source text of raw scalars.
    ///
    /// ```
    /// use envdot::domain::{Document, FlatNamespace, TypedValue, ValueNode};
    ///
    /// let doc = Document::Tree(ValueNode::mapping(vec![("workers", ValueNode::raw("1"))]));
    /// let ns = FlatNamespace::from_document(&doc);
    /// assert_eq!(ns.get("WORKERS"), Some(&TypedValue::Boolean(true)));
    /// assert_eq!(ns.raw("WORKERS"), Some("1"));
    /// ```
    pub fn from_document(document: &Document) -> Self {
        let mut ns = Self::new();
        for (key, scalar) in document_leaves(document) {
            ns.fold(key, Stored::from_scalar(scalar));
        }
        ns
    }

    fn fold(&mut self, key: FlatKey, stored: Stored) {
        if self.entries.contains_key(&key) {
            tracing::debug!("Flat key {} produced more than once, keeping last value", key);
        }
        self.entries.insert(key, stored);
    }

    /// Returns the value stored under `key`. The key must already be normalized.
    pub fn get(&self, key: &str) -> Option<&TypedValue> {
        self.entries.get(key).map(|stored| &stored.value)
    }

    /// Returns the source text of `key`, if its value was inferred from text.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(|stored| stored.raw.as_deref())
    }

    /// Returns the text a cast of `key` operates on: the source text when
    /// known, otherwise the stringified value.
    pub fn cast_text(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|stored| match &stored.raw {
            Some(raw) => raw.clone(),
            None => stored.value.stringify(),
        })
    }

    /// Stores a value, returning the one it replaced.
    pub fn insert(&mut self, key: FlatKey, value: TypedValue) -> Option<TypedValue> {
        self.entries
            .insert(key, Stored::typed(value))
            .map(|old| old.value)
    }

    /// Infers `raw` and stores it together with its text.
    pub fn insert_raw(&mut self, key: FlatKey, raw: &str) -> Option<TypedValue> {
        let stored = Stored {
            value: infer(raw),
            raw: Some(raw.to_string()),
        };
        self.entries.insert(key, stored).map(|old| old.value)
    }

    /// Removes a key, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<TypedValue> {
        self.entries.shift_remove(key).map(|old| old.value)
    }

    /// Returns `true` if the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterates over keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &FlatKey> {
        self.entries.keys()
    }

    /// Iterates over entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&FlatKey, &TypedValue)> {
        self.entries.iter().map(value_ref)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Merges `other` into this namespace.
    ///
    /// With `override_existing` the incoming value wins on a shared key,
    /// otherwise the current value is kept. New keys are appended in the order
    /// of `other`. Returns the number of keys written.
    pub fn merge(&mut self, other: FlatNamespace, override_existing: bool) -> usize {
        let mut written = 0;
        for (key, stored) in other.entries {
            if !override_existing && self.entries.contains_key(&key) {
                tracing::debug!("Keeping existing value for {}", key);
                continue;
            }
            self.entries.insert(key, stored);
            written += 1;
        }
        written
    }
}

fn value_ref<'a>((key, stored): (&'a FlatKey, &'a Stored)) -> (&'a FlatKey, &'a TypedValue) {
    (key, &stored.value)
}

fn into_entry((key, stored): (FlatKey, Stored)) -> FlatEntry {
    (key, stored.value)
}

// Two namespaces are equal when they hold the same keys with the same values.
impl PartialEq for FlatNamespace {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k.as_str()) == Some(v))
    }
}

impl From<Vec<FlatEntry>> for FlatNamespace {
    fn from(entries: Vec<FlatEntry>) -> Self {
        Self::from_entries(entries)
    }
}

impl FromIterator<FlatEntry> for FlatNamespace {
    fn from_iter<I: IntoIterator<Item = FlatEntry>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

impl IntoIterator for FlatNamespace {
    type Item = FlatEntry;
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self.entries.into_iter())
    }
}

impl<'a> IntoIterator for &'a FlatNamespace {
    type Item = (&'a FlatKey, &'a TypedValue);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        Iter(self.entries.iter())
    }
}

/// Owning iterator over the entries of a `FlatNamespace`.
#[derive(Debug)]
pub struct IntoIter(indexmap::map::IntoIter<FlatKey, Stored>);

impl Iterator for IntoIter {
    type Item = FlatEntry;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(into_entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

/// Borrowing iterator over the entries of a `FlatNamespace`.
#[derive(Debug)]
pub struct Iter<'a>(indexmap::map::Iter<'a, FlatKey, Stored>);

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a FlatKey, &'a TypedValue);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(value_ref)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl Serialize for FlatNamespace {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|(k, v)| (k.as_str(), v)))
    }
}
