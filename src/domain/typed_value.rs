// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed configuration values.
//!
//! This module provides `TypedValue`, the result of type inference, together with
//! `CastKind` and `CastValue`, which describe explicit casts requested by callers.

use crate::domain::errors::ConfigError;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A configuration value after type inference.
///
/// Values coming from formats without native types (dotenv, INI) are inferred
/// from their text. Values from structured formats (JSON, YAML, TOML) keep the
/// type the format gave them; only their strings go through inference.
///
/// # Examples
///
/// ```
/// use envdot::domain::typed_value::TypedValue;
///
/// let value = TypedValue::Integer(8080);
/// assert_eq!(value.stringify(), "8080");
/// assert_eq!(TypedValue::Boolean(true).stringify(), "true");
/// assert_eq!(TypedValue::Null.stringify(), "");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum TypedValue {
    /// An absent value (`""`, `none`, `null`, or a native null).
    Null,
    /// A boolean.
    Boolean(bool),
    /// A signed integer.
    Integer(i64),
    /// A floating point number.
    Float(f64),
    /// Any other text, unmodified.
    String(String),
}

impl TypedValue {
    /// Renders the value as the text that would be written to a file or an
    /// environment variable.
    ///
    /// This is not an exact inverse of inference: `Integer(0)` renders as `"0"`,
    /// which infers back to `Boolean(false)`.
    pub fn stringify(&self) -> String {
        match self {
            TypedValue::Null => String::new(),
            TypedValue::Boolean(b) => b.to_string(),
            TypedValue::Integer(i) => i.to_string(),
            TypedValue::Float(f) => format_float(*f),
            TypedValue::String(s) => s.clone(),
        }
    }

    /// Returns the name of the value's type.
    pub fn type_name(&self) -> &'static str {
        match self {
            TypedValue::Null => "null",
            TypedValue::Boolean(_) => "boolean",
            TypedValue::Integer(_) => "integer",
            TypedValue::Float(_) => "float",
            TypedValue::String(_) => "string",
        }
    }

    /// Returns `true` if the value is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, TypedValue::Null)
    }

    /// Returns the boolean, if this is a `Boolean`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TypedValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer, if this is an `Integer`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TypedValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float, if this is a `Float`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TypedValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the text, if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Whole floats keep one fractional digit so they read back as floats.
fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 {
        format!("{:.1}", f)
    } else {
        f.to_string()
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.stringify())
    }
}

impl Serialize for TypedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            TypedValue::Null => serializer.serialize_none(),
            TypedValue::Boolean(b) => serializer.serialize_bool(*b),
            TypedValue::Integer(i) => serializer.serialize_i64(*i),
            TypedValue::Float(f) => serializer.serialize_f64(*f),
            TypedValue::String(s) => serializer.serialize_str(s),
        }
    }
}

impl From<bool> for TypedValue {
    fn from(b: bool) -> Self {
        TypedValue::Boolean(b)
    }
}

impl From<i64> for TypedValue {
    fn from(i: i64) -> Self {
        TypedValue::Integer(i)
    }
}

impl From<i32> for TypedValue {
    fn from(i: i32) -> Self {
        TypedValue::Integer(i64::from(i))
    }
}

impl From<u32> for TypedValue {
    fn from(i: u32) -> Self {
        TypedValue::Integer(i64::from(i))
    }
}

impl From<f64> for TypedValue {
    fn from(f: f64) -> Self {
        TypedValue::Float(f)
    }
}

/// Strings convert literally; use `infer` to type a raw string.
impl From<String> for TypedValue {
    fn from(s: String) -> Self {
        TypedValue::String(s)
    }
}

impl From<&str> for TypedValue {
    fn from(s: &str) -> Self {
        TypedValue::String(s.to_string())
    }
}

impl<T: Into<TypedValue>> From<Option<T>> for TypedValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(TypedValue::Null, Into::into)
    }
}

/// The target of an explicit cast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CastKind {
    /// Decimal integer literal.
    Integer,
    /// Decimal float (or integer) literal.
    Float,
    /// Boolean, lenient: anything outside the true set is `false`.
    Boolean,
    /// The raw text.
    String,
    /// Comma (or whitespace) separated items.
    List,
    /// Same splitting as `List`, reported as a tuple.
    Tuple,
}

impl CastKind {
    /// Returns the lowercase name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            CastKind::Integer => "integer",
            CastKind::Float => "float",
            CastKind::Boolean => "boolean",
            CastKind::String => "string",
            CastKind::List => "list",
            CastKind::Tuple => "tuple",
        }
    }
}

impl fmt::Display for CastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CastKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "int" | "integer" => Ok(CastKind::Integer),
            "float" => Ok(CastKind::Float),
            "bool" | "boolean" => Ok(CastKind::Boolean),
            "str" | "string" => Ok(CastKind::String),
            "list" => Ok(CastKind::List),
            "tuple" => Ok(CastKind::Tuple),
            _ => Err(ConfigError::ParseError {
                message: format!("Unknown cast kind: {}", s),
                source: None,
            }),
        }
    }
}

/// The result of an explicit cast.
#[derive(Clone, Debug, PartialEq)]
pub enum CastValue {
    /// Result of `CastKind::Integer`.
    Integer(i64),
    /// Result of `CastKind::Float`.
    Float(f64),
    /// Result of `CastKind::Boolean`.
    Boolean(bool),
    /// Result of `CastKind::String`.
    String(String),
    /// Result of `CastKind::List`.
    List(Vec<String>),
    /// Result of `CastKind::Tuple`.
    Tuple(Vec<String>),
}

impl CastValue {
    /// Returns the kind this value was cast to.
    pub fn kind(&self) -> CastKind {
        match self {
            CastValue::Integer(_) => CastKind::Integer,
            CastValue::Float(_) => CastKind::Float,
            CastValue::Boolean(_) => CastKind::Boolean,
            CastValue::String(_) => CastKind::String,
            CastValue::List(_) => CastKind::List,
            CastValue::Tuple(_) => CastKind::Tuple,
        }
    }

    /// Returns the items of a `List` or `Tuple`.
    pub fn as_items(&self) -> Option<&[String]> {
        match self {
            CastValue::List(items) | CastValue::Tuple(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for CastValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CastValue::Integer(i) => write!(f, "{}", i),
            CastValue::Float(v) => write!(f, "{}", format_float(*v)),
            CastValue::Boolean(b) => write!(f, "{}", b),
            CastValue::String(s) => f.write_str(s),
            CastValue::List(items) | CastValue::Tuple(items) => f.write_str(&items.join(",")),
        }
    }
}
