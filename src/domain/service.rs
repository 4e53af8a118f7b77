// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration service trait definition.
//!
//! This module defines the `ConfigurationService` trait, the typed accessor
//! interface over a flat namespace. It provides methods for retrieving values,
//! requesting explicit casts, checking for key existence, and reloading.

use crate::domain::errors::{ConfigError, Result};
use crate::domain::inference::cast;
use crate::domain::typed_value::{CastKind, CastValue, TypedValue};

/// The main configuration service trait.
///
/// Lookup keys are given in source form (`"database.host"`) or flat form
/// (`"DATABASE_HOST"`); implementations normalize them before lookup. Only
/// `get`, `has` and `reload` must be provided. Explicit casts run on the text
/// returned by `get_raw`.
///
/// # Examples
///
/// ```rust
/// use envdot::domain::{ConfigError, ConfigurationService, FlatKey, Result, TypedValue};
///
/// struct Fixed;
///
/// impl ConfigurationService for Fixed {
///     fn get(&self, key: &str) -> Result<TypedValue> {
///         match FlatKey::normalize(key).as_str() {
///             "PORT" => Ok(TypedValue::Integer(8080)),
///             other => Err(ConfigError::ConfigKeyNotFound { key: other.to_string() }),
///         }
///     }
///
///     fn has(&self, key: &str) -> bool {
///         self.get(key).is_ok()
///     }
///
///     fn reload(&mut self) -> Result<()> {
///         Ok(())
///     }
/// }
///
/// let service = Fixed;
/// assert_eq!(service.get_int("port").unwrap(), 8080);
/// assert!(!service.has("host"));
/// ```
pub trait ConfigurationService {
    /// Retrieves the typed value stored under `key`.
    ///
    /// # Returns
    ///
    /// * `Ok(TypedValue)` - The stored value
    /// * `Err(ConfigError::ConfigKeyNotFound)` - No value is stored under the key
    fn get(&self, key: &str) -> Result<TypedValue>;

    /// Checks whether a value is stored under `key`.
    fn has(&self, key: &str) -> bool;

    /// Rebuilds the namespace from the registered sources.
    fn reload(&mut self) -> Result<()>;

    /// Retrieves a value, or `default` when the key is absent.
    fn get_or_default(&self, key: &str, default: TypedValue) -> TypedValue {
        self.get(key).unwrap_or(default)
    }

    /// Retrieves the text explicit casts operate on.
    ///
    /// The default is the stringified stored value. Implementations that keep
    /// the source text of inferred values return that instead, so `"1"` casts
    /// to the integer `1` even though it is stored as `true`.
    fn get_raw(&self, key: &str) -> Result<String> {
        self.get(key).map(|value| value.stringify())
    }

    /// Retrieves a value converted to `kind`.
    ///
    /// # Returns
    ///
    /// * `Ok(CastValue)` - The converted value
    /// * `Err(ConfigError::ConfigKeyNotFound)` - The key is absent
    /// * `Err(ConfigError::TypeConversionError)` - The value is not a literal of `kind`
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use envdot::domain::{ConfigError, ConfigurationService, CastKind, CastValue, Result, TypedValue};
    /// # struct Hosts;
    /// # impl ConfigurationService for Hosts {
    /// #     fn get(&self, _key: &str) -> Result<TypedValue> {
    /// #         Ok(TypedValue::from("*,127.0.0.1 192.168.10.2,example.com"))
    /// #     }
    /// #     fn has(&self, _key: &str) -> bool { true }
    /// #     fn reload(&mut self) -> Result<()> { Ok(()) }
    /// # }
    /// let hosts = Hosts.get_as("ALLOWED_HOST", CastKind::List).unwrap();
    /// assert_eq!(hosts.as_items().map(|items| items.len()), Some(3));
    /// ```
    fn get_as(&self, key: &str, kind: CastKind) -> Result<CastValue> {
        let raw = self.get_raw(key)?;
        cast(key, &raw, kind)
    }

    /// Retrieves a value as an integer.
    fn get_int(&self, key: &str) -> Result<i64> {
        match self.get_as(key, CastKind::Integer)? {
            CastValue::Integer(i) => Ok(i),
            other => Err(ConfigError::conversion(key, other.to_string(), CastKind::Integer)),
        }
    }

    /// Retrieves a value as a float.
    fn get_float(&self, key: &str) -> Result<f64> {
        match self.get_as(key, CastKind::Float)? {
            CastValue::Float(f) => Ok(f),
            other => Err(ConfigError::conversion(key, other.to_string(), CastKind::Float)),
        }
    }

    /// Retrieves a value as a boolean. Anything outside the true set is `false`.
    fn get_bool(&self, key: &str) -> Result<bool> {
        match self.get_as(key, CastKind::Boolean)? {
            CastValue::Boolean(b) => Ok(b),
            other => Err(ConfigError::conversion(key, other.to_string(), CastKind::Boolean)),
        }
    }

    /// Retrieves a value as its stringified text.
    fn get_string(&self, key: &str) -> Result<String> {
        self.get(key).map(|value| value.stringify())
    }

    /// Retrieves a value split into list items.
    fn get_list(&self, key: &str) -> Result<Vec<String>> {
        match self.get_as(key, CastKind::List)? {
            CastValue::List(items) => Ok(items),
            other => Err(ConfigError::conversion(key, other.to_string(), CastKind::List)),
        }
    }
}
