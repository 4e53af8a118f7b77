// SPDX-License-Identifier: MIT OR Apache-2.0

//! Automatic type inference and explicit casts for raw string values.
//!
//! Inference applies a fixed rule cascade, first match wins:
//!
//! 1. `""`, `none`, `null` (any case) → `Null`
//! 2. `true`, `yes`, `on`, `1` (any case) → `Boolean(true)`
//! 3. `false`, `no`, `off`, `0` (any case) → `Boolean(false)`
//! 4. `-?[0-9]+` → `Integer`
//! 5. `-?[0-9]+\.[0-9]+` → `Float`
//! 6. anything else → `String`, unmodified
//!
//! The boolean rules run before the numeric ones, so `"0"` and `"1"` are
//! booleans, never integers.

use crate::domain::errors::{ConfigError, Result};
use crate::domain::typed_value::{CastKind, CastValue, TypedValue};

const NULL_TOKENS: [&str; 2] = ["none", "null"];
const TRUE_TOKENS: [&str; 4] = ["true", "yes", "on", "1"];
const FALSE_TOKENS: [&str; 4] = ["false", "no", "off", "0"];

/// Infers the type of a raw string value.
///
/// This never fails. Integer literals too large for `i64` are returned as
/// strings.
///
/// # Examples
///
/// ```
/// use envdot::domain::inference::infer;
/// use envdot::domain::TypedValue;
///
/// assert_eq!(infer("8080"), TypedValue::Integer(8080));
/// assert_eq!(infer("0"), TypedValue::Boolean(false));
/// assert_eq!(infer("30.5"), TypedValue::Float(30.5));
/// assert_eq!(infer(""), TypedValue::Null);
/// assert_eq!(infer("1.0.0"), TypedValue::String("1.0.0".to_string()));
/// ```
pub fn infer(raw: &str) -> TypedValue {
    if raw.is_empty() || matches_token(raw, &NULL_TOKENS) {
        return TypedValue::Null;
    }
    if let Some(b) = parse_bool_token(raw) {
        return TypedValue::Boolean(b);
    }
    if is_integer_literal(raw) {
        if let Ok(i) = raw.parse::<i64>() {
            return TypedValue::Integer(i);
        }
    } else if is_float_literal(raw) {
        if let Ok(f) = raw.parse::<f64>() {
            return TypedValue::Float(f);
        }
    }
    TypedValue::String(raw.to_string())
}

/// Converts a raw string to the requested kind.
///
/// `key` is only used to describe a failure. Boolean casts are lenient and
/// never fail: anything outside the true set is `false`. List and tuple casts
/// split on commas when the value contains one and on whitespace otherwise,
/// trimming items and dropping empty ones.
///
/// # Examples
///
/// ```
/// use envdot::domain::inference::cast;
/// use envdot::domain::{CastKind, CastValue};
///
/// let hosts = cast("ALLOWED_HOST", "a.com, b.com", CastKind::List).unwrap();
/// assert_eq!(hosts, CastValue::List(vec!["a.com".into(), "b.com".into()]));
///
/// assert!(cast("APP_NAME", "MyApplication", CastKind::Integer).is_err());
/// ```
pub fn cast(key: &str, raw: &str, kind: CastKind) -> Result<CastValue> {
    match kind {
        CastKind::Integer => {
            if !is_integer_literal(raw) {
                return Err(ConfigError::conversion(key, raw, kind));
            }
            raw.parse::<i64>()
                .map(CastValue::Integer)
                .map_err(|_| ConfigError::conversion(key, raw, kind))
        }
        CastKind::Float => {
            if !is_integer_literal(raw) && !is_float_literal(raw) {
                return Err(ConfigError::conversion(key, raw, kind));
            }
            raw.parse::<f64>()
                .map(CastValue::Float)
                .map_err(|_| ConfigError::conversion(key, raw, kind))
        }
        CastKind::Boolean => Ok(CastValue::Boolean(matches_token(raw, &TRUE_TOKENS))),
        CastKind::String => Ok(CastValue::String(raw.to_string())),
        CastKind::List => Ok(CastValue::List(split_items(raw))),
        CastKind::Tuple => Ok(CastValue::Tuple(split_items(raw))),
    }
}

/// Returns the boolean a token stands for, if it is in either boolean set.
pub fn parse_bool_token(raw: &str) -> Option<bool> {
    if matches_token(raw, &TRUE_TOKENS) {
        Some(true)
    } else if matches_token(raw, &FALSE_TOKENS) {
        Some(false)
    } else {
        None
    }
}

/// `-?[0-9]+`
pub fn is_integer_literal(raw: &str) -> bool {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// `-?[0-9]+\.[0-9]+`
pub fn is_float_literal(raw: &str) -> bool {
    let body = raw.strip_prefix('-').unwrap_or(raw);
    match body.split_once('.') {
        Some((whole, frac)) => is_digits(whole) && is_digits(frac),
        None => false,
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn matches_token(raw: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|t| raw.eq_ignore_ascii_case(t))
}

fn split_items(raw: &str) -> Vec<String> {
    let pieces: Vec<&str> = if raw.contains(',') {
        raw.split(',').collect()
    } else {
        raw.split_whitespace().collect()
    };
    pieces
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string(s: &str) -> TypedValue {
        TypedValue::String(s.to_string())
    }

    #[test]
    fn test_infer_true_variants() {
        for val in ["true", "True", "TRUE", "yes", "Yes", "on", "ON", "1"] {
            assert_eq!(infer(val), TypedValue::Boolean(true), "Failed for value: {}", val);
        }
    }

    #[test]
    fn test_infer_false_variants() {
        for val in ["false", "False", "FALSE", "no", "NO", "off", "Off", "0"] {
            assert_eq!(infer(val), TypedValue::Boolean(false), "Failed for value: {}", val);
        }
    }

    #[test]
    fn test_infer_zero_is_boolean_not_integer() {
        assert_eq!(infer("0"), TypedValue::Boolean(false));
        assert_ne!(infer("0"), TypedValue::Integer(0));
    }

    #[test]
    fn test_infer_null_variants() {
        for val in ["", "none", "None", "NONE", "null", "NULL", "Null"] {
            assert_eq!(infer(val), TypedValue::Null, "Failed for value: {:?}", val);
        }
    }

    #[test]
    fn test_infer_integers() {
        assert_eq!(infer("42"), TypedValue::Integer(42));
        assert_eq!(infer("-7"), TypedValue::Integer(-7));
        assert_eq!(infer("5432"), TypedValue::Integer(5432));
        assert_eq!(infer("00"), TypedValue::Integer(0));
        assert_eq!(infer("-1"), TypedValue::Integer(-1));
    }

    #[test]
    fn test_infer_floats() {
        assert_eq!(infer("30.5"), TypedValue::Float(30.5));
        assert_eq!(infer("-3.14"), TypedValue::Float(-3.14));
        assert_eq!(infer("0.0"), TypedValue::Float(0.0));
    }

    #[test]
    fn test_infer_rejects_other_float_spellings() {
        assert_eq!(infer("1e5"), string("1e5"));
        assert_eq!(infer("1."), string("1."));
        assert_eq!(infer(".5"), string(".5"));
        assert_eq!(infer("+5"), string("+5"));
        assert_eq!(infer("1,5"), string("1,5"));
        assert_eq!(infer("nan"), string("nan"));
        assert_eq!(infer("inf"), string("inf"));
    }

    #[test]
    fn test_infer_strings() {
        assert_eq!(infer("hello"), string("hello"));
        assert_eq!(infer("hello world"), string("hello world"));
        assert_eq!(infer("abc123"), string("abc123"));
        assert_eq!(infer("1.0.0"), string("1.0.0"));
        assert_eq!(infer("-"), string("-"));
    }

    #[test]
    fn test_infer_does_not_trim() {
        assert_eq!(infer(" 42"), string(" 42"));
        assert_eq!(infer("  value  "), string("  value  "));
    }

    #[test]
    fn test_infer_integer_overflow_is_string() {
        let big = "99999999999999999999";
        assert_eq!(infer(big), string(big));
    }

    #[test]
    fn test_cast_integer() {
        assert_eq!(cast("K", "123", CastKind::Integer).unwrap(), CastValue::Integer(123));
        assert_eq!(cast("K", "0", CastKind::Integer).unwrap(), CastValue::Integer(0));
        assert_eq!(cast("K", "-9", CastKind::Integer).unwrap(), CastValue::Integer(-9));
    }

    #[test]
    fn test_cast_integer_failure_carries_context() {
        let err = cast("APP_NAME", "MyApplication", CastKind::Integer).unwrap_err();
        match err {
            ConfigError::TypeConversionError { key, value, kind } => {
                assert_eq!(key, "APP_NAME");
                assert_eq!(value, "MyApplication");
                assert_eq!(kind, CastKind::Integer);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_cast_integer_rejects_float_and_overflow() {
        assert!(cast("K", "3.14", CastKind::Integer).is_err());
        assert!(cast("K", "99999999999999999999", CastKind::Integer).is_err());
        assert!(cast("K", "", CastKind::Integer).is_err());
    }

    #[test]
    fn test_cast_float() {
        assert_eq!(cast("K", "0.75", CastKind::Float).unwrap(), CastValue::Float(0.75));
        assert_eq!(cast("K", "42", CastKind::Float).unwrap(), CastValue::Float(42.0));
        assert!(cast("K", "1e3", CastKind::Float).is_err());
        assert!(cast("K", "abc", CastKind::Float).is_err());
    }

    #[test]
    fn test_cast_boolean_is_lenient() {
        assert_eq!(cast("K", "yes", CastKind::Boolean).unwrap(), CastValue::Boolean(true));
        assert_eq!(cast("K", "ON", CastKind::Boolean).unwrap(), CastValue::Boolean(true));
        assert_eq!(cast("K", "off", CastKind::Boolean).unwrap(), CastValue::Boolean(false));
        assert_eq!(cast("K", "maybe", CastKind::Boolean).unwrap(), CastValue::Boolean(false));
    }

    #[test]
    fn test_cast_string() {
        assert_eq!(
            cast("K", "123", CastKind::String).unwrap(),
            CastValue::String("123".to_string())
        );
    }

    #[test]
    fn test_cast_list_prefers_commas() {
        let value = cast("ALLOWED_HOST", "*,127.0.0.1 192.168.10.2,example.com", CastKind::List)
            .unwrap();
        assert_eq!(
            value,
            CastValue::List(vec![
                "*".to_string(),
                "127.0.0.1 192.168.10.2".to_string(),
                "example.com".to_string(),
            ])
        );
    }

    #[test]
    fn test_cast_list_splits_whitespace_without_commas() {
        let value = cast("K", "a  b\tc", CastKind::List).unwrap();
        assert_eq!(
            value,
            CastValue::List(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn test_cast_list_trims_and_drops_empty_items() {
        let value = cast("K", "localhost, 127.0.0.1, , example.com", CastKind::List).unwrap();
        assert_eq!(
            value,
            CastValue::List(vec![
                "localhost".to_string(),
                "127.0.0.1".to_string(),
                "example.com".to_string(),
            ])
        );
    }

    #[test]
    fn test_cast_empty_list() {
        assert_eq!(cast("K", "", CastKind::List).unwrap(), CastValue::List(vec![]));
        assert_eq!(cast("K", "", CastKind::Tuple).unwrap(), CastValue::Tuple(vec![]));
    }

    #[test]
    fn test_cast_tuple_elements_stay_strings() {
        let value = cast("K", "1,2", CastKind::Tuple).unwrap();
        assert_eq!(value, CastValue::Tuple(vec!["1".to_string(), "2".to_string()]));
    }

    #[test]
    fn test_literal_grammars() {
        assert!(is_integer_literal("12"));
        assert!(is_integer_literal("-12"));
        assert!(!is_integer_literal("-"));
        assert!(!is_integer_literal("1-2"));
        assert!(is_float_literal("1.5"));
        assert!(is_float_literal("-0.5"));
        assert!(!is_float_literal("1.5.1"));
        assert!(!is_float_literal("-.5"));
    }

    #[test]
    fn test_parse_bool_token() {
        assert_eq!(parse_bool_token("Yes"), Some(true));
        assert_eq!(parse_bool_token("0"), Some(false));
        assert_eq!(parse_bool_token("2"), None);
    }
}
