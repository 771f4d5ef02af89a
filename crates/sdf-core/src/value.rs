//! Helpers over the decoded document value (`serde_yaml::Value`)

use serde_yaml::{Mapping, Value};

use crate::error::{Result, SdfError};

/// Human-readable name of a value's shape, for error messages
pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(n) if n.is_f64() => "a float",
        Value::Number(_) => "an integer",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Canonical string form of a scalar.
///
/// Integral floats keep one decimal place, so a YAML `1.0` compares equal
/// to the string `"1.0"`.
pub fn canonical_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                let f = n.as_f64().unwrap_or(f64::NAN);
                if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e16 {
                    format!("{:.1}", f)
                } else {
                    format!("{}", f)
                }
            }
        }
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => {
            serde_yaml::to_string(value)
                .map(|s| s.trim_end().to_string())
                .unwrap_or_default()
        }
    }
}

/// Mapping keys must be strings
pub(crate) fn key_str<'a>(key: &'a Value, scope: &'static str) -> Result<&'a str> {
    key.as_str().ok_or_else(|| SdfError::InvalidKey {
        scope,
        key: canonical_string(key),
    })
}

pub(crate) fn expect_mapping<'a>(value: &'a Value, field: &str) -> Result<&'a Mapping> {
    value
        .as_mapping()
        .ok_or_else(|| SdfError::wrong_type(field, "a mapping", value))
}

/// Optional mapping: absent or null means empty
pub(crate) fn mapping_or_empty(value: Option<&Value>, field: &str) -> Result<Mapping> {
    match value {
        None | Some(Value::Null) => Ok(Mapping::new()),
        Some(v) => expect_mapping(v, field).cloned(),
    }
}

pub(crate) fn expect_sequence<'a>(value: &'a Value, field: &str) -> Result<&'a [Value]> {
    value
        .as_sequence()
        .map(Vec::as_slice)
        .ok_or_else(|| SdfError::wrong_type(field, "a sequence", value))
}

pub(crate) fn optional_i64(value: Option<&Value>, field: &str) -> Result<i64> {
    match value {
        None => Ok(0),
        Some(v) => v
            .as_i64()
            .ok_or_else(|| SdfError::wrong_type(field, "an integer", v)),
    }
}

pub(crate) fn optional_str<'a>(value: Option<&'a Value>, field: &str) -> Result<Option<&'a str>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(v) => Err(SdfError::wrong_type(field, "a string", v)),
    }
}
