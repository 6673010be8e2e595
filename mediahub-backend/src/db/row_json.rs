//! Row to JSON conversion for SQLite, plus the scalar helpers shared with
//! the Postgres decoder in `pg_value`
//!
//! Each column is converted according to the kind derived from its declared
//! type. When the stored value does not match the declared kind (SQLite is
//! dynamically typed) the storage class decides instead.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rusqlite::types::ValueRef;
use serde_json::{Number, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Boolean,
    Timestamp,
    Json,
    Integer,
    Real,
    Text,
    Untyped,
}

impl ColumnKind {
    pub fn from_decl_type(decl_type: &str) -> Self {
        let decl = decl_type.to_ascii_uppercase();
        let has = |needle: &str| decl.contains(needle);

        if has("BOOL") {
            Self::Boolean
        } else if has("TIME") || has("DATE") {
            Self::Timestamp
        } else if has("JSON") {
            Self::Json
        } else if has("INT") {
            Self::Integer
        } else if ["REAL", "FLOA", "DOUB", "NUM", "DEC"].iter().any(|n| has(n)) {
            Self::Real
        } else if has("CHAR") || has("CLOB") || has("TEXT") {
            Self::Text
        } else {
            Self::Untyped
        }
    }

    pub fn to_json(&self, value: ValueRef<'_>) -> Value {
        match (self, value) {
            (_, ValueRef::Null) => Value::Null,
            (Self::Boolean, ValueRef::Integer(i)) => Value::Bool(i != 0),
            (Self::Boolean, ValueRef::Text(bytes)) => {
                let text = String::from_utf8_lossy(bytes);
                let normalized = text.trim().to_ascii_lowercase();
                match normalized.as_str() {
                    "true" | "t" | "1" => Value::Bool(true),
                    "false" | "f" | "0" => Value::Bool(false),
                    _ => Value::String(text.into_owned()),
                }
            }
            (Self::Timestamp, ValueRef::Text(bytes)) => {
                let text = String::from_utf8_lossy(bytes);
                Value::String(normalize_timestamp(&text).unwrap_or_else(|| text.into_owned()))
            }
            (Self::Timestamp, ValueRef::Integer(secs)) => DateTime::from_timestamp(secs, 0)
                .map(|dt| Value::String(dt.to_rfc3339()))
                .unwrap_or_else(|| Value::from(secs)),
            (Self::Json, ValueRef::Text(bytes)) => {
                let text = String::from_utf8_lossy(bytes);
                serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text.into_owned()))
            }
            (_, other) => untyped_to_json(other),
        }
    }
}

/// Conversion by storage class alone
pub fn untyped_to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => float_to_json(f),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => bytes_to_json(bytes),
    }
}

/// Non-finite floats have no JSON form and become null
pub fn float_to_json(value: f64) -> Value {
    Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null)
}

pub fn bytes_to_json(bytes: &[u8]) -> Value {
    Value::String(STANDARD.encode(bytes))
}

/// Normalize a stored timestamp to ISO-8601, or None if it is not one
pub fn normalize_timestamp(raw: &str) -> Option<String> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.to_rfc3339());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"] {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Some(dt.to_rfc3339());
        }
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%Y-%m-%d").to_string())
}
