//! Postgres column values decoded straight to JSON
//!
//! `PgJson` accepts every column type. Native types get an explicit rule;
//! anything else (enums, citext, domains) falls back to its binary form,
//! which is UTF-8 text for text-like types and base64 otherwise.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::Value;
use std::error::Error;
use tokio_postgres::types::{FromSql, Type};

use crate::db::row_json::{bytes_to_json, float_to_json};

type DecodeError = Box<dyn Error + Sync + Send>;

#[derive(Debug, Clone, PartialEq)]
pub struct PgJson(pub Value);

impl<'a> FromSql<'a> for PgJson {
    fn from_sql(ty: &Type, raw: &'a [u8]) -> Result<Self, DecodeError> {
        let value = match *ty {
            Type::BOOL => Value::Bool(bool::from_sql(ty, raw)?),
            Type::INT2 => Value::from(i16::from_sql(ty, raw)?),
            Type::INT4 => Value::from(i32::from_sql(ty, raw)?),
            Type::INT8 => Value::from(i64::from_sql(ty, raw)?),
            Type::OID => Value::from(u32::from_sql(ty, raw)?),
            Type::FLOAT4 => float_to_json(f32::from_sql(ty, raw)? as f64),
            Type::FLOAT8 => float_to_json(f64::from_sql(ty, raw)?),
            // Kept as a string so no precision is lost
            Type::NUMERIC => Value::String(decode_numeric(raw)?),
            Type::TIMESTAMPTZ => Value::String(DateTime::<Utc>::from_sql(ty, raw)?.to_rfc3339()),
            Type::TIMESTAMP => Value::String(
                NaiveDateTime::from_sql(ty, raw)?
                    .format("%Y-%m-%dT%H:%M:%S%.f")
                    .to_string(),
            ),
            Type::DATE => {
                Value::String(NaiveDate::from_sql(ty, raw)?.format("%Y-%m-%d").to_string())
            }
            Type::TIME => {
                Value::String(NaiveTime::from_sql(ty, raw)?.format("%H:%M:%S%.f").to_string())
            }
            Type::JSON | Type::JSONB => Value::from_sql(ty, raw)?,
            Type::UUID => Value::String(uuid::Uuid::from_sql(ty, raw)?.to_string()),
            Type::BYTEA => bytes_to_json(raw),
            Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => {
                Value::String(String::from_sql(ty, raw)?)
            }
            Type::TEXT_ARRAY | Type::VARCHAR_ARRAY => {
                Value::from(Vec::<Option<String>>::from_sql(ty, raw)?)
            }
            Type::INT4_ARRAY => Value::from(Vec::<Option<i32>>::from_sql(ty, raw)?),
            Type::INT8_ARRAY => Value::from(Vec::<Option<i64>>::from_sql(ty, raw)?),
            _ => match std::str::from_utf8(raw) {
                Ok(text) => Value::String(text.to_string()),
                Err(_) => bytes_to_json(raw),
            },
        };
        Ok(Self(value))
    }

    fn from_sql_null(_: &Type) -> Result<Self, DecodeError> {
        Ok(Self(Value::Null))
    }

    fn accepts(_: &Type) -> bool {
        true
    }
}

/// Render the binary NUMERIC format (base-10000 digit groups) as decimal text
pub fn decode_numeric(raw: &[u8]) -> Result<String, DecodeError> {
    if raw.len() < 8 {
        return Err("numeric value too short".into());
    }
    let read_u16 = |at: usize| u16::from_be_bytes([raw[at], raw[at + 1]]);

    let ndigits = read_u16(0) as usize;
    let weight = read_u16(2) as i16 as i32;
    let sign = read_u16(4);
    let dscale = read_u16(6) as usize;

    if raw.len() != 8 + ndigits * 2 {
        return Err("numeric digit count does not match length".into());
    }
    let digits: Vec<u16> = (0..ndigits).map(|i| read_u16(8 + i * 2)).collect();
    let digit_at = |idx: i32| {
        if idx >= 0 {
            digits.get(idx as usize).copied().unwrap_or(0)
        } else {
            0
        }
    };

    let prefix = match sign {
        0x0000 => "",
        0x4000 => "-",
        0xC000 => return Ok("NaN".to_string()),
        0xD000 => return Ok("Infinity".to_string()),
        0xF000 => return Ok("-Infinity".to_string()),
        other => return Err(format!("invalid numeric sign {other:#x}").into()),
    };

    let mut integer = String::new();
    for idx in 0..=weight {
        if integer.is_empty() {
            integer.push_str(&digit_at(idx).to_string());
        } else {
            integer.push_str(&format!("{:04}", digit_at(idx)));
        }
    }
    if integer.is_empty() {
        integer.push('0');
    }

    let mut fraction = String::new();
    let mut idx = weight + 1;
    while fraction.len() < dscale {
        fraction.push_str(&format!("{:04}", digit_at(idx)));
        idx += 1;
    }
    fraction.truncate(dscale);

    if fraction.is_empty() {
        Ok(format!("{prefix}{integer}"))
    } else {
        Ok(format!("{prefix}{integer}.{fraction}"))
    }
}
