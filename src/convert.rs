//! Wire-value conversion.
//!
//! Maps wire field type tags to native-value conversion functions and
//! materializes raw rows. Tags without a registered conversion pass
//! the raw bytes through unchanged; SQL NULL cells become
//! [`CellValue::Null`] without consulting any conversion.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use rust_decimal::Decimal;

use crate::error::{LatticeLinkError, Result};
use crate::models::{CellValue, Field, FieldType, RawRow, Row};

/// A per-column conversion from raw wire bytes to a native value.
pub type Conversion = fn(&[u8]) -> Result<CellValue>;

/// Conversion registered for a field type tag, or `None` for
/// pass-through.
pub fn conversion_for(field_type: FieldType) -> Option<Conversion> {
    use FieldType::*;
    match field_type {
        Decimal | NewDecimal => Some(convert_decimal),
        Tiny | Short | Long | Int24 | LongLong => Some(convert_int),
        Year => Some(convert_uint),
        Float | Double => Some(convert_float),
        Timestamp | DateTime => Some(convert_datetime),
        Date | NewDate => Some(convert_date),
        Time => Some(convert_time),
        _ => None,
    }
}

/// Resolve a conversion per field, in field order.
pub fn conversions_for_fields(fields: &[Field]) -> Vec<Option<Conversion>> {
    fields
        .iter()
        .map(|field| conversion_for(field.field_type))
        .collect()
}

/// Materialize one raw row: NULL cells stay NULL, converted columns go
/// through their conversion, everything else passes through as bytes.
pub fn make_row(raw_row: &RawRow, conversions: &[Option<Conversion>]) -> Result<Row> {
    let mut row = Vec::with_capacity(raw_row.len());
    for (cell, conversion) in raw_row.iter().zip(conversions.iter()) {
        let value = match (cell, conversion) {
            (None, _) => CellValue::Null,
            (Some(bytes), Some(conversion)) => conversion(bytes)?,
            (Some(bytes), None) => CellValue::Bytes(bytes.clone()),
        };
        row.push(value);
    }
    Ok(row)
}

fn text(raw: &[u8]) -> Result<&str> {
    std::str::from_utf8(raw)
        .map_err(|_| LatticeLinkError::interface("wire value is not valid utf-8"))
}

fn convert_int(raw: &[u8]) -> Result<CellValue> {
    let s = text(raw)?;
    let v = s
        .parse::<i64>()
        .map_err(|e| LatticeLinkError::interface(format!("bad integer '{}': {}", s, e)))?;
    Ok(CellValue::Int(v))
}

fn convert_uint(raw: &[u8]) -> Result<CellValue> {
    let s = text(raw)?;
    let v = s
        .parse::<u64>()
        .map_err(|e| LatticeLinkError::interface(format!("bad unsigned integer '{}': {}", s, e)))?;
    Ok(CellValue::UInt(v))
}

fn convert_float(raw: &[u8]) -> Result<CellValue> {
    let s = text(raw)?;
    let v = s
        .parse::<f64>()
        .map_err(|e| LatticeLinkError::interface(format!("bad float '{}': {}", s, e)))?;
    Ok(CellValue::Float(v))
}

fn convert_decimal(raw: &[u8]) -> Result<CellValue> {
    let s = text(raw)?;
    let v = Decimal::from_str(s)
        .map_err(|e| LatticeLinkError::interface(format!("bad decimal '{}': {}", s, e)))?;
    Ok(CellValue::Decimal(v))
}

fn convert_datetime(raw: &[u8]) -> Result<CellValue> {
    let s = text(raw)?;
    // The zero datetime stands in for NULL on columns declared NOT NULL.
    if s.starts_with("0000-00-00") {
        return Ok(CellValue::Null);
    }
    let v = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .map_err(|e| LatticeLinkError::interface(format!("bad datetime '{}': {}", s, e)))?;
    Ok(CellValue::DateTime(v))
}

fn convert_date(raw: &[u8]) -> Result<CellValue> {
    let s = text(raw)?;
    if s == "0000-00-00" {
        return Ok(CellValue::Null);
    }
    let v = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| LatticeLinkError::interface(format!("bad date '{}': {}", s, e)))?;
    Ok(CellValue::Date(v))
}

/// TIME columns are signed intervals in `[-]H+:MM:SS[.ffffff]` form
/// and may exceed 24 hours, so they do not fit a time-of-day type.
fn convert_time(raw: &[u8]) -> Result<CellValue> {
    let s = text(raw)?;
    let bad = |_: std::num::ParseIntError| {
        LatticeLinkError::interface(format!("bad time '{}'", s))
    };

    let (negative, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let (body, micros) = match body.split_once('.') {
        Some((body, frac)) => {
            if frac.is_empty() || frac.len() > 6 || !frac.bytes().all(|b| b.is_ascii_digit()) {
                return Err(LatticeLinkError::interface(format!("bad time '{}'", s)));
            }
            // right-pad to microseconds: ".5" is 500000us
            let scale = 10u64.pow(6 - frac.len() as u32);
            (body, frac.parse::<u64>().map_err(bad)? * scale)
        }
        None => (body, 0),
    };
    let mut parts = body.split(':');
    let (hours, minutes, seconds) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(h), Some(m), Some(sec), None) => (
            h.parse::<i64>().map_err(bad)?,
            m.parse::<i64>().map_err(bad)?,
            sec.parse::<i64>().map_err(bad)?,
        ),
        _ => return Err(LatticeLinkError::interface(format!("bad time '{}'", s))),
    };
    if minutes >= 60 || seconds >= 60 {
        return Err(LatticeLinkError::interface(format!("bad time '{}'", s)));
    }

    let magnitude = TimeDelta::seconds(hours * 3600 + minutes * 60 + seconds)
        + TimeDelta::microseconds(micros as i64);
    let v = if negative { -magnitude } else { magnitude };
    Ok(CellValue::Time(v))
}
