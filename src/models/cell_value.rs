use bytes::Bytes;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use rust_decimal::Decimal;

/// A native column value produced by row materialization.
///
/// Columns whose wire type has no registered conversion come through
/// as [`CellValue::Bytes`] holding the raw wire value unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// SQL NULL.
    Null,
    /// Signed integer column.
    Int(i64),
    /// Unsigned integer column (year).
    UInt(u64),
    /// Floating point column.
    Float(f64),
    /// Fixed-point decimal column.
    Decimal(Decimal),
    /// Timestamp/datetime column.
    DateTime(NaiveDateTime),
    /// Date column.
    Date(NaiveDate),
    /// Time column: a signed interval, may exceed 24 hours.
    Time(TimeDelta),
    /// Raw wire value for unconverted columns.
    Bytes(Bytes),
}

impl CellValue {
    /// Whether the value is SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Integer value, if this is an integer column.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Int(v) => Some(*v),
            CellValue::UInt(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Float value, widening integers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Int(v) => Some(*v as f64),
            CellValue::UInt(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Raw bytes, for unconverted columns.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            CellValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// UTF-8 view of an unconverted column.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Bytes(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    /// Datetime value, if this is a temporal column.
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::DateTime(v) => Some(*v),
            _ => None,
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Null => write!(f, "NULL"),
            CellValue::Int(v) => write!(f, "{}", v),
            CellValue::UInt(v) => write!(f, "{}", v),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Decimal(v) => write!(f, "{}", v),
            CellValue::DateTime(v) => write!(f, "{}", v),
            CellValue::Date(v) => write!(f, "{}", v),
            CellValue::Time(v) => write!(f, "{}", v),
            CellValue::Bytes(b) => match std::str::from_utf8(b) {
                Ok(s) => write!(f, "{}", s),
                Err(_) => write!(f, "<{} bytes>", b.len()),
            },
        }
    }
}
