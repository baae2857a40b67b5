use crate::convert::{conversions_for_fields, make_row};
use crate::error::Result;

use super::cell_value::CellValue;
use super::field::Field;
use super::reply::RawResult;

/// One materialized row.
pub type Row = Vec<CellValue>;

/// A fully materialized (buffered) result set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    /// Ordered column descriptors.
    pub fields: Vec<Field>,

    /// Converted rows.
    pub rows: Vec<Row>,

    /// Rows affected, for DML.
    pub rows_affected: u64,

    /// Last insert id, for auto-increment inserts.
    pub last_insert_id: u64,
}

impl ResultSet {
    /// Materialize a raw wire result: resolve a conversion per field
    /// and convert every row.
    pub fn from_raw(raw: RawResult) -> Result<Self> {
        let conversions = conversions_for_fields(&raw.fields);
        let mut rows = Vec::with_capacity(raw.rows.len());
        for raw_row in &raw.rows {
            rows.push(make_row(raw_row, &conversions)?);
        }
        Ok(Self {
            fields: raw.fields,
            rows,
            rows_affected: raw.rows_affected,
            last_insert_id: raw.insert_id,
        })
    }

    /// Column names, in result order.
    pub fn column_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Number of materialized rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the result carries no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
