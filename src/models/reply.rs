use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::field::Field;
use super::session::Session;

/// One raw row as it arrives off the wire: a cell per field, `None`
/// for SQL NULL, bytes otherwise.
pub type RawRow = Vec<Option<Bytes>>;

/// Unconverted result payload inside a reply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawResult {
    /// Ordered column descriptors.
    #[serde(default)]
    pub fields: Vec<Field>,

    /// Ordered raw rows.
    #[serde(default)]
    pub rows: Vec<RawRow>,

    /// Rows affected, for DML.
    #[serde(default)]
    pub rows_affected: u64,

    /// Last insert id, for auto-increment inserts.
    #[serde(default)]
    pub insert_id: u64,
}

/// Reply envelope for single-statement calls and for each streamed
/// frame. Every key is optional: a frame may carry rows, a session
/// update, an application error, or nothing at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GateReply {
    /// Application-level error, raised as a classified error when
    /// present and non-empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Updated session; replaces the connection's session wholesale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,

    /// Result payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<RawResult>,
}

/// Reply envelope for batch calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReply {
    /// Application-level error covering the batch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Updated session; replaces the connection's session wholesale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,

    /// One result payload per statement, in statement order.
    #[serde(default)]
    pub results: Vec<RawResult>,
}
