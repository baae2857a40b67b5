//! Buffered DB-API style cursor.
//!
//! A convenience layer over [`GateConnection::execute`] for callers
//! that want the familiar execute/fetch shape: results are buffered in
//! the cursor and handed out with `fetchone`/`fetchmany`/`fetchall`.
//!
//! [`GateConnection::execute`]: crate::connection::GateConnection::execute

use crate::connection::GateConnection;
use crate::error::Result;
use crate::models::{BindVars, Field, Row, TargetRole};
use crate::transport::GateTransport;

/// Buffered cursor bound to a connection and a routing target.
pub struct Cursor<'c, T: GateTransport> {
    conn: &'c mut GateConnection<T>,
    target_role: TargetRole,
    fields: Vec<Field>,
    rows: Vec<Row>,
    index: usize,
    rowcount: u64,
    lastrowid: u64,
}

impl<'c, T: GateTransport> Cursor<'c, T> {
    pub(crate) fn new(conn: &'c mut GateConnection<T>, target_role: TargetRole) -> Self {
        Self {
            conn,
            target_role,
            fields: Vec::new(),
            rows: Vec::new(),
            index: 0,
            rowcount: 0,
            lastrowid: 0,
        }
    }

    /// Execute a statement and buffer its result, returning the
    /// affected-row count.
    ///
    /// The transaction-control keywords `begin`, `commit` and
    /// `rollback` are routed to the connection's session operations
    /// instead of being sent as queries.
    pub async fn execute(&mut self, query: &str, bind_vars: &BindVars) -> Result<u64> {
        self.clear();
        match query.trim().to_ascii_lowercase().as_str() {
            "begin" => {
                self.conn.begin().await?;
                return Ok(0);
            }
            "commit" => {
                self.conn.commit().await?;
                return Ok(0);
            }
            "rollback" => {
                self.conn.rollback().await?;
                return Ok(0);
            }
            _ => {}
        }
        let result = self
            .conn
            .execute(query, bind_vars, self.target_role, false)
            .await?;
        self.fields = result.fields;
        self.rows = result.rows;
        self.rowcount = result.rows_affected;
        self.lastrowid = result.last_insert_id;
        Ok(self.rowcount)
    }

    /// Next buffered row, advancing the cursor.
    pub fn fetchone(&mut self) -> Option<Row> {
        let row = self.rows.get(self.index).cloned();
        if row.is_some() {
            self.index += 1;
        }
        row
    }

    /// Up to `size` rows, advancing the cursor.
    pub fn fetchmany(&mut self, size: usize) -> Vec<Row> {
        let end = (self.index + size).min(self.rows.len());
        let rows = self.rows[self.index..end].to_vec();
        self.index = end;
        rows
    }

    /// All remaining rows, advancing the cursor to the end.
    pub fn fetchall(&mut self) -> Vec<Row> {
        let rows = self.rows[self.index..].to_vec();
        self.index = self.rows.len();
        rows
    }

    /// Column descriptors of the current result.
    pub fn description(&self) -> &[Field] {
        &self.fields
    }

    /// Affected-row count of the current result.
    pub fn rowcount(&self) -> u64 {
        self.rowcount
    }

    /// Last insert id of the current result.
    pub fn lastrowid(&self) -> u64 {
        self.lastrowid
    }

    /// Rows not yet fetched.
    pub fn remaining(&self) -> usize {
        self.rows.len() - self.index
    }

    fn clear(&mut self) {
        self.fields.clear();
        self.rows.clear();
        self.index = 0;
        self.rowcount = 0;
        self.lastrowid = 0;
    }
}

impl<T: GateTransport> std::fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("target_role", &self.target_role)
            .field("buffered", &self.rows.len())
            .field("index", &self.index)
            .finish()
    }
}
