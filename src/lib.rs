//! # lattice-link
//!
//! Client library for LatticeGate, the query-routing gateway that
//! fronts a horizontally sharded LatticeDB deployment.
//!
//! The crate provides:
//!
//! - **Connection management**: dial/close and a server-assigned
//!   transaction session carried across calls
//! - **Query execution**: single statements, batches, and streamed
//!   results with lazy row retrieval
//! - **Bind variables**: `%(name)s` placeholders rewritten for the
//!   wire, with the mapping narrowed to the names actually used
//! - **Value conversion**: wire values materialized into native types
//!   per column
//! - **A closed error taxonomy**: every transport or application
//!   failure classified into one of seven kinds, so retry and
//!   reporting logic upstream stays uniform
//!
//! The binary RPC transport itself is pluggable: anything implementing
//! [`GateTransport`] works, which is also how the test suite runs the
//! whole stack against a scripted in-memory gateway.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use lattice_link::{connect, ConnectParams, TargetRole};
//! use lattice_link::models::{BindValue, BindVars};
//! use std::time::Duration;
//!
//! let params = ConnectParams::new("gate-0.db.svc:15991", Duration::from_secs(30));
//! let mut conn = connect(transport, params).await?;
//!
//! let mut bind_vars = BindVars::new();
//! bind_vars.insert("id".to_string(), BindValue::Int(42));
//!
//! conn.begin().await?;
//! let result = conn
//!     .execute(
//!         "update users set active = 1 where id = %(id)s",
//!         &bind_vars,
//!         TargetRole::Primary,
//!         false,
//!     )
//!     .await?;
//! conn.commit().await?;
//! println!("updated {} rows", result.rows_affected);
//! ```
//!
//! ## Streaming
//!
//! ```rust,ignore
//! let mut cursor = conn
//!     .stream_execute("select * from events", &BindVars::new(), TargetRole::ReadOnly, false)
//!     .await?;
//! while let Some(row) = cursor.pull_next_row().await? {
//!     // rows arrive frame by frame; the cursor borrows the
//!     // connection until it is drained or dropped
//! }
//! ```

#![warn(missing_docs)]

pub mod bindvars;
pub mod classify;
pub mod config;
pub mod connection;
pub mod convert;
pub mod cursor;
pub mod error;
pub mod logger;
pub mod models;
pub mod stream;
pub mod transport;

pub use classify::classify;
pub use config::{ConnectParams, Credentials, TlsOptions};
pub use connection::{connect, GateConnection};
pub use cursor::Cursor;
pub use error::{ErrorContext, LatticeLinkError, Result};
pub use logger::{ArcLinkLogger, LinkLogger, StdLinkLogger};
pub use models::{
    BindValue, BindVars, CellValue, Field, FieldType, ResultSet, Row, Session, TargetRole,
};
pub use stream::StreamCursor;
pub use transport::{methods, GateStream, GateTransport, TransportError};
