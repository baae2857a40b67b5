//! Data models for the lattice-link client library.
//!
//! Wire request/reply shapes exchanged with the gateway, plus the
//! native value types rows are materialized into.

pub mod batch_request;
pub mod bind_value;
pub mod cell_value;
pub mod exec_request;
pub mod field;
pub mod field_type;
pub mod reply;
pub mod result_set;
pub mod session;
pub mod target_role;

pub use batch_request::{BoundQuery, ExecuteBatchRequest};
pub use bind_value::{BindValue, BindVars};
pub use cell_value::CellValue;
pub use exec_request::ExecuteRequest;
pub use field::Field;
pub use field_type::FieldType;
pub use reply::{BatchReply, GateReply, RawResult, RawRow};
pub use result_set::{ResultSet, Row};
pub use session::Session;
pub use target_role::TargetRole;
