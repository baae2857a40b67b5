use serde::{Deserialize, Serialize};

use super::bind_value::BindVars;
use super::session::Session;
use super::target_role::TargetRole;

/// Request envelope for a single-statement call, streaming or not.
///
/// Constructed fresh per call and never reused. The session key is
/// present only while a transaction is open.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteRequest {
    /// Statement text with colon-style bind references.
    pub sql: String,

    /// Bind variables, already narrowed to the names the statement
    /// references.
    pub bind_variables: BindVars,

    /// Which backend role should serve the request.
    pub target_role: TargetRole,

    /// Run outside the open transaction even if one is attached.
    pub not_in_transaction: bool,

    /// Transaction session, attached only when live.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,
}
