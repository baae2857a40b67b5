use serde::{Deserialize, Serialize};

use super::bind_value::BindVars;
use super::session::Session;
use super::target_role::TargetRole;

/// One statement of a batch: text plus its narrowed bind variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundQuery {
    /// Statement text with colon-style bind references.
    pub sql: String,

    /// Bind variables for this statement.
    pub bind_variables: BindVars,
}

/// Request envelope for a batch call. One session attachment covers
/// the whole batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteBatchRequest {
    /// Statements, executed in order.
    pub queries: Vec<BoundQuery>,

    /// Which backend role should serve the request.
    pub target_role: TargetRole,

    /// Run outside the open transaction even if one is attached.
    pub not_in_transaction: bool,

    /// Transaction session, attached only when live.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_batch_wire_shape() {
        let request = ExecuteBatchRequest {
            queries: vec![BoundQuery {
                sql: "delete from t where id = :id".into(),
                bind_variables: BindVars::new(),
            }],
            target_role: TargetRole::Primary,
            not_in_transaction: false,
            session: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["queries"][0]["sql"], json!("delete from t where id = :id"));
        assert!(value.get("session").is_none());
    }
}
