use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Server-issued transaction session token.
///
/// Opaque to the client beyond pass-through: created by a successful
/// begin, attached to every in-transaction request, replaced wholesale
/// whenever a reply carries a session, and cleared on commit, rollback
/// or close. The client never inspects its interior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session(JsonValue);

impl Session {
    /// Wrap a session document received from the gateway. Returns
    /// `None` for a null document, which the gateway uses for "no
    /// session".
    pub fn from_reply(value: JsonValue) -> Option<Self> {
        if value.is_null() {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Whether the token is the empty/absent marker.
    pub fn is_empty(&self) -> bool {
        self.0.is_null()
    }

    /// The raw document, for attaching to a request.
    pub fn into_value(self) -> JsonValue {
        self.0
    }

    /// Borrow the raw document.
    pub fn as_value(&self) -> &JsonValue {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_reply_is_no_session() {
        assert!(Session::from_reply(JsonValue::Null).is_none());
    }

    #[test]
    fn test_document_reply_is_a_session() {
        let session = Session::from_reply(json!({"in_transaction": true})).unwrap();
        assert!(!session.is_empty());
        assert_eq!(session.as_value()["in_transaction"], json!(true));
    }

    #[test]
    fn test_serde_transparent() {
        let session = Session::from_reply(json!({"shard_sessions": [1, 2]})).unwrap();
        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value, json!({"shard_sessions": [1, 2]}));
    }
}
