use serde::{Deserialize, Serialize};

use super::field_type::FieldType;

/// A column descriptor in a result set.
///
/// # Example (document representation)
///
/// ```json
/// {"name": "user_id", "type": 8}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Column name.
    pub name: String,

    /// Wire type tag, drives value conversion.
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl Field {
    /// Create a field descriptor.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let field = Field::new("id", FieldType::LongLong);
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value, serde_json::json!({"name": "id", "type": 8}));
    }
}
