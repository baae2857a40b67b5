use serde::{Deserialize, Serialize};

/// Routing target for a request: which backend role should serve it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetRole {
    /// The writable primary of each shard.
    #[default]
    Primary,
    /// Any serving replica.
    Replica,
    /// Replicas dedicated to batch/analytics traffic.
    ReadOnly,
}

impl std::fmt::Display for TargetRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetRole::Primary => write!(f, "primary"),
            TargetRole::Replica => write!(f, "replica"),
            TargetRole::ReadOnly => write!(f, "readonly"),
        }
    }
}
