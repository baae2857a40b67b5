//! Error types for the lattice-link client library.
//!
//! Every failure a caller can observe is one of the variants of
//! [`LatticeLinkError`]. Transport and application failures are folded
//! into this taxonomy by [`crate::classify::classify`]; local misuse
//! (e.g. a missing bind variable) becomes an [`InterfaceError`] before
//! any RPC is issued.
//!
//! [`InterfaceError`]: LatticeLinkError::InterfaceError

use std::fmt;

use thiserror::Error;

use crate::models::BindVars;

/// Result type used throughout lattice-link.
pub type Result<T> = std::result::Result<T, LatticeLinkError>;

/// Contextual arguments attached to a classified error.
///
/// Carries the identity of the connection the call was issued on and,
/// where applicable, the query text or the full batch statement list.
/// The original error message is always preserved separately on the
/// error variant itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorContext {
    /// Description of the connection the failing call was issued on.
    pub connection: Option<String>,

    /// Query text for single-statement calls.
    pub query: Option<String>,

    /// Full statement list for batch calls.
    pub statements: Option<Vec<String>>,
}

impl ErrorContext {
    /// Context for a session-control call (begin/commit/rollback/dial).
    pub fn connection(description: impl Into<String>) -> Self {
        Self {
            connection: Some(description.into()),
            ..Self::default()
        }
    }

    /// Context for a single-statement call.
    pub fn query(description: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            connection: Some(description.into()),
            query: Some(sql.into()),
            statements: None,
        }
    }

    /// Context for a batch call, carrying the full statement list.
    pub fn batch(description: impl Into<String>, statements: Vec<String>) -> Self {
        Self {
            connection: Some(description.into()),
            query: None,
            statements: Some(statements),
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(connection) = &self.connection {
            write!(f, " [{}]", connection)?;
        }
        if let Some(query) = &self.query {
            write!(f, " query: {}", query)?;
        }
        if let Some(statements) = &self.statements {
            write!(f, " batch of {} statements", statements.len())?;
        }
        Ok(())
    }
}

/// Client error type.
///
/// A closed, mutually exclusive taxonomy: callers see exactly one of
/// these kinds per failure, regardless of the transport's own error
/// vocabulary. Retry logic upstream can key off [`is_retryable`].
///
/// [`is_retryable`]: LatticeLinkError::is_retryable
#[derive(Debug, Clone, Error)]
pub enum LatticeLinkError {
    /// The transport reported a timeout.
    #[error("gateway call timed out: {message}{context}")]
    TimeoutError {
        /// Original transport message.
        message: String,
        /// Call-site context.
        context: ErrorContext,
    },

    /// The gateway shed the request due to load.
    #[error("request backlog: {message}{context}")]
    RequestBacklog {
        /// Original application error message.
        message: String,
        /// Call-site context.
        context: ErrorContext,
    },

    /// Duplicate-key application error. The message is truncated after
    /// the errno marker so that bound values echoed by the server never
    /// propagate or get persisted in logs.
    #[error("integrity error: {message}{context}")]
    IntegrityError {
        /// Pruned application error message.
        message: String,
        /// Call-site context.
        context: ErrorContext,
    },

    /// Generic application-level error returned by the gateway.
    #[error("database error: {message}{context}")]
    DatabaseError {
        /// Original application error message.
        message: String,
        /// Call-site context.
        context: ErrorContext,
    },

    /// The transport rejected the request as malformed.
    #[error("programming error: {message}{context}")]
    ProgrammingError {
        /// Original transport message.
        message: String,
        /// Call-site context.
        context: ErrorContext,
    },

    /// Unrecoverable transport-level failure.
    #[error("fatal transport error: {message}{context}")]
    FatalError {
        /// Original transport message.
        message: String,
        /// Call-site context.
        context: ErrorContext,
    },

    /// Local misuse of the client, detected before any network call:
    /// a bind variable missing from the mapping, a malformed
    /// placeholder, or wire data that cannot be decoded.
    #[error("interface error: {message}")]
    InterfaceError {
        /// What went wrong.
        message: String,
        /// The query being prepared, when applicable.
        query: Option<String>,
        /// The full original bind mapping, when applicable. Never
        /// rendered into the display message.
        bind_vars: Option<BindVars>,
    },
}

impl LatticeLinkError {
    /// Shorthand for an [`InterfaceError`] without query context.
    ///
    /// [`InterfaceError`]: LatticeLinkError::InterfaceError
    pub fn interface(message: impl Into<String>) -> Self {
        Self::InterfaceError {
            message: message.into(),
            query: None,
            bind_vars: None,
        }
    }

    /// Stable lowercase name of the error kind, used as the logging key.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TimeoutError { .. } => "timeout",
            Self::RequestBacklog { .. } => "request_backlog",
            Self::IntegrityError { .. } => "integrity",
            Self::DatabaseError { .. } => "database",
            Self::ProgrammingError { .. } => "programming",
            Self::FatalError { .. } => "fatal",
            Self::InterfaceError { .. } => "interface",
        }
    }

    /// Whether retrying the call could reasonably succeed.
    ///
    /// Only timeouts and load shedding are retryable; integrity and
    /// programming errors will fail the same way every time.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::TimeoutError { .. } | Self::RequestBacklog { .. }
        )
    }

    /// Call-site context, absent for local-only failures.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::TimeoutError { context, .. }
            | Self::RequestBacklog { context, .. }
            | Self::IntegrityError { context, .. }
            | Self::DatabaseError { context, .. }
            | Self::ProgrammingError { context, .. }
            | Self::FatalError { context, .. } => Some(context),
            Self::InterfaceError { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        let err = LatticeLinkError::TimeoutError {
            message: "deadline exceeded".into(),
            context: ErrorContext::default(),
        };
        assert_eq!(err.kind(), "timeout");
        assert_eq!(LatticeLinkError::interface("oops").kind(), "interface");
    }

    #[test]
    fn test_retryable_kinds() {
        let retryable = LatticeLinkError::RequestBacklog {
            message: "request_backlog: too busy".into(),
            context: ErrorContext::default(),
        };
        assert!(retryable.is_retryable());

        let not_retryable = LatticeLinkError::IntegrityError {
            message: "duplicate entry (errno 1062)".into(),
            context: ErrorContext::default(),
        };
        assert!(!not_retryable.is_retryable());
    }

    #[test]
    fn test_display_includes_context() {
        let err = LatticeLinkError::DatabaseError {
            message: "table vanished".into(),
            context: ErrorContext::query("<GateConnection fake:1>", "select 1"),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("table vanished"));
        assert!(rendered.contains("<GateConnection fake:1>"));
        assert!(rendered.contains("select 1"));
    }

    #[test]
    fn test_interface_error_preserves_inputs() {
        let mut bind_vars = BindVars::new();
        bind_vars.insert("key".to_string(), crate::models::BindValue::Int(7));
        let err = LatticeLinkError::InterfaceError {
            message: "missing bind variable 'other'".into(),
            query: Some("select %(other)s".into()),
            bind_vars: Some(bind_vars.clone()),
        };
        match err {
            LatticeLinkError::InterfaceError {
                query, bind_vars: carried, ..
            } => {
                assert_eq!(query.as_deref(), Some("select %(other)s"));
                assert_eq!(carried, Some(bind_vars));
            }
            _ => panic!("expected InterfaceError"),
        }
    }
}
