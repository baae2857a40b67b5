//! Transport seam between the connection and the wire.
//!
//! The binary RPC layer (framing, dialing, authentication, TLS, the
//! binary object-notation codec) lives behind [`GateTransport`]. The
//! connection exchanges generic documents (`serde_json::Value`) with
//! the transport; how those documents are encoded on the wire is the
//! transport implementor's concern.
//!
//! Implementors must guarantee two things beyond the signatures:
//!
//! - the per-connection timeout from [`ConnectParams`] is enforced on
//!   every call and stream pull, failing with
//!   [`TransportError::Timeout`];
//! - closing the transport causes in-flight and subsequent stream
//!   pulls to fail rather than hang (the only way to abandon a
//!   half-read stream).
//!
//! [`ConnectParams`]: crate::config::ConnectParams

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// RPC method names understood by the gateway.
pub mod methods {
    /// Open a transaction, returning a session document.
    pub const BEGIN: &str = "LatticeGate.Begin";
    /// Commit the transaction carried in the request.
    pub const COMMIT: &str = "LatticeGate.Commit";
    /// Roll back the transaction carried in the request.
    pub const ROLLBACK: &str = "LatticeGate.Rollback";
    /// Execute a single statement.
    pub const EXECUTE: &str = "LatticeGate.Execute";
    /// Execute a list of statements in one round trip.
    pub const EXECUTE_BATCH: &str = "LatticeGate.ExecuteBatch";
    /// Execute a statement with incremental result delivery.
    pub const STREAM_EXECUTE: &str = "LatticeGate.StreamExecute";
}

/// Failure modes of the transport, the complete set the classifier
/// dispatches on.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The call did not complete within the connection's timeout.
    #[error("timeout: {0}")]
    Timeout(String),

    /// The gateway answered with an application-level error frame.
    #[error("application error: {0}")]
    App(String),

    /// The transport rejected the request as malformed.
    #[error("malformed request: {0}")]
    Malformed(String),

    /// Any other transport-level failure (connection refused, broken
    /// pipe, codec failure on the wire, ...).
    #[error("connection error: {0}")]
    Connection(String),
}

/// One logical RPC connection to the gateway.
#[async_trait]
pub trait GateTransport: Send {
    /// Handle for an open streaming call.
    type Stream: GateStream;

    /// Open the underlying connection.
    async fn dial(&mut self) -> Result<(), TransportError>;

    /// Close the underlying connection. In-flight streams fail on
    /// their next pull.
    async fn close(&mut self) -> Result<(), TransportError>;

    /// Whether the connection is currently closed.
    fn is_closed(&self) -> bool;

    /// Issue a unary call and wait for the complete reply document.
    async fn call(&mut self, method: &str, request: Value) -> Result<Value, TransportError>;

    /// Open a streaming call. Frames are pulled from the returned
    /// handle one at a time.
    async fn stream_call(
        &mut self,
        method: &str,
        request: Value,
    ) -> Result<Self::Stream, TransportError>;
}

/// Pull side of a streaming call.
#[async_trait]
pub trait GateStream: Send {
    /// Next frame of the stream, or `Ok(None)` once the gateway has
    /// sent everything.
    async fn next_frame(&mut self) -> Result<Option<Value>, TransportError>;
}
