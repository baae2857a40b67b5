//! Injected logging capability for the gateway connection.
//!
//! The connection does not log through a process-wide singleton;
//! it owns an [`ArcLinkLogger`] supplied at construction, with a
//! lifetime tied to the connection itself. The default implementation,
//! [`StdLinkLogger`], forwards to the `log` facade.
//!
//! Bind variables travel only through the dedicated private-data
//! channel, never through error messages. The default implementation
//! discards them; deployments that need an audit trail plug in their
//! own sink.

use std::sync::Arc;

use crate::error::LatticeLinkError;
use crate::models::BindVars;

/// Structured logging hooks used by [`GateConnection`].
///
/// [`GateConnection`]: crate::connection::GateConnection
pub trait LinkLogger: Send + Sync {
    /// Called exactly once for every classified error other than
    /// integrity errors.
    fn classified_error(&self, error: &LatticeLinkError);

    /// Called exactly once for every classified integrity error.
    /// A distinct channel: duplicate-key failures are commonly counted
    /// and alerted on separately from transport trouble.
    fn integrity_error(&self, error: &LatticeLinkError);

    /// Bind variables of a failing single-statement call.
    ///
    /// Default: discard.
    fn private_data(&self, _bind_vars: &BindVars) {}

    /// Bind variables of a failing batch call, one mapping per
    /// statement.
    ///
    /// Default: discard.
    fn private_data_list(&self, _bind_vars_list: &[&BindVars]) {}

    /// A failure that is not a transport error and was not classified:
    /// reply decode failures, protocol violations. Logged here at error
    /// severity before being surfaced to the caller unchanged.
    fn unexpected_error(&self, detail: &str);
}

/// Shared handle to a [`LinkLogger`].
pub type ArcLinkLogger = Arc<dyn LinkLogger>;

/// Default logger backed by the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdLinkLogger;

impl LinkLogger for StdLinkLogger {
    fn classified_error(&self, error: &LatticeLinkError) {
        log::warn!("[GATE_RPC] {} error: {}", error.kind(), error);
    }

    fn integrity_error(&self, error: &LatticeLinkError) {
        log::warn!("[GATE_INTEGRITY] {}", error);
    }

    fn unexpected_error(&self, detail: &str) {
        log::error!("[GATE_RPC] unexpected low-level error: {}", detail);
    }
}
