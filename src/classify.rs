//! Error classification.
//!
//! Folds the transport's error vocabulary into the crate's closed
//! taxonomy. Called explicitly at every RPC call site, with no
//! implicit interception, so each failure is classified and logged
//! exactly once.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ErrorContext, LatticeLinkError};
use crate::logger::LinkLogger;
use crate::transport::TransportError;

static ERRNO_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(errno (\d+)\)").unwrap());

/// MySQL duplicate-key error number.
const DUPLICATE_KEY_ERRNO: u64 = 1062;

/// Classify a transport failure into a domain error, attaching the
/// call-site context and logging the result through `logger`.
///
/// Integrity errors go to the logger's dedicated integrity channel;
/// every other kind goes to the generic classified-error channel.
pub fn classify(
    error: TransportError,
    context: ErrorContext,
    logger: &dyn LinkLogger,
) -> LatticeLinkError {
    let classified = match error {
        TransportError::Timeout(message) => LatticeLinkError::TimeoutError { message, context },
        TransportError::App(message) => classify_app_error(message, context),
        TransportError::Malformed(message) => {
            LatticeLinkError::ProgrammingError { message, context }
        }
        TransportError::Connection(message) => LatticeLinkError::FatalError { message, context },
    };
    if matches!(classified, LatticeLinkError::IntegrityError { .. }) {
        logger.integrity_error(&classified);
    } else {
        logger.classified_error(&classified);
    }
    classified
}

/// Dispatch an application-level error frame on its message.
///
/// Matching is done on the lowercased message, and the lowercased form
/// is what propagates.
fn classify_app_error(message: String, context: ErrorContext) -> LatticeLinkError {
    let message = message.to_lowercase();
    if message.starts_with("request_backlog") {
        return LatticeLinkError::RequestBacklog { message, context };
    }
    if let Some(captures) = ERRNO_PATTERN.captures(&message) {
        if captures[1].parse::<u64>().ok() == Some(DUPLICATE_KEY_ERRNO) {
            // The tail after the errno marker echoes the query with its
            // bound values; prune it so bound data never lands in logs
            // or propagated messages.
            let pruned = message[..captures.get(0).unwrap().end()].to_string();
            return LatticeLinkError::IntegrityError {
                message: pruned,
                context,
            };
        }
    }
    LatticeLinkError::DatabaseError { message, context }
}
