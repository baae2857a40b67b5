//! The gateway connection.
//!
//! [`GateConnection`] owns the transport handle and the current
//! transaction session, and mediates every session read and write. It
//! is single-caller by construction: all operations take `&mut self`,
//! and a live [`StreamCursor`] borrows the connection until the stream
//! is drained or dropped, so no other call can interleave with
//! unread frames.
//!
//! [`StreamCursor`]: crate::stream::StreamCursor

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::bindvars;
use crate::classify::classify;
use crate::config::ConnectParams;
use crate::convert::conversions_for_fields;
use crate::cursor::Cursor;
use crate::error::{ErrorContext, LatticeLinkError, Result};
use crate::logger::{ArcLinkLogger, StdLinkLogger};
use crate::models::{
    BatchReply, BindVars, BoundQuery, ExecuteBatchRequest, ExecuteRequest, GateReply, ResultSet,
    Session, TargetRole,
};
use crate::stream::StreamCursor;
use crate::transport::{methods, GateStream, GateTransport, TransportError};

/// Connect to a gateway: wrap the transport and dial it.
///
/// # Examples
///
/// ```rust,ignore
/// use lattice_link::{connect, ConnectParams, TargetRole};
/// use std::time::Duration;
///
/// let params = ConnectParams::new("gate-0.db.svc:15991", Duration::from_secs(30));
/// let mut conn = connect(transport, params).await?;
/// let result = conn
///     .execute("select * from users where id = %(id)s", &bind_vars, TargetRole::Replica, false)
///     .await?;
/// ```
pub async fn connect<T: GateTransport>(
    transport: T,
    params: ConnectParams,
) -> Result<GateConnection<T>> {
    let mut conn = GateConnection::new(transport, params);
    conn.dial().await?;
    Ok(conn)
}

/// A logical connection to the gateway.
///
/// Two states: **no-session** (initial, and after commit/rollback/
/// close) and **in-session** (after a successful [`begin`], or after
/// any reply carrying a non-empty session token). The session is
/// attached to every request while live and replaced wholesale by
/// reply updates.
///
/// [`begin`]: GateConnection::begin
pub struct GateConnection<T: GateTransport> {
    params: ConnectParams,
    transport: T,
    session: Option<Session>,
    logger: ArcLinkLogger,
}

impl<T: GateTransport> GateConnection<T> {
    /// Wrap a transport without dialing it. Uses the default logger.
    pub fn new(transport: T, params: ConnectParams) -> Self {
        Self::with_logger(transport, params, Arc::new(StdLinkLogger))
    }

    /// Wrap a transport with an injected logging capability. The
    /// logger lives exactly as long as the connection.
    pub fn with_logger(transport: T, params: ConnectParams, logger: ArcLinkLogger) -> Self {
        Self {
            params,
            transport,
            session: None,
            logger,
        }
    }

    /// Human-readable identity used in error context and logs.
    pub fn description(&self) -> String {
        format!("<GateConnection {}>", self.params.address)
    }

    /// Gateway address this connection targets.
    pub fn address(&self) -> &str {
        &self.params.address
    }

    /// Per-connection call timeout.
    pub fn timeout(&self) -> Duration {
        self.params.timeout
    }

    /// Whether a transaction session is currently attached.
    pub fn in_session(&self) -> bool {
        self.session.is_some()
    }

    /// The current session token, if any.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Open the underlying transport. An already-open connection is
    /// closed first (re-dial semantics).
    pub async fn dial(&mut self) -> Result<()> {
        if !self.is_closed() {
            self.close().await?;
        }
        match self.transport.dial().await {
            Ok(()) => Ok(()),
            Err(e) => Err(self.classified(e, ErrorContext::connection(self.description()))),
        }
    }

    /// Close the connection, rolling back a live session first.
    pub async fn close(&mut self) -> Result<()> {
        if self.session.is_some() {
            self.rollback().await?;
        }
        match self.transport.close().await {
            Ok(()) => Ok(()),
            Err(e) => Err(self.classified(e, ErrorContext::connection(self.description()))),
        }
    }

    /// Whether the underlying transport is closed.
    pub fn is_closed(&self) -> bool {
        self.transport.is_closed()
    }

    /// Open a transaction. The reply document is the session token,
    /// attached to every subsequent request until commit or rollback.
    ///
    /// Session state is unchanged on failure. Beginning while already
    /// in a session is not guarded here; the gateway rejects it.
    pub async fn begin(&mut self) -> Result<()> {
        match self.transport.call(methods::BEGIN, Value::Null).await {
            Ok(reply) => {
                self.session = Session::from_reply(reply);
                Ok(())
            }
            Err(e) => Err(self.classified(e, ErrorContext::connection(self.description()))),
        }
    }

    /// Commit the open transaction.
    ///
    /// The session is detached locally *before* the RPC is issued and
    /// is not restored on failure: once the call has been attempted,
    /// the transaction's outcome on the server is authoritative and a
    /// stale token must never ride along on the next call.
    pub async fn commit(&mut self) -> Result<()> {
        self.end_session(methods::COMMIT).await
    }

    /// Roll back the open transaction. Same detach-first semantics as
    /// [`commit`].
    ///
    /// [`commit`]: GateConnection::commit
    pub async fn rollback(&mut self) -> Result<()> {
        self.end_session(methods::ROLLBACK).await
    }

    async fn end_session(&mut self, method: &str) -> Result<()> {
        let session = self.session.take();
        let request = session.map(Session::into_value).unwrap_or(Value::Null);
        match self.transport.call(method, request).await {
            Ok(_) => Ok(()),
            Err(e) => Err(self.classified(e, ErrorContext::connection(self.description()))),
        }
    }

    /// Execute a single statement and buffer the full result.
    ///
    /// `query` uses `%(name)s` placeholders; `bind_vars` may be a
    /// superset of the names referenced (only referenced entries are
    /// sent). With `not_in_transaction` the statement runs outside the
    /// attached transaction even when one is open.
    pub async fn execute(
        &mut self,
        query: &str,
        bind_vars: &BindVars,
        target_role: TargetRole,
        not_in_transaction: bool,
    ) -> Result<ResultSet> {
        let (sql, variables) = bindvars::translate(query, bind_vars)?;
        let request = ExecuteRequest {
            sql: sql.clone(),
            bind_variables: variables,
            target_role,
            not_in_transaction,
            session: self.session.clone(),
        };
        let encoded = self.encode(&request)?;

        let raw = match self.transport.call(methods::EXECUTE, encoded).await {
            Ok(raw) => raw,
            Err(e) => {
                self.logger.private_data(bind_vars);
                return Err(self.classified(e, ErrorContext::query(self.description(), sql.as_str())));
            }
        };
        let GateReply {
            error,
            session,
            result,
        } = self.decode(raw)?;
        self.fold_session(session);

        if let Some(error) = error.filter(|m| !m.is_empty()) {
            self.logger.private_data(bind_vars);
            return Err(self.classified(
                TransportError::App(error),
                ErrorContext::query(self.description(), sql.as_str()),
            ));
        }
        match result {
            Some(raw_result) => ResultSet::from_raw(raw_result),
            None => Ok(ResultSet::default()),
        }
    }

    /// Execute a list of statements in one round trip, sharing one
    /// session attachment and one session update for the whole batch.
    ///
    /// A classified failure aborts the entire batch: no partial
    /// results are returned, and the error context carries the full
    /// statement list.
    pub async fn execute_batch(
        &mut self,
        statements: &[(String, BindVars)],
        target_role: TargetRole,
        not_in_transaction: bool,
    ) -> Result<Vec<ResultSet>> {
        let mut queries = Vec::with_capacity(statements.len());
        for (query, bind_vars) in statements {
            let (sql, variables) = bindvars::translate(query, bind_vars)?;
            queries.push(BoundQuery {
                sql,
                bind_variables: variables,
            });
        }
        let request = ExecuteBatchRequest {
            queries,
            target_role,
            not_in_transaction,
            session: self.session.clone(),
        };
        let encoded = self.encode(&request)?;

        let statement_list =
            || statements.iter().map(|(query, _)| query.clone()).collect::<Vec<_>>();
        let raw = match self.transport.call(methods::EXECUTE_BATCH, encoded).await {
            Ok(raw) => raw,
            Err(e) => {
                let bind_list: Vec<&BindVars> =
                    statements.iter().map(|(_, bind_vars)| bind_vars).collect();
                self.logger.private_data_list(&bind_list);
                return Err(
                    self.classified(e, ErrorContext::batch(self.description(), statement_list()))
                );
            }
        };
        let BatchReply {
            error,
            session,
            results,
        } = self.decode(raw)?;
        self.fold_session(session);

        if let Some(error) = error.filter(|m| !m.is_empty()) {
            let bind_list: Vec<&BindVars> =
                statements.iter().map(|(_, bind_vars)| bind_vars).collect();
            self.logger.private_data_list(&bind_list);
            return Err(self.classified(
                TransportError::App(error),
                ErrorContext::batch(self.description(), statement_list()),
            ));
        }
        results.into_iter().map(ResultSet::from_raw).collect()
    }

    /// Execute a statement with streamed result delivery.
    ///
    /// Exactly one frame is pulled synchronously to obtain the field
    /// descriptors (callers need the schema before consuming rows);
    /// rows are then pulled lazily through the returned
    /// [`StreamCursor`], which borrows this connection until dropped.
    pub async fn stream_execute(
        &mut self,
        query: &str,
        bind_vars: &BindVars,
        target_role: TargetRole,
        not_in_transaction: bool,
    ) -> Result<StreamCursor<'_, T>> {
        let (sql, variables) = bindvars::translate(query, bind_vars)?;
        let request = ExecuteRequest {
            sql: sql.clone(),
            bind_variables: variables,
            target_role,
            not_in_transaction,
            session: self.session.clone(),
        };
        let encoded = self.encode(&request)?;

        let mut stream = match self
            .transport
            .stream_call(methods::STREAM_EXECUTE, encoded)
            .await
        {
            Ok(stream) => stream,
            Err(e) => {
                self.logger.private_data(bind_vars);
                return Err(self.classified(e, ErrorContext::query(self.description(), sql.as_str())));
            }
        };

        // The first frame carries the field descriptors and no rows.
        let first = match stream.next_frame().await {
            Ok(frame) => frame,
            Err(e) => {
                self.logger.private_data(bind_vars);
                return Err(self.classified(e, ErrorContext::query(self.description(), sql.as_str())));
            }
        };
        let Some(first) = first else {
            return Err(self.unexpected("stream ended before the field frame"));
        };
        let reply: GateReply = self.decode(first)?;
        let Some(result) = reply.result else {
            return Err(self.unexpected("first stream frame carried no result"));
        };

        let conversions = conversions_for_fields(&result.fields);
        Ok(StreamCursor::new(self, stream, result.fields, conversions))
    }

    /// A buffered, DB-API style cursor over this connection.
    pub fn cursor(&mut self, target_role: TargetRole) -> Cursor<'_, T> {
        Cursor::new(self, target_role)
    }

    /// Replace the session when a reply carries a non-empty token.
    pub(crate) fn fold_session(&mut self, session: Option<Session>) {
        if let Some(session) = session {
            if !session.is_empty() {
                self.session = Some(session);
            }
        }
    }

    pub(crate) fn classified(
        &self,
        error: TransportError,
        context: ErrorContext,
    ) -> LatticeLinkError {
        classify(error, context, self.logger.as_ref())
    }

    /// A failure that is neither a transport error nor an application
    /// error frame: logged at error severity, surfaced unchanged as a
    /// local interface error, never classified.
    pub(crate) fn unexpected(&self, detail: impl Into<String>) -> LatticeLinkError {
        let detail = detail.into();
        self.logger.unexpected_error(&detail);
        LatticeLinkError::interface(detail)
    }

    pub(crate) fn encode<S: Serialize>(&self, request: &S) -> Result<Value> {
        serde_json::to_value(request)
            .map_err(|e| self.unexpected(format!("failed to encode request: {}", e)))
    }

    pub(crate) fn decode<D: DeserializeOwned>(&self, reply: Value) -> Result<D> {
        serde_json::from_value(reply)
            .map_err(|e| self.unexpected(format!("failed to decode reply: {}", e)))
    }
}

impl<T: GateTransport> std::fmt::Debug for GateConnection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateConnection")
            .field("address", &self.params.address)
            .field("in_session", &self.in_session())
            .finish()
    }
}
