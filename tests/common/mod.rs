//! Shared test harness: a scripted in-memory gateway transport.
//!
//! `FakeGateTransport` answers calls from a queue of canned replies
//! and records every request it sees, so tests can assert on exactly
//! what went over the wire without any network.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use lattice_link::{ConnectParams, GateStream, GateTransport, TransportError};

/// One scripted transport interaction, consumed in order.
pub enum Script {
    /// Unary call succeeds with this reply document.
    Reply(Value),
    /// Unary call fails with this transport error.
    Fail(TransportError),
    /// Stream call succeeds; the frames are then pulled in order.
    Stream(Vec<StreamFrame>),
    /// Stream call fails to open.
    StreamFail(TransportError),
}

/// One scripted stream frame.
pub enum StreamFrame {
    /// A frame document.
    Frame(Value),
    /// A transport failure on this pull.
    Fail(TransportError),
}

/// Recorded `(method, request)` pairs, shared with the test.
pub type CallLog = Arc<Mutex<Vec<(String, Value)>>>;

pub struct FakeGateTransport {
    script: VecDeque<Script>,
    calls: CallLog,
    closed: bool,
}

impl FakeGateTransport {
    pub fn scripted(script: Vec<Script>) -> Self {
        Self {
            script: script.into(),
            calls: Arc::new(Mutex::new(Vec::new())),
            closed: true,
        }
    }

    /// Handle to the call log; keep a clone before handing the
    /// transport to a connection.
    pub fn calls(&self) -> CallLog {
        Arc::clone(&self.calls)
    }

    fn next_script(&mut self, method: &str) -> Script {
        self.script
            .pop_front()
            .unwrap_or_else(|| panic!("unscripted call: {}", method))
    }
}

#[async_trait]
impl GateTransport for FakeGateTransport {
    type Stream = FakeGateStream;

    async fn dial(&mut self) -> Result<(), TransportError> {
        self.closed = false;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        self.closed = true;
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    async fn call(&mut self, method: &str, request: Value) -> Result<Value, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), request));
        match self.next_script(method) {
            Script::Reply(reply) => Ok(reply),
            Script::Fail(error) => Err(error),
            _ => panic!("scripted a stream, got unary call: {}", method),
        }
    }

    async fn stream_call(
        &mut self,
        method: &str,
        request: Value,
    ) -> Result<Self::Stream, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), request));
        match self.next_script(method) {
            Script::Stream(frames) => Ok(FakeGateStream {
                frames: frames.into(),
            }),
            Script::StreamFail(error) => Err(error),
            _ => panic!("scripted a unary reply, got stream call: {}", method),
        }
    }
}

pub struct FakeGateStream {
    frames: VecDeque<StreamFrame>,
}

#[async_trait]
impl GateStream for FakeGateStream {
    async fn next_frame(&mut self) -> Result<Option<Value>, TransportError> {
        match self.frames.pop_front() {
            Some(StreamFrame::Frame(value)) => Ok(Some(value)),
            Some(StreamFrame::Fail(error)) => Err(error),
            None => Ok(None),
        }
    }
}

// ── Canned document builders ────────────────────────────────────────────────

pub fn test_params() -> ConnectParams {
    ConnectParams::new("fake:1", Duration::from_secs(5))
}

/// A session document like the gateway hands out from `Begin`.
pub fn session_doc(marker: u64) -> Value {
    json!({"in_transaction": true, "shard_sessions": [{"shard": "-80", "transaction_id": marker}]})
}

/// A reply carrying a result with `id` (int64) and `name` (varchar)
/// columns.
pub fn id_name_result(rows: Vec<Value>, rows_affected: u64, insert_id: u64) -> Value {
    json!({
        "result": {
            "fields": [
                {"name": "id", "type": 8},
                {"name": "name", "type": 15}
            ],
            "rows": rows,
            "rows_affected": rows_affected,
            "insert_id": insert_id
        }
    })
}

/// A row-less frame carrying only field descriptors (first frame of a
/// stream).
pub fn fields_frame() -> Value {
    json!({
        "result": {
            "fields": [
                {"name": "id", "type": 8},
                {"name": "name", "type": 15}
            ],
            "rows": [],
            "rows_affected": 0,
            "insert_id": 0
        }
    })
}

/// A stream frame carrying rows for the `id`/`name` schema.
pub fn rows_frame(rows: Vec<Value>) -> Value {
    json!({
        "result": {
            "fields": [],
            "rows": rows,
            "rows_affected": 0,
            "insert_id": 0
        }
    })
}

/// A stream frame carrying only a session update.
pub fn session_frame(marker: u64) -> Value {
    json!({"session": session_doc(marker)})
}
