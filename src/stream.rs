//! Streaming cursor state.
//!
//! A [`StreamCursor`] turns the sequence of streamed reply frames into
//! a pull-based row iterator: lazy, forward-only, single-pass, and
//! non-restartable. It exclusively borrows its connection, so no other
//! operation can be issued while frames are unread; the only ways out
//! are draining the stream or dropping the cursor (abandoning leaves
//! the transport in an implementation-defined state, so close the
//! connection afterwards).

use crate::connection::GateConnection;
use crate::convert::{make_row, Conversion};
use crate::error::{ErrorContext, Result};
use crate::models::{Field, GateReply, RawResult, Row};
use crate::transport::{GateStream, GateTransport};

/// Pull-based cursor over one streaming call.
pub struct StreamCursor<'c, T: GateTransport> {
    conn: &'c mut GateConnection<T>,
    stream: T::Stream,
    fields: Vec<Field>,
    conversions: Vec<Option<Conversion>>,
    /// Current unread frame, if any.
    frame: Option<RawResult>,
    /// Offset of the next unread row within `frame`.
    index: usize,
    exhausted: bool,
}

impl<'c, T: GateTransport> StreamCursor<'c, T> {
    pub(crate) fn new(
        conn: &'c mut GateConnection<T>,
        stream: T::Stream,
        fields: Vec<Field>,
        conversions: Vec<Option<Conversion>>,
    ) -> Self {
        Self {
            conn,
            stream,
            fields,
            conversions,
            frame: None,
            index: 0,
            exhausted: false,
        }
    }

    /// Field descriptors, available from the moment the stream opens.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Whether the stream has delivered its final frame. Sticky.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// The next converted row, or `None` at end of stream.
    ///
    /// Frames that carry only a session update are folded into the
    /// connection without producing a row; frames with an empty row
    /// list (an artifact of scatter over multiple shards) are skipped.
    /// Once `None` is returned every further call returns `None`.
    pub async fn pull_next_row(&mut self) -> Result<Option<Row>> {
        if self.exhausted {
            return Ok(None);
        }
        loop {
            if let Some(frame) = self.frame.as_ref() {
                let row = make_row(&frame.rows[self.index], &self.conversions)?;
                self.index += 1;
                if self.index == frame.rows.len() {
                    // Frame drained; force a fresh pull next call.
                    self.frame = None;
                    self.index = 0;
                }
                return Ok(Some(row));
            }

            let frame = match self.stream.next_frame().await {
                Ok(frame) => frame,
                Err(e) => {
                    return Err(self
                        .conn
                        .classified(e, ErrorContext::connection(self.conn.description())));
                }
            };
            let Some(value) = frame else {
                self.exhausted = true;
                return Ok(None);
            };
            let reply: GateReply = self.conn.decode(value)?;

            // Session updates arrive in row-less frames of their own.
            if reply.session.as_ref().is_some_and(|s| !s.is_empty()) {
                self.conn.fold_session(reply.session);
                continue;
            }
            let Some(result) = reply.result else {
                return Err(self
                    .conn
                    .unexpected("stream frame carried neither session nor result"));
            };
            if result.rows.is_empty() {
                continue;
            }
            self.frame = Some(result);
            self.index = 0;
        }
    }

    /// Drain the rest of the stream into a vector.
    pub async fn collect_remaining(&mut self) -> Result<Vec<Row>> {
        let mut rows = Vec::new();
        while let Some(row) = self.pull_next_row().await? {
            rows.push(row);
        }
        Ok(rows)
    }
}

impl<T: GateTransport> std::fmt::Debug for StreamCursor<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamCursor")
            .field("fields", &self.fields.len())
            .field("buffered", &self.frame.as_ref().map(|r| r.rows.len()))
            .field("index", &self.index)
            .field("exhausted", &self.exhausted)
            .finish()
    }
}
