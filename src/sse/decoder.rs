//! Incremental decoding of the completion stream.
//!
//! Bytes arrive in arbitrary chunks. [`StreamDecoder`] buffers them, splits
//! on `\n` and hands each complete line to [`parse_line`]. Lines are decoded
//! from bytes only once complete, so a UTF-8 sequence split across chunks
//! survives.

use futures::Stream;
use futures_util::StreamExt;
use std::collections::VecDeque;

use crate::error::{ApiError, KimiError};
use crate::sse::events::StreamEvent;
use crate::sse::parser::parse_line;
use crate::traits::ByteStream;

/// Longest line the decoder buffers before giving up on it.
pub const DEFAULT_LINE_LIMIT: usize = 8 * 1024 * 1024;

/// Stateful decoder that accumulates bytes and emits complete events
#[derive(Debug)]
pub struct StreamDecoder {
    buffer: Vec<u8>,
    /// Prefix of `buffer` already known to hold no `\n`
    scanned: usize,
    line_limit: usize,
    /// Dropping the rest of an oversized line
    discarding: bool,
}

impl Default for StreamDecoder {
    fn default() -> Self {
        Self::with_line_limit(DEFAULT_LINE_LIMIT)
    }
}

impl StreamDecoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder that drops lines longer than `limit` bytes.
    pub fn with_line_limit(limit: usize) -> Self {
        Self {
            buffer: Vec::new(),
            scanned: 0,
            line_limit: limit,
            discarding: false,
        }
    }

    /// Feed a chunk, returning the events of every line it completes.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<StreamEvent> {
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        let mut start = 0;
        let mut from = self.scanned;
        while let Some(offset) = self.buffer[from..].iter().position(|&b| b == b'\n') {
            let end = from + offset;
            if self.discarding {
                self.discarding = false;
            } else if let Some(event) = decode_line(&self.buffer[start..end]) {
                events.push(event);
            }
            start = end + 1;
            from = start;
        }
        self.buffer.drain(..start);

        if self.buffer.len() > self.line_limit {
            tracing::warn!(
                "Dropping stream line longer than {} bytes",
                self.line_limit
            );
            self.buffer.clear();
            self.discarding = true;
        }
        self.scanned = self.buffer.len();
        events
    }

    /// Flush a final unterminated line, if any.
    pub fn finish(&mut self) -> Option<StreamEvent> {
        self.scanned = 0;
        let line = std::mem::take(&mut self.buffer);
        if std::mem::take(&mut self.discarding) || line.is_empty() {
            return None;
        }
        decode_line(&line)
    }

    /// Bytes waiting for a line terminator.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

fn decode_line(raw: &[u8]) -> Option<StreamEvent> {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    match std::str::from_utf8(raw) {
        Ok(line) => parse_line(line),
        Err(e) => {
            tracing::warn!("Skipping stream line with invalid UTF-8: {}", e);
            None
        }
    }
}

struct DecodeState {
    body: ByteStream,
    decoder: StreamDecoder,
    ready: VecDeque<StreamEvent>,
    done: bool,
}

/// Turn a raw response body into an ordered stream of events.
///
/// The stream ends when the body ends. A transport failure mid-transfer is
/// yielded once as an [`ApiError`] with status 0, after which the stream
/// ends.
pub fn decode_stream(body: ByteStream) -> impl Stream<Item = Result<StreamEvent, KimiError>> + Send {
    let state = DecodeState {
        body,
        decoder: StreamDecoder::new(),
        ready: VecDeque::new(),
        done: false,
    };

    futures_util::stream::unfold(state, |mut state| async move {
        loop {
            if let Some(event) = state.ready.pop_front() {
                return Some((Ok(event), state));
            }
            if state.done {
                return None;
            }

            match state.body.next().await {
                Some(Ok(chunk)) => {
                    let events = state.decoder.feed(&chunk);
                    state.ready.extend(events);
                }
                Some(Err(err)) => {
                    state.done = true;
                    let err = ApiError::from_http("Stream interrupted", err);
                    return Some((Err(KimiError::from(err)), state));
                }
                None => {
                    state.done = true;
                    state.ready.extend(state.decoder.finish());
                }
            }
        }
    })
}
