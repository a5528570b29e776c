//! Line parsing for the completion stream.
//!
//! Only `data:` lines carry events. Each one holds a JSON object whose
//! `event` field selects the variant.

use serde_json::Value;

use crate::sse::events::{SseLine, StreamEvent};
use crate::sse::payloads::{CompletionPayload, EnvelopePayload, SearchInfoPayload};

/// Classify a single SSE line
pub fn parse_sse_line(line: &str) -> SseLine {
    let line = line.trim();
    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(rest) = line.strip_prefix("data:") {
        return SseLine::Data(rest.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("event:") {
        return SseLine::Event(rest.trim().to_string());
    }

    SseLine::Other(line.to_string())
}

/// Parse the JSON payload of a `data:` line.
///
/// Returns `Ok(None)` for event kinds that are not modelled, including a
/// missing or non-string discriminator.
pub fn parse_stream_event(data: &str) -> Result<Option<StreamEvent>, serde_json::Error> {
    let value: Value = serde_json::from_str(data)?;
    let envelope: EnvelopePayload = serde_json::from_value(value.clone())?;

    let kind = match envelope.event.as_ref().and_then(Value::as_str) {
        Some(kind) => kind,
        None => return Ok(None),
    };

    match kind {
        "cmpl" => {
            let payload: CompletionPayload = serde_json::from_value(value)?;
            Ok(Some(StreamEvent::Completion {
                text: payload.text.unwrap_or_default(),
            }))
        }
        "search_info" => {
            let payload: SearchInfoPayload = serde_json::from_value(value)?;
            Ok(Some(StreamEvent::SearchInfo {
                search_type: payload.search_type.unwrap_or_default(),
                hallucination: payload.hallucination.unwrap_or_default(),
            }))
        }
        "status" => Ok(Some(StreamEvent::Status)),
        // Ignore unknown events instead of erroring
        _ => Ok(None),
    }
}

/// Decode one raw line into at most one event.
///
/// Never fails: malformed payloads are logged and skipped.
pub fn parse_line(line: &str) -> Option<StreamEvent> {
    let data = match parse_sse_line(line) {
        SseLine::Data(data) => data,
        _ => return None,
    };

    // Keep-alive
    if data.is_empty() {
        return None;
    }

    match parse_stream_event(&data) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Skipping malformed stream line: {} ({})", data, e);
            None
        }
    }
}
