//! Stream event types.
//!
//! Contains the closed [`StreamEvent`] enum yielded by the completion
//! stream, and [`SseLine`] for classifying raw lines.

use serde::Serialize;
use serde_json::{Map, Value};

/// Represents a classified SSE line
#[derive(Debug, Clone, PartialEq)]
pub enum SseLine {
    /// Data payload, prefix and surrounding whitespace removed
    Data(String),
    /// Event type declaration (e.g., "event: cmpl")
    Event(String),
    /// Empty line
    Empty,
    /// Comment or anything unrecognized
    Other(String),
}

/// Typed events from the Kimi completion stream.
///
/// Events are yielded in arrival order. Kinds the decoder does not know are
/// dropped before they reach this type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StreamEvent {
    /// Fragment of generated text (`cmpl`)
    #[serde(rename = "cmpl")]
    Completion { text: String },
    /// The service started or reported a web search
    SearchInfo {
        search_type: String,
        hallucination: Map<String, Value>,
    },
    /// Status marker, usually the end of the answer
    Status,
}

impl StreamEvent {
    /// Wire discriminator for this event.
    pub fn kind(&self) -> &'static str {
        match self {
            StreamEvent::Completion { .. } => "cmpl",
            StreamEvent::SearchInfo { .. } => "search_info",
            StreamEvent::Status => "status",
        }
    }

    /// Text carried by a completion fragment.
    pub fn text(&self) -> Option<&str> {
        match self {
            StreamEvent::Completion { text } => Some(text),
            _ => None,
        }
    }
}

/// Concatenate the text of every completion fragment, in order.
pub fn collect_text(events: &[StreamEvent]) -> String {
    events.iter().filter_map(StreamEvent::text).collect()
}
