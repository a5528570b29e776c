//! Stream payload deserialization structs.
//!
//! Internal structs used to deserialize the JSON carried on `data:` lines.
//! Fields are optional because the service omits or nulls them freely.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Envelope read first to find the discriminator
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct EnvelopePayload {
    #[serde(default)]
    pub event: Option<Value>,
}

/// `cmpl` payload
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CompletionPayload {
    #[serde(default)]
    pub text: Option<String>,
}

/// `search_info` payload
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchInfoPayload {
    #[serde(default)]
    pub search_type: Option<String>,
    #[serde(default)]
    pub hallucination: Option<Map<String, Value>>,
}
