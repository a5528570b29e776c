//! Completion stream decoding
//!
//! The chat-completion endpoint answers with server-sent events. Only
//! `data:` lines matter; each carries a JSON object whose `event` field is
//! the discriminator:
//! - `cmpl` - a fragment of generated text
//! - `search_info` - a web search notice
//! - `status` - a status marker
//!
//! Anything else is dropped, and malformed lines are logged and skipped.
//!
//! # Module structure
//! - `events` - Event types (StreamEvent, SseLine)
//! - `payloads` - Internal payload deserialization structs
//! - `parser` - Per-line parsing (parse_sse_line, parse_line)
//! - `decoder` - Byte-level framing (StreamDecoder, decode_stream)

mod decoder;
mod events;
mod parser;
mod payloads;

// Re-export public types
pub use decoder::{decode_stream, StreamDecoder, DEFAULT_LINE_LIMIT};
pub use events::{collect_text, SseLine, StreamEvent};
pub use parser::{parse_line, parse_sse_line, parse_stream_event};
