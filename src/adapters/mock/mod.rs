//! Mock implementations for testing.
//!
//! - [`MockTransport`] - HTTP transport with configurable responses

pub mod http;

pub use http::{MockResponse, MockTransport, RecordedRequest};
