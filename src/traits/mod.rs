//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpTransport`] - single-attempt HTTP transport (buffered and streaming)

pub mod http;

pub use http::{ByteStream, Headers, HttpError, HttpTransport, Method, Request, RequestBody, Response};
