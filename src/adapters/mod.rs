//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestTransport`] - HTTP transport using reqwest
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockTransport`] - Configurable HTTP responses, request recording

pub mod mock;
pub mod reqwest_http;

pub use mock::{MockResponse, MockTransport};
pub use reqwest_http::ReqwestTransport;
