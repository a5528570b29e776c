//! kimiai - an async client engine for the Kimi web chat
//!
//! Authenticates with cookies exported from a browser session, creates
//! conversations, uploads attachments and streams answers as typed events.
//!
//! ```no_run
//! use futures::StreamExt;
//! use kimiai::{CompletionRequest, KimiClient, SessionConfig, StreamEvent};
//!
//! # async fn run() -> kimiai::KimiResult<()> {
//! let client = KimiClient::new(SessionConfig::new())?;
//! let chat = client.create_chat_default().await?;
//!
//! let mut events = chat.send(&CompletionRequest::new("Hello!")).await?;
//! while let Some(event) = events.next().await {
//!     match event? {
//!         StreamEvent::Completion { text } => print!("{}", text),
//!         StreamEvent::SearchInfo { search_type, .. } => println!("[searching: {}]", search_type),
//!         StreamEvent::Status => {}
//!     }
//! }
//! client.close().await;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod auth;
pub mod chat;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod sse;
pub mod traits;
mod upload;

pub use chat::{ChatSession, EventStream};
pub use client::KimiClient;
pub use config::SessionConfig;
pub use error::{ApiError, AuthError, ErrorCategory, KimiError, KimiResult, UploadError, UploadStep};
pub use models::{CompletionRequest, FileType, Message, Role, UploadedFile};
pub use sse::{collect_text, StreamEvent};
