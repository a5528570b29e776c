//! Error handling for the Kimi engine.
//!
//! The taxonomy:
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | `Auth` | cookie file missing, unparsable, or without `kimi-auth` |
//! | `Api` | non-2xx response or transport failure (status `0`) |
//! | `Upload` | any step of the file upload pipeline fails |
//! | `ClientClosed` | the client was used after `close()` |
//! | `Internal` | anything else |
//!
//! Causes are kept and reachable through `std::error::Error::source`.
//!
//! # Example
//!
//! ```ignore
//! match client.create_chat("Notes").await {
//!     Ok(chat) => println!("chat {}", chat.conversation_id()),
//!     Err(KimiError::Api(err)) => eprintln!("{} -> {}", err.status(), err.body()),
//!     Err(err) => eprintln!("{} ({})", err, err.recovery_hint()),
//! }
//! ```

mod api;
mod auth;
mod category;
mod kimi_error;
mod result;
mod upload;

pub use api::{ApiError, NO_RESPONSE_BODY};
pub use auth::{AuthError, CookieParseError};
pub use category::ErrorCategory;
pub use kimi_error::{BoxError, KimiError};
pub use result::KimiResult;
pub use upload::{UploadError, UploadStep};
