//! Cookie-based authentication.

pub mod cookies;
pub mod credentials;

pub use cookies::{Cookie, CookieJar};
pub use credentials::{extract_credential, load_credential, Credential, AUTH_COOKIE_NAME};
