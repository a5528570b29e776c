//! Result type alias for engine operations.

use super::kimi_error::KimiError;

/// Type alias for Results using KimiError.
///
/// # Example
///
/// ```ignore
/// use kimiai::error::KimiResult;
///
/// async fn first_chat(client: &KimiClient) -> KimiResult<String> {
///     let chat = client.create_chat("Notes").await?;
///     Ok(chat.conversation_id().to_string())
/// }
/// ```
pub type KimiResult<T> = Result<T, KimiError>;
