use serde::Serialize;

use super::file::FileType;
use super::message::{Message, Role};

/// Default chat name used by the web app
pub const DEFAULT_CHAT_NAME: &str = "New Chat";

/// Assistant profile the web app talks to
pub const DEFAULT_KIMIPLUS_ID: &str = "kimi";

/// Model requested for completions
pub const DEFAULT_MODEL: &str = "k2";

/// A message to send through a [`ChatSession`](crate::chat::ChatSession).
///
/// # Example
///
/// ```
/// use kimiai::models::{CompletionRequest, Message};
///
/// let request = CompletionRequest::new("And in Rust?")
///     .with_history(vec![
///         Message::user("How do I read a file in Python?"),
///         Message::assistant("Use open()."),
///     ])
///     .with_search(false);
///
/// assert_eq!(request.model, "k2");
/// assert!(!request.use_search);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// The user's prompt
    pub prompt: String,
    /// Prior turns, oldest first
    pub history: Vec<Message>,
    /// Let the service search the web
    pub use_search: bool,
    /// Ids of uploaded files to reference
    pub refs: Vec<String>,
    pub kimiplus_id: String,
    pub model: String,
}

impl CompletionRequest {
    /// Create a request with no history, web search enabled and no files.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            history: Vec::new(),
            use_search: true,
            refs: Vec::new(),
            kimiplus_id: DEFAULT_KIMIPLUS_ID.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_history(mut self, history: Vec<Message>) -> Self {
        self.history = history;
        self
    }

    pub fn with_search(mut self, use_search: bool) -> Self {
        self.use_search = use_search;
        self
    }

    /// Reference uploaded files by id.
    pub fn with_refs<I, S>(mut self, refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.refs = refs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_kimiplus_id(mut self, id: impl Into<String>) -> Self {
        self.kimiplus_id = id.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Build the wire body for the completion endpoint.
    pub(crate) fn to_payload(&self) -> CompletionPayload<'_> {
        CompletionPayload {
            messages: vec![MessageRef {
                role: Role::User,
                content: &self.prompt,
            }],
            history: self
                .history
                .iter()
                .map(|m| MessageRef {
                    role: m.role,
                    content: &m.content,
                })
                .collect(),
            kimiplus_id: &self.kimiplus_id,
            model: &self.model,
            use_search: self.use_search,
            refs: &self.refs,
            extend: Extend { sidebar: true },
            scene_labels: &[],
            use_deep_research: false,
            use_semantic_memory: false,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct MessageRef<'a> {
    pub role: Role,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct Extend {
    pub sidebar: bool,
}

/// Body of `POST /chat/{id}/completion/stream`
#[derive(Debug, Serialize)]
pub(crate) struct CompletionPayload<'a> {
    pub messages: Vec<MessageRef<'a>>,
    pub history: Vec<MessageRef<'a>>,
    pub kimiplus_id: &'a str,
    pub model: &'a str,
    pub use_search: bool,
    pub refs: &'a [String],
    pub extend: Extend,
    pub scene_labels: &'a [String],
    pub use_deep_research: bool,
    pub use_semantic_memory: bool,
}

/// Body of `POST /chat`
#[derive(Debug, Serialize)]
pub(crate) struct CreateChatRequest<'a> {
    pub name: &'a str,
    pub born_from: &'static str,
    pub kimiplus_id: &'static str,
    pub is_example: bool,
    pub source: &'static str,
    pub tags: [&'static str; 0],
}

impl<'a> CreateChatRequest<'a> {
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            born_from: "home",
            kimiplus_id: DEFAULT_KIMIPLUS_ID,
            is_example: false,
            source: "web",
            tags: [],
        }
    }
}

/// Body of `POST /pre-sign-url`
#[derive(Debug, Serialize)]
pub(crate) struct PreSignRequest<'a> {
    pub name: &'a str,
    pub action: FileType,
}

/// Body of `POST /file`
#[derive(Debug, Serialize)]
pub(crate) struct RegisterFileRequest<'a> {
    pub name: &'a str,
    pub object_name: &'a str,
    #[serde(rename = "type")]
    pub file_type: FileType,
    pub file_id: &'a str,
}

/// Body of `POST /file/parse_process`
#[derive(Debug, Serialize)]
pub(crate) struct ParseProcessRequest<'a> {
    pub ids: [&'a str; 1],
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_completion_defaults() {
        let request = CompletionRequest::new("hi");
        assert_eq!(request.kimiplus_id, "kimi");
        assert_eq!(request.model, "k2");
        assert!(request.use_search);
        assert!(request.history.is_empty());
        assert!(request.refs.is_empty());
    }

    #[test]
    fn test_completion_payload_shape() {
        let request = CompletionRequest::new("What is in the file?")
            .with_history(vec![Message::user("Hello"), Message::assistant("Hi")])
            .with_search(false)
            .with_refs(["file-1"]);

        let json = serde_json::to_value(request.to_payload()).unwrap();
        assert_eq!(
            json,
            json!({
                "messages": [{"role": "user", "content": "What is in the file?"}],
                "history": [
                    {"role": "user", "content": "Hello"},
                    {"role": "assistant", "content": "Hi"}
                ],
                "kimiplus_id": "kimi",
                "model": "k2",
                "use_search": false,
                "refs": ["file-1"],
                "extend": {"sidebar": true},
                "scene_labels": [],
                "use_deep_research": false,
                "use_semantic_memory": false
            })
        );
    }

    #[test]
    fn test_model_override() {
        let request = CompletionRequest::new("x")
            .with_model("k1.5")
            .with_kimiplus_id("custom");
        let json = serde_json::to_value(request.to_payload()).unwrap();
        assert_eq!(json["model"], "k1.5");
        assert_eq!(json["kimiplus_id"], "custom");
    }

    #[test]
    fn test_create_chat_body() {
        let json = serde_json::to_value(CreateChatRequest::new(DEFAULT_CHAT_NAME)).unwrap();
        assert_eq!(
            json,
            json!({
                "name": "New Chat",
                "born_from": "home",
                "kimiplus_id": "kimi",
                "is_example": false,
                "source": "web",
                "tags": []
            })
        );
    }

    #[test]
    fn test_upload_bodies() {
        let json = serde_json::to_value(PreSignRequest {
            name: "photo.JPG",
            action: FileType::Image,
        })
        .unwrap();
        assert_eq!(json, json!({"name": "photo.JPG", "action": "image"}));

        let json = serde_json::to_value(RegisterFileRequest {
            name: "report.pdf",
            object_name: "obj/1",
            file_type: FileType::File,
            file_id: "",
        })
        .unwrap();
        assert_eq!(
            json,
            json!({"name": "report.pdf", "object_name": "obj/1", "type": "file", "file_id": ""})
        );

        let json = serde_json::to_value(ParseProcessRequest { ids: ["f-9"] }).unwrap();
        assert_eq!(json, json!({"ids": ["f-9"]}));
    }
}
