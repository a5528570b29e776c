use serde::Deserialize;
use serde_json::{Map, Value};

use super::{deserialize_id, deserialize_nullable_string};

/// Response of `POST /chat`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CreateChatResponse {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
}

/// Response of `POST /pre-sign-url`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PreSignResponse {
    pub url: String,
    pub object_name: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub file_id: String,
}

/// Response of `POST /file`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RegisterFileResponse {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub object_name: Option<String>,
    #[serde(default, rename = "type")]
    pub file_type: Option<String>,
    #[serde(default)]
    pub meta: Option<Map<String, Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_chat_response() {
        let chat: CreateChatResponse = serde_json::from_str(r#"{"id":"abc123","name":"New Chat"}"#).unwrap();
        assert_eq!(chat.id, "abc123");

        let chat: CreateChatResponse = serde_json::from_str(r#"{"id":42}"#).unwrap();
        assert_eq!(chat.id, "42");

        assert!(serde_json::from_str::<CreateChatResponse>(r#"{"name":"x"}"#).is_err());
    }

    #[test]
    fn test_pre_sign_file_id_optional() {
        let pre: PreSignResponse =
            serde_json::from_str(r#"{"url":"https://s3/put","object_name":"o/1"}"#).unwrap();
        assert_eq!(pre.file_id, "");

        let pre: PreSignResponse = serde_json::from_str(
            r#"{"url":"https://s3/put","object_name":"o/1","file_id":null}"#,
        )
        .unwrap();
        assert_eq!(pre.file_id, "");

        let pre: PreSignResponse = serde_json::from_str(
            r#"{"url":"https://s3/put","object_name":"o/1","file_id":"fid"}"#,
        )
        .unwrap();
        assert_eq!(pre.file_id, "fid");
    }

    #[test]
    fn test_register_response_meta_optional() {
        let file: RegisterFileResponse = serde_json::from_str(
            r#"{"id":"f1","name":"a.pdf","object_name":"o/1","type":"file"}"#,
        )
        .unwrap();
        assert_eq!(file.id, "f1");
        assert!(file.meta.is_none());
        assert_eq!(file.file_type.as_deref(), Some("file"));
    }
}
