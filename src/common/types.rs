use serde::{Deserialize, Serialize};

use crate::format;

/// Người gửi của một tin nhắn trong transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// Domain model đại diện một tin nhắn chat.
///
/// `is_structured` được tính một lần khi tạo, không đổi sau khi đã append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub raw_text: String,
    pub is_structured: bool,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            raw_text: text.into(),
            is_structured: false,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        let raw_text = text.into();
        let is_structured = format::is_structured(&raw_text);
        Self {
            sender: Sender::Bot,
            raw_text,
            is_structured,
        }
    }
}

/// Body gửi lên endpoint `/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Body nhận về từ endpoint `/chat`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub response: Option<serde_json::Value>,
}

impl ChatResponse {
    /// Lấy nội dung trả lời; chỉ chấp nhận chuỗi.
    ///
    /// Field thiếu, `null` hoặc không phải chuỗi đều trả `None`.
    pub fn into_reply(self) -> Option<String> {
        match self.response {
            Some(serde_json::Value::String(text)) => Some(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_are_never_structured() {
        let msg = ChatMessage::user("🌡️ 氣溫: 25°C\n");
        assert_eq!(msg.sender, Sender::User);
        assert!(!msg.is_structured);
    }

    #[test]
    fn bot_messages_are_classified_on_creation() {
        assert!(ChatMessage::bot("line one\nline two").is_structured);
        assert!(!ChatMessage::bot("你好，有什麼可以幫忙？").is_structured);
    }

    #[test]
    fn request_serializes_message_field() {
        let body = serde_json::to_value(ChatRequest {
            message: "你好".to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "message": "你好" }));
    }

    #[test]
    fn response_reply_extraction() {
        let parsed: ChatResponse = serde_json::from_str(r#"{"response":"hi"}"#).unwrap();
        assert_eq!(parsed.into_reply(), Some("hi".to_string()));

        let empty: ChatResponse = serde_json::from_str(r#"{"response":""}"#).unwrap();
        assert_eq!(empty.into_reply(), Some(String::new()));
    }

    #[test]
    fn response_without_string_reply_has_no_reply() {
        for body in [
            r#"{"other":1}"#,
            r#"{"response":null}"#,
            r#"{"response":42}"#,
            r#"{"response":["a"]}"#,
        ] {
            let parsed: ChatResponse = serde_json::from_str(body).unwrap();
            assert_eq!(parsed.into_reply(), None, "{body}");
        }
    }
}
