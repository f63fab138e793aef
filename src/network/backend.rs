use async_trait::async_trait;

use crate::common::{ChatRequest, ChatResponse};

use super::error::ChatError;

/// Nơi gửi câu hỏi và nhận trả lời từ bot.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn fetch_reply(&self, message: &str) -> Result<String, ChatError>;
}

/// Backend HTTP: `POST {endpoint}` với body `{"message": ...}`.
///
/// Không timeout, không retry; status code không được kiểm tra, chỉ cần body
/// là JSON hợp lệ có field `response` kiểu chuỗi.
pub struct HttpChatBackend {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpChatBackend {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn fetch_reply(&self, message: &str) -> Result<String, ChatError> {
        let body = ChatRequest {
            message: message.to_string(),
        };

        let response = self.http.post(&self.endpoint).json(&body).send().await?;
        log::debug!("Chat endpoint answered with status {}", response.status());

        let bytes = response.bytes().await?;
        let decoded: ChatResponse = serde_json::from_slice(&bytes)?;
        decoded.into_reply().ok_or(ChatError::MissingReply)
    }
}
