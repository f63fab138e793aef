use crate::common::ChatMessage;
use crate::format::{self, Rendered, markup};

/// Cách hiển thị đã tính sẵn của một tin nhắn, để không chạy regex mỗi frame.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageView {
    Plain(String),
    Styled(Vec<markup::Node>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    pub message: ChatMessage,
    pub view: MessageView,
}

impl TranscriptEntry {
    fn new(message: ChatMessage) -> Self {
        let view = match format::render(&message) {
            Rendered::Plain(text) => MessageView::Plain(text),
            Rendered::Markup(markup) => MessageView::Styled(markup::parse(&markup)),
        };
        Self { message, view }
    }
}

/// Trạng thái cục bộ của UI.
pub struct AppState {
    /// Chỉ append, không sửa, không xoá.
    pub transcript: Vec<TranscriptEntry>,
    pub input_text: String,
    /// Hiện "bot đang trả lời".
    pub typing: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            transcript: Vec::new(),
            input_text: String::new(),
            typing: false,
        }
    }

    pub fn push_message(&mut self, message: ChatMessage) {
        self.transcript.push(TranscriptEntry::new(message));
    }

    /// Đọc ô nhập; rỗng sau khi trim thì bỏ qua và trả `None`.
    ///
    /// Ngược lại thêm tin của người dùng, xoá ô nhập, bật typing indicator
    /// và trả về nội dung cần gửi đi.
    pub fn send_message(&mut self) -> Option<String> {
        let message = self.input_text.trim().to_string();
        if message.is_empty() {
            return None;
        }

        self.push_message(ChatMessage::user(message.clone()));
        self.input_text.clear();
        self.typing = true;
        Some(message)
    }

    pub fn receive_reply(&mut self, reply: String) {
        self.typing = false;
        self.push_message(ChatMessage::bot(reply));
    }
}
