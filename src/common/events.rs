/// Sự kiện từ tầng mạng gửi lên UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkEvent {
    /// Trả lời của bot, hoặc chuỗi lỗi cố định khi request thất bại.
    BotReply(String),
}
