/// Lệnh UI gửi xuống tầng mạng.
#[derive(Debug, Clone)]
pub enum UiCommand {
    /// Gửi nội dung (đã trim) tới endpoint chat.
    SendMessage(String),
}
