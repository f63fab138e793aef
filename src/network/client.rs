use std::sync::Arc;

use tokio::sync::mpsc;

use crate::common::{NetworkEvent, UiCommand};

use super::backend::ChatBackend;

/// Chuỗi lỗi cố định hiển thị cho người dùng khi request thất bại.
pub const ERROR_REPLY: &str = "抱歉，發生錯誤，請稍後再試。";

/// Vòng lặp mạng: nhận lệnh từ UI, mỗi lệnh gửi đúng một request.
pub struct ChatClient<B> {
    backend: Arc<B>,
    event_sender: mpsc::Sender<NetworkEvent>,
    command_receiver: mpsc::Receiver<UiCommand>,
}

impl<B: ChatBackend + 'static> ChatClient<B> {
    pub fn new(
        backend: B,
        event_sender: mpsc::Sender<NetworkEvent>,
        command_receiver: mpsc::Receiver<UiCommand>,
    ) -> Self {
        Self {
            backend: Arc::new(backend),
            event_sender,
            command_receiver,
        }
    }

    pub async fn run(mut self) {
        log::info!("Network event loop started");

        while let Some(command) = self.command_receiver.recv().await {
            self.handle_command(command);
        }

        log::info!("Command channel closed; network event loop stopped");
    }

    fn handle_command(&self, command: UiCommand) {
        match command {
            UiCommand::SendMessage(content) => {
                // Không chặn gửi chồng: mỗi request chạy độc lập,
                // trả lời về theo thứ tự hoàn thành.
                let backend = Arc::clone(&self.backend);
                let event_sender = self.event_sender.clone();

                tokio::spawn(async move {
                    let reply = fetch_bot_response(backend.as_ref(), &content).await;
                    if let Err(err) = event_sender.send(NetworkEvent::BotReply(reply)).await {
                        log::warn!("Failed to notify UI about bot reply: {err}");
                    }
                });
            }
        }
    }
}

/// Gửi một request; lỗi bị nuốt thành [`ERROR_REPLY`] sau khi ghi log.
pub async fn fetch_bot_response<B: ChatBackend + ?Sized>(backend: &B, message: &str) -> String {
    match backend.fetch_reply(message).await {
        Ok(reply) => reply,
        Err(err) => {
            log::error!("Chat request failed: {err}");
            ERROR_REPLY.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::network::ChatError;

    #[derive(Default)]
    struct RecordingBackend {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ChatBackend for RecordingBackend {
        async fn fetch_reply(&self, message: &str) -> Result<String, ChatError> {
            self.calls.lock().unwrap().push(message.to_string());
            Ok(format!("echo: {message}"))
        }
    }

    struct FailingBackend;

    #[async_trait]
    impl ChatBackend for FailingBackend {
        async fn fetch_reply(&self, _message: &str) -> Result<String, ChatError> {
            let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
            Err(ChatError::Decode(err))
        }
    }

    #[tokio::test]
    async fn successful_request_returns_reply() {
        let backend = RecordingBackend::default();
        let reply = fetch_bot_response(&backend, "你好").await;

        assert_eq!(reply, "echo: 你好");
        assert_eq!(*backend.calls.lock().unwrap(), vec!["你好".to_string()]);
    }

    #[tokio::test]
    async fn failed_request_returns_fixed_error_reply() {
        assert_eq!(fetch_bot_response(&FailingBackend, "你好").await, ERROR_REPLY);
    }

    struct NoReplyBackend;

    #[async_trait]
    impl ChatBackend for NoReplyBackend {
        async fn fetch_reply(&self, _message: &str) -> Result<String, ChatError> {
            Err(ChatError::MissingReply)
        }
    }

    #[tokio::test]
    async fn reply_without_response_field_returns_fixed_error_reply() {
        assert_eq!(fetch_bot_response(&NoReplyBackend, "你好").await, ERROR_REPLY);
    }

    #[tokio::test]
    async fn each_command_yields_exactly_one_reply() {
        let (cmd_tx, cmd_rx) = mpsc::channel(8);
        let (event_tx, mut event_rx) = mpsc::channel(8);
        let handle = tokio::spawn(ChatClient::new(RecordingBackend::default(), event_tx, cmd_rx).run());

        cmd_tx
            .send(UiCommand::SendMessage("你好".to_string()))
            .await
            .unwrap();
        assert_eq!(
            event_rx.recv().await,
            Some(NetworkEvent::BotReply("echo: 你好".to_string()))
        );

        drop(cmd_tx);
        handle.await.unwrap();
        assert_eq!(event_rx.recv().await, None);
    }

    #[tokio::test]
    async fn overlapping_sends_resolve_independently() {
        let (cmd_tx, cmd_rx) = mpsc::channel(8);
        let (event_tx, mut event_rx) = mpsc::channel(8);
        tokio::spawn(ChatClient::new(RecordingBackend::default(), event_tx, cmd_rx).run());

        for text in ["一", "二"] {
            cmd_tx
                .send(UiCommand::SendMessage(text.to_string()))
                .await
                .unwrap();
        }

        let mut replies = Vec::new();
        for _ in 0..2 {
            match event_rx.recv().await {
                Some(NetworkEvent::BotReply(reply)) => replies.push(reply),
                None => panic!("event channel closed early"),
            }
        }
        replies.sort();
        assert_eq!(replies, vec!["echo: 一".to_string(), "echo: 二".to_string()]);
    }

    #[tokio::test]
    async fn failing_backend_reports_error_reply_to_ui() {
        let (cmd_tx, cmd_rx) = mpsc::channel(8);
        let (event_tx, mut event_rx) = mpsc::channel(8);
        tokio::spawn(ChatClient::new(FailingBackend, event_tx, cmd_rx).run());

        cmd_tx
            .send(UiCommand::SendMessage("天氣".to_string()))
            .await
            .unwrap();
        assert_eq!(
            event_rx.recv().await,
            Some(NetworkEvent::BotReply(ERROR_REPLY.to_string()))
        );
    }
}
