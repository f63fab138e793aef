use eframe::egui;
use tokio::sync::mpsc;

use crate::common::{NetworkEvent, UiCommand};
use crate::network::ERROR_REPLY;

use super::components::{chat_area, input_bar, typing_indicator};
use super::state::AppState;

pub struct ChatApp {
    state: AppState,
    title: String,
    command_sender: mpsc::Sender<UiCommand>,
    event_receiver: mpsc::Receiver<NetworkEvent>,
}

impl ChatApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        title: String,
        command_sender: mpsc::Sender<UiCommand>,
        event_receiver: mpsc::Receiver<NetworkEvent>,
    ) -> Self {
        // Bảng màu của formatter được chọn cho nền sáng
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        Self {
            state: AppState::new(),
            title,
            command_sender,
            event_receiver,
        }
    }

    fn handle_network_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            match event {
                NetworkEvent::BotReply(reply) => self.state.receive_reply(reply),
            }
        }
    }

    fn send_command(&mut self, payload: String) {
        if let Err(err) = self
            .command_sender
            .try_send(UiCommand::SendMessage(payload))
        {
            // Request không bao giờ được gửi, vẫn phải có đúng một trả lời
            log::error!("Failed to send command to network: {err}");
            self.state.receive_reply(ERROR_REPLY.to_string());
        }
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_network_events();

        egui::TopBottomPanel::bottom("input_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            typing_indicator::render(ui, self.state.typing);
            if input_bar::render(ui, &mut self.state.input_text) {
                if let Some(content) = self.state.send_message() {
                    self.send_command(content);
                }
            }
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(&self.title);
            ui.separator();
            chat_area::render(ui, &self.state.transcript);
        });

        ctx.request_repaint();
    }
}
