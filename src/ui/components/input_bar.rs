use eframe::egui;

/// Trả `true` khi người dùng bấm nút gửi hoặc nhấn Enter.
pub fn render(ui: &mut egui::Ui, input_text: &mut String) -> bool {
    let mut send = false;
    ui.horizontal(|ui| {
        let width = (ui.available_width() - 60.0).max(80.0);
        let response = ui.add(
            egui::TextEdit::singleline(input_text)
                .hint_text("輸入訊息...")
                .desired_width(width),
        );
        if ui.button("發送").clicked() {
            send = true;
        }

        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            send = true;
            response.request_focus();
        }
    });

    send
}
