use eframe::egui;

pub fn render(ui: &mut egui::Ui, visible: bool) {
    if !visible {
        return;
    }

    ui.horizontal(|ui| {
        ui.spinner();
        ui.label(egui::RichText::new("正在輸入...").weak());
    });
}
