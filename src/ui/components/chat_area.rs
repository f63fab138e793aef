use eframe::egui::{self, Color32, FontId, Stroke, text::LayoutJob};

use crate::common::Sender;
use crate::format::markup::{Node, RunStyle};
use crate::ui::state::{MessageView, TranscriptEntry};

const USER_BUBBLE: Color32 = Color32::from_rgb(220, 240, 255);
const BOT_BUBBLE: Color32 = Color32::from_rgb(245, 245, 245);

pub fn render(ui: &mut egui::Ui, transcript: &[TranscriptEntry]) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for entry in transcript {
                render_entry(ui, entry);
                ui.add_space(6.0);
            }
        });
}

fn render_entry(ui: &mut egui::Ui, entry: &TranscriptEntry) {
    let (layout, fill) = match entry.message.sender {
        Sender::User => (egui::Layout::right_to_left(egui::Align::TOP), USER_BUBBLE),
        Sender::Bot => (egui::Layout::left_to_right(egui::Align::TOP), BOT_BUBBLE),
    };
    let max_width = ui.available_width() * 0.8;

    ui.with_layout(layout, |ui| {
        egui::Frame::group(ui.style()).fill(fill).show(ui, |ui| {
            ui.set_max_width(max_width);
            match &entry.view {
                MessageView::Plain(text) => {
                    ui.label(text);
                }
                MessageView::Styled(nodes) => render_styled(ui, nodes),
            }
        });
    });
}

// Mỗi `Node::Rule` tách văn bản thành một khối riêng, ngăn bởi separator.
fn render_styled(ui: &mut egui::Ui, nodes: &[Node]) {
    ui.vertical(|ui| {
        for (index, block) in nodes
            .split(|node| matches!(node, Node::Rule))
            .enumerate()
        {
            if index > 0 {
                ui.separator();
            }

            let (mut job, links) = layout_block(ui, block);
            job.wrap.max_width = ui.available_width();
            ui.label(job);

            for link in links {
                ui.hyperlink_to(format!("🔗 {link}"), link);
            }
        }
    });
}

fn layout_block(ui: &egui::Ui, block: &[Node]) -> (LayoutJob, Vec<String>) {
    let visuals = ui.visuals();
    let base_size = egui::TextStyle::Monospace.resolve(ui.style()).size;
    let mut job = LayoutJob::default();
    let mut links = Vec::new();

    for node in block {
        let Node::Text { text, style } = node else {
            continue;
        };

        let mut format = egui::TextFormat {
            font_id: FontId::monospace(base_size * style.scale),
            color: run_color(style, visuals),
            ..Default::default()
        };

        if let Some(link) = &style.link {
            format.color = visuals.hyperlink_color;
            format.underline = Stroke::new(1.0, visuals.hyperlink_color);
            if !links.contains(link) {
                links.push(link.clone());
            }
        }
        if style.class.as_deref() == Some("transport-text") {
            format.italics = true;
        }

        job.append(text, 0.0, format);
    }

    (job, links)
}

/// Màu của một đoạn: màu inline, rồi tới class, rồi màu chữ mặc định.
///
/// egui không có font đậm sẵn nên `bold` không màu được vẽ bằng strong color.
fn run_color(style: &RunStyle, visuals: &egui::Visuals) -> Color32 {
    if let Some([r, g, b]) = style.color {
        return Color32::from_rgb(r, g, b);
    }

    match style.class.as_deref() {
        Some("step-text") => visuals.strong_text_color(),
        _ if style.bold => visuals.strong_text_color(),
        _ => visuals.text_color(),
    }
}
