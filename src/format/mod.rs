//! Phân loại và định dạng trả lời của bot.

pub mod markup;
pub mod rules;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::common::ChatMessage;

use rules::FormattingRule;

/// Dấu phân cách giữa các phần của một trả lời ghép (30 ký tự `=`).
pub const SECTION_SEPARATOR: &str = "==============================";

/// Markup nối các phần đã định dạng lại với nhau.
pub const SECTION_RULE: &str = r#"<hr style="border: 1px dashed #ccc; margin: 10px 0;">"#;

/// Kết quả định dạng cho một tin nhắn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// Hiển thị nguyên văn, không diễn giải markup.
    Plain(String),
    Markup(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    Weather,
    Transportation,
    Generic,
}

type Predicate = fn(&str) -> bool;

const FLAVORS: [(Predicate, Flavor); 2] = [
    (is_weather, Flavor::Weather),
    (is_transportation, Flavor::Transportation),
];

const STRUCTURED_MARKERS: [&str; 8] = ["\n", "┌", "│", "=====", "📍", "🌡️", "☔", "氣溫:"];

static OPTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"選項\s[0-9]+:").expect("option regex pattern is valid"));

fn is_weather(text: &str) -> bool {
    text.contains("🌡️") || text.contains("氣溫:")
}

fn is_transportation(text: &str) -> bool {
    text.contains("📍") || text.contains("選項")
}

impl Flavor {
    /// Predicate đầu tiên khớp sẽ quyết định loại.
    pub fn classify(text: &str) -> Self {
        FLAVORS
            .iter()
            .find(|(matches, _)| matches(text))
            .map(|(_, flavor)| *flavor)
            .unwrap_or(Flavor::Generic)
    }

    pub fn rules(self) -> &'static [FormattingRule] {
        match self {
            Flavor::Weather => &rules::WEATHER_RULES,
            Flavor::Transportation => &rules::TRANSPORTATION_RULES,
            Flavor::Generic => &rules::GENERIC_RULES,
        }
    }
}

/// Văn bản có nên đi nhánh định dạng hay không (chưa xét người gửi).
pub fn is_structured(text: &str) -> bool {
    STRUCTURED_MARKERS.iter().any(|marker| text.contains(marker)) || OPTION_RE.is_match(text)
}

/// Định dạng một trả lời có cấu trúc thành markup.
pub fn format_reply(text: &str) -> String {
    let combined = if text.contains(SECTION_SEPARATOR) {
        text.split(SECTION_SEPARATOR)
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(format_segment)
            .collect::<Vec<_>>()
            .join(SECTION_RULE)
    } else {
        let flavor = Flavor::classify(text);
        rules::apply_all(flavor.rules(), text)
    };

    rules::apply_all(&rules::POST_RULES, &combined)
}

// Trong trả lời ghép, phần không rõ loại được giữ nguyên.
fn format_segment(segment: &str) -> String {
    match Flavor::classify(segment) {
        Flavor::Generic => segment.to_string(),
        flavor => rules::apply_all(flavor.rules(), segment),
    }
}

pub fn render(message: &ChatMessage) -> Rendered {
    if message.is_structured {
        Rendered::Markup(format_reply(&message.raw_text))
    } else {
        Rendered::Plain(message.raw_text.clone())
    }
}
