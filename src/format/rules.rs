//! Bảng quy tắc tô màu dựa trên regex.
//!
//! Thứ tự trong mỗi bảng là quan trọng: quy tắc sau chạy trên văn bản đã
//! được quy tắc trước bọc markup.

use once_cell::sync::Lazy;
use regex::Regex;

/// Một quy tắc: pattern + template bọc toàn bộ đoạn khớp.
pub struct FormattingRule {
    pub pattern: Regex,
    pub wrapper: &'static str,
}

impl FormattingRule {
    fn new(pattern: &str, wrapper: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("formatting rule pattern is valid"),
            wrapper,
        }
    }

    pub fn apply(&self, text: &str) -> String {
        self.pattern.replace_all(text, self.wrapper).into_owned()
    }
}

/// Áp dụng lần lượt mọi quy tắc, theo đúng thứ tự.
pub fn apply_all(rules: &[FormattingRule], text: &str) -> String {
    rules
        .iter()
        .fold(text.to_string(), |acc, rule| rule.apply(&acc))
}

const SEPARATOR_PATTERN: &str = r"={3,}";
const SEPARATOR_WRAPPER: &str = r#"<span style="color:#BDBDBD;">${0}</span>"#;

/// Phần còn lại của dòng: mọi ký tự trừ các ký tự kết thúc dòng
/// (`\r`, `\n`, U+2028, U+2029), giống `.` của trình duyệt.
const REST_OF_LINE: &str = r"[^\r\n\x{2028}\x{2029}]*";

// `prefix` tới hết dòng, kể cả `\n`.
fn line(prefix: &str) -> String {
    format!("{prefix}{REST_OF_LINE}\n")
}

// `prefix` tới trước ký tự xuống dòng.
fn rest_of(prefix: &str) -> String {
    format!("{prefix}{REST_OF_LINE}")
}

pub static WEATHER_RULES: Lazy<Vec<FormattingRule>> = Lazy::new(|| {
    vec![
        // Nhiệt độ
        FormattingRule::new(
            &line("🌡️"),
            r#"<span style="color:#FF5722;font-weight:bold;">${0}</span>"#,
        ),
        // Mưa
        FormattingRule::new(
            &line("☔"),
            r#"<span style="color:#2196F3;font-weight:bold;">${0}</span>"#,
        ),
        // Mây
        FormattingRule::new(
            &line("☁️"),
            r#"<span style="color:#607D8B;font-weight:bold;">${0}</span>"#,
        ),
        // Gió
        FormattingRule::new(
            &line("🌬️"),
            r#"<span style="color:#00BCD4;font-weight:bold;">${0}</span>"#,
        ),
        FormattingRule::new(&line("氣溫:"), r#"<span style="color:#FF5722;">${0}</span>"#),
        FormattingRule::new(&line("降雨機率:"), r#"<span style="color:#2196F3;">${0}</span>"#),
        // Tiêu đề
        FormattingRule::new(
            &line("天氣預報"),
            r#"<span style="color:#3F51B5;font-weight:bold;font-size:1.1em;">${0}</span>"#,
        ),
        FormattingRule::new(SEPARATOR_PATTERN, SEPARATOR_WRAPPER),
    ]
});

pub static TRANSPORTATION_RULES: Lazy<Vec<FormattingRule>> = Lazy::new(|| {
    vec![
        // Tiêu đề địa điểm
        FormattingRule::new(
            &line("📍"),
            r#"<span style="color:#2196F3;font-weight:bold;font-size:1.1em;">${0}</span>"#,
        ),
        FormattingRule::new(
            &rest_of(r"選項\s[0-9]+:"),
            r#"<span style="color:#4CAF50;font-weight:bold;">${0}</span>"#,
        ),
        FormattingRule::new(&line("⏱️"), r#"<span style="color:#FF9800;">${0}</span>"#),
        FormattingRule::new(&line("💰"), r#"<span style="color:#9C27B0;">${0}</span>"#),
        FormattingRule::new(&line("🛣️"), r#"<span style="color:#607D8B;">${0}</span>"#),
        FormattingRule::new(SEPARATOR_PATTERN, SEPARATOR_WRAPPER),
        // Màu của hai class này do style sheet quyết định
        FormattingRule::new(r"步驟 [0-9]+:", r#"<span class="step-text">${0}</span>"#),
        FormattingRule::new(&rest_of("交通方式:"), r#"<span class="transport-text">${0}</span>"#),
    ]
});

/// Văn bản không thuộc loại nào chỉ được tô màu đường phân cách.
pub static GENERIC_RULES: Lazy<Vec<FormattingRule>> =
    Lazy::new(|| vec![FormattingRule::new(SEPARATOR_PATTERN, SEPARATOR_WRAPPER)]);

/// Chạy trên markup cuối cùng, bất kể nhánh nào.
pub static POST_RULES: Lazy<Vec<FormattingRule>> = Lazy::new(|| {
    vec![
        // URL dừng trước `<` để không nuốt thẻ đóng của quy tắc trước.
        FormattingRule::new(
            r"Google Maps導航: (https://[^\s<]+)",
            r#"Google Maps導航: <a class="google-maps-link" href="${1}" target="_blank">${1}</a>"#,
        ),
        FormattingRule::new(r"步驟 1：\s*<br>", "步驟 1："),
    ]
});
