//! Đọc lại markup do formatter sinh ra để hiển thị trên egui.
//!
//! Chỉ hiểu các thẻ mà chính formatter dùng: `span`, `a`, `hr`, `br`.
//! Thẻ lạ bị bỏ qua, văn bản giữ nguyên.

use once_cell::sync::Lazy;
use regex::Regex;

static ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z][\w-]*)\s*=\s*"([^"]*)""#).expect("attribute regex pattern is valid")
});

/// Kiểu chữ của một đoạn văn bản.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStyle {
    pub color: Option<[u8; 3]>,
    pub bold: bool,
    /// Hệ số cỡ chữ (`font-size: 1.1em` → 1.1).
    pub scale: f32,
    pub class: Option<String>,
    pub link: Option<String>,
}

impl Default for RunStyle {
    fn default() -> Self {
        Self {
            color: None,
            bold: false,
            scale: 1.0,
            class: None,
            link: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text { text: String, style: RunStyle },
    /// Đường kẻ ngang giữa các phần.
    Rule,
}

pub fn parse(markup: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut stack = vec![RunStyle::default()];
    let mut text = String::new();
    let mut rest = markup;

    while let Some(open) = rest.find('<') {
        let after = &rest[open + 1..];
        let is_tag = after
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '/');
        let close = after.find('>');

        let (Some(close), true) = (close, is_tag) else {
            text.push_str(&rest[..=open]);
            rest = after;
            continue;
        };

        text.push_str(&rest[..open]);
        let tag = &after[..close];
        rest = &after[close + 1..];

        let current = stack.last().cloned().unwrap_or_default();
        flush(&mut nodes, &mut text, &current);

        if tag.starts_with('/') {
            if stack.len() > 1 {
                stack.pop();
            }
            continue;
        }

        let name = tag
            .split(|c: char| c.is_whitespace() || c == '/')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match name.as_str() {
            "hr" => nodes.push(Node::Rule),
            "br" => text.push('\n'),
            _ if tag.ends_with('/') => {}
            "span" | "a" => stack.push(apply_attributes(current, tag)),
            _ => stack.push(current),
        }
    }

    text.push_str(rest);
    let current = stack.last().cloned().unwrap_or_default();
    flush(&mut nodes, &mut text, &current);
    nodes
}

/// Bỏ toàn bộ thẻ, chỉ giữ văn bản hiển thị.
pub fn strip(markup: &str) -> String {
    parse(markup)
        .into_iter()
        .filter_map(|node| match node {
            Node::Text { text, .. } => Some(text),
            Node::Rule => None,
        })
        .collect()
}

fn flush(nodes: &mut Vec<Node>, text: &mut String, style: &RunStyle) {
    if text.is_empty() {
        return;
    }
    nodes.push(Node::Text {
        text: std::mem::take(text),
        style: style.clone(),
    });
}

fn apply_attributes(mut style: RunStyle, tag: &str) -> RunStyle {
    for caps in ATTR_RE.captures_iter(tag) {
        let value = &caps[2];
        match caps[1].to_ascii_lowercase().as_str() {
            "style" => apply_declarations(&mut style, value),
            "class" => style.class = Some(value.to_string()),
            "href" => style.link = Some(value.to_string()),
            _ => {}
        }
    }
    style
}

fn apply_declarations(style: &mut RunStyle, declarations: &str) {
    for declaration in declarations.split(';') {
        let Some((key, value)) = declaration.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "color" => style.color = parse_hex_color(value).or(style.color),
            "font-weight" => style.bold = value == "bold",
            "font-size" => {
                if let Some(scale) = value.strip_suffix("em").and_then(|v| v.parse().ok()) {
                    style.scale = scale;
                }
            }
            _ => {}
        }
    }
}

fn parse_hex_color(value: &str) -> Option<[u8; 3]> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}
