//! Mapping from the core's library-free styling (`StyleSpec`, color strings,
//! palette indices) to ratatui styles.

use std::str::FromStr;

use ratatui::layout::Alignment;
use ratatui::style::{Color, Modifier, Style};

use crate::core::model::{AlertKind, Align, StyleSpec};

/// Pixel-art palette. Index 0 is transparent and never looked up.
pub const PIXEL_PALETTE: [Color; 10] = [
    Color::Reset,
    Color::Rgb(0xff, 0x55, 0x55), // red
    Color::Rgb(0x50, 0xfa, 0x7b), // green
    Color::Rgb(0xf1, 0xfa, 0x8c), // yellow
    Color::Rgb(0x62, 0x72, 0xa4), // blue
    Color::Rgb(0xff, 0x79, 0xc6), // pink
    Color::Rgb(0x8b, 0xe9, 0xfd), // cyan
    Color::Rgb(0xf8, 0xf8, 0xf2), // white
    Color::Rgb(0xff, 0xb8, 0x6c), // orange
    Color::Rgb(0xbd, 0x93, 0xf9), // purple
];

pub fn pixel_color(index: u8) -> Option<Color> {
    match index {
        1..=9 => Some(PIXEL_PALETTE[usize::from(index)]),
        _ => None,
    }
}

/// Parse a color name (`red`, `bright_cyan`, `dark_gray`) or `#rrggbb`.
pub fn parse_color(name: &str) -> Option<Color> {
    let name = name.trim().to_ascii_lowercase();
    if name.is_empty() {
        return None;
    }
    if let Some(base) = name.strip_prefix("bright_").or_else(|| name.strip_prefix("bright ")) {
        return match base {
            "black" => Some(Color::DarkGray),
            "white" => Some(Color::White),
            other => Color::from_str(&format!("light{other}")).ok(),
        };
    }
    match name.as_str() {
        // ANSI "white" is the dimmer of the two whites.
        "white" => Some(Color::Gray),
        "grey" => Some(Color::Gray),
        "dark_gray" | "dark_grey" => Some(Color::DarkGray),
        _ => Color::from_str(&name).ok(),
    }
}

fn modifier(token: &str) -> Option<Modifier> {
    match token.to_ascii_lowercase().as_str() {
        "bold" | "b" => Some(Modifier::BOLD),
        "italic" | "i" => Some(Modifier::ITALIC),
        "underline" | "u" => Some(Modifier::UNDERLINED),
        "strike" | "s" | "strikethrough" => Some(Modifier::CROSSED_OUT),
        "dim" => Some(Modifier::DIM),
        "reverse" | "r" => Some(Modifier::REVERSED),
        "blink" => Some(Modifier::SLOW_BLINK),
        _ => None,
    }
}

/// Apply free-form style tokens: modifiers, bare colors (foreground) and
/// `on <color>` (background). `not bold` removes a modifier. Unknown
/// tokens are skipped.
pub fn apply_tokens<'a>(mut style: Style, tokens: impl IntoIterator<Item = &'a str>) -> Style {
    let mut tokens = tokens.into_iter();
    while let Some(token) = tokens.next() {
        match token.to_ascii_lowercase().as_str() {
            "on" => {
                if let Some(color) = tokens.next().and_then(parse_color) {
                    style = style.bg(color);
                }
            }
            "not" => {
                if let Some(m) = tokens.next().and_then(modifier) {
                    style = style.remove_modifier(m);
                }
            }
            _ => {
                if let Some(m) = modifier(token) {
                    style = style.add_modifier(m);
                } else if let Some(color) = parse_color(token) {
                    style = style.fg(color);
                } else {
                    log::debug!("Ignoring unknown style token `{token}`");
                }
            }
        }
    }
    style
}

/// Overlay a block's `StyleSpec` on `base`.
pub fn block_style(base: Style, spec: Option<&StyleSpec>) -> Style {
    let Some(spec) = spec else {
        return base;
    };
    let mut style = base;
    if let Some(color) = spec.color.as_deref().and_then(parse_color) {
        style = style.fg(color);
    }
    if let Some(bg) = spec.background.as_deref().and_then(parse_color) {
        style = style.bg(bg);
    }
    apply_tokens(style, spec.modifier_tokens())
}

pub fn alignment(align: Option<Align>) -> Alignment {
    match align {
        Some(Align::Center) => Alignment::Center,
        Some(Align::Right) => Alignment::Right,
        Some(Align::Left) | None => Alignment::Left,
    }
}

pub fn alert_color(kind: AlertKind) -> Color {
    match kind {
        AlertKind::Note => Color::Blue,
        AlertKind::Tip => Color::Green,
        AlertKind::Important => Color::Magenta,
        AlertKind::Warning => Color::Yellow,
        AlertKind::Caution => Color::Red,
    }
}
