//! Block text → ratatui `Line`s.
//!
//! Slides are already split into blocks by the core parser, so this module
//! only deals with what is left inside one block: inline emphasis
//! (`**bold**`, `*italic*`, `~~strike~~`, `` `code` ``, `<ins>`, links) via
//! `pulldown_cmark`, and syntect highlighting for code fences.

use std::sync::LazyLock;

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::core::config::DEFAULT_CODE_THEME;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const TAB: &str = "    ";

/// Render one line of block text with inline formatting layered on `base`.
///
/// Returns owned spans (`'static`) so callers aren't constrained by input lifetime.
pub fn inline(content: &str, base: Style) -> Line<'static> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);

    let mut w = Writer::new(base);
    for (event, range) in Parser::new_ext(content, opts).into_offset_iter() {
        match event {
            // A paragraph line like `1) step` parses as a list; keep its marker.
            Event::Start(Tag::Item) => w.item_marker(&content[range]),
            event => w.handle(event),
        }
    }
    w.line
}

/// Render each line of `content` with [`inline`]. Blank lines stay blank.
pub fn inline_lines(content: &str, base: Style) -> Vec<Line<'static>> {
    content
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                Line::default()
            } else {
                inline(line, base)
            }
        })
        .collect()
}

// ── Writer ──────────────────────────────────────────────────────────────────

struct Writer {
    line: Line<'static>,
    base: Style,
    /// Inline style stack. Styles compose via `patch` so nested bold+italic works.
    styles: Vec<Style>,
    /// Stored link URL, appended after the link text closes.
    link_url: Option<String>,
}

impl Writer {
    fn new(base: Style) -> Self {
        Self {
            line: Line::default(),
            base,
            styles: vec![],
            link_url: None,
        }
    }

    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or(self.base)
    }

    fn push_style(&mut self, overlay: Style) {
        self.styles.push(self.style().patch(overlay));
    }

    fn pop_style(&mut self) {
        self.styles.pop();
    }

    fn push_span(&mut self, span: Span<'static>) {
        self.line.push_span(span);
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(tag) => self.close(tag),
            Event::Text(t) => self.text(t),
            Event::Code(c) => self.inline_code(c),
            Event::InlineHtml(html) | Event::Html(html) => self.html(&html),
            Event::SoftBreak | Event::HardBreak => self.push_span(Span::styled(" ", self.style())),
            _ => {}
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.link_url = Some(dest_url.to_string());
                self.push_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::UNDERLINED),
                );
            }
            _ => {}
        }
    }

    fn close(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.pop_style(),
            TagEnd::Link => {
                self.pop_style();
                if let Some(url) = self.link_url.take() {
                    let dim = self.base.add_modifier(Modifier::DIM);
                    self.push_span(Span::styled(format!(" ({url})"), dim));
                }
            }
            _ => {}
        }
    }

    fn item_marker(&mut self, source: &str) {
        if let Some(marker) = source.split_whitespace().next() {
            self.push_span(Span::styled(format!("{marker} "), self.style()));
        }
    }

    fn html(&mut self, html: &str) {
        match html.trim().to_ascii_lowercase().as_str() {
            "<ins>" | "<u>" => {
                self.push_style(Style::default().add_modifier(Modifier::UNDERLINED))
            }
            "</ins>" | "</u>" => self.pop_style(),
            // <sub>, <sup>, <br> and friends: drop the tag, keep the text.
            _ => {}
        }
    }

    fn text(&mut self, cow: CowStr<'_>) {
        // ratatui renders \t as zero-width
        let text = cow.replace('\t', TAB);
        let style = self.style();
        self.push_span(Span::styled(text, style));
    }

    fn inline_code(&mut self, cow: CowStr<'_>) {
        let style = self.style().fg(Color::White).bg(Color::DarkGray);
        self.push_span(Span::styled(cow.to_string(), style));
    }
}

// ── Code fences ─────────────────────────────────────────────────────────────

/// Whether syntect ships a theme by this name.
pub fn theme_exists(name: &str) -> bool {
    THEME_SET.themes.contains_key(name)
}

fn theme(name: &str) -> Option<&'static Theme> {
    THEME_SET
        .themes
        .get(name)
        .or_else(|| THEME_SET.themes.get(DEFAULT_CODE_THEME))
}

/// Background of the named theme, used to paint the code panel.
pub fn code_background(theme_name: &str) -> Option<Color> {
    theme(theme_name)
        .and_then(|t| t.settings.background)
        .map(|c| Color::Rgb(c.r, c.g, c.b))
}

/// Highlight a code fence. Unknown languages (and a missing theme) fall
/// back to plain white text.
pub fn highlight_code(
    code: &str,
    language: Option<&str>,
    theme_name: &str,
    line_numbers: bool,
) -> Vec<Line<'static>> {
    let syntax = language
        .filter(|l| !l.is_empty())
        .and_then(|l| SYNTAX_SET.find_syntax_by_token(l));
    let mut highlighter = match (syntax, theme(theme_name)) {
        (Some(syn), Some(theme)) => Some(HighlightLines::new(syn, theme)),
        _ => None,
    };

    let count = code.lines().count();
    let gutter_width = count.to_string().len();
    let gutter_style = Style::default().fg(Color::DarkGray);

    let mut out = Vec::with_capacity(count);
    for (i, line) in LinesWithEndings::from(code).enumerate() {
        let mut spans = Vec::new();
        if line_numbers {
            spans.push(Span::styled(
                format!("{:>gutter_width$} │ ", i + 1),
                gutter_style,
            ));
        }
        match highlighter
            .as_mut()
            .and_then(|hl| hl.highlight_line(line, &SYNTAX_SET).ok())
        {
            Some(ranges) => {
                for (hl_style, frag) in ranges {
                    let content = frag.trim_end_matches(['\n', '\r']).replace('\t', TAB);
                    if content.is_empty() {
                        continue;
                    }
                    let fg = Color::Rgb(
                        hl_style.foreground.r,
                        hl_style.foreground.g,
                        hl_style.foreground.b,
                    );
                    spans.push(Span::styled(content, Style::default().fg(fg)));
                }
            }
            None => {
                let content = line.trim_end_matches(['\n', '\r']).replace('\t', TAB);
                spans.push(Span::styled(content, Style::default().fg(Color::White)));
            }
        }
        out.push(Line::from(spans));
    }
    out
}
