//! # BlockView Component
//!
//! Renders one revealed [`Block`](crate::core::model::Block) as a ratatui
//! `Paragraph`: headings, text, list items, code panels, tables, pixel art,
//! alert panels and rules.
//!
//! `BlockView` is transient like the other leaf components. `SlideView`
//! builds one per visible block per frame, asks it for its height so the
//! scroll view can be sized, then renders it.
//!
//! Styling is layered: the project default color/background, then the
//! kind's own look (H2 is cyan, table headers magenta), then the block's
//! `style[...]`/`meta[...]` directive on top.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block as Panel, BorderType, Padding, Paragraph, Widget, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::core::model::{Block, BlockKind, TableGrid};
use crate::tui::markdown;
use crate::tui::style::{alert_color, alignment, block_style, pixel_color};

/// Width of one pixel-art cell, in terminal columns.
const PIXEL_WIDTH: usize = 2;

/// Settings shared by every block on screen.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    /// Project default color/background from the front matter.
    pub base: Style,
    pub code_theme: String,
    pub line_numbers: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            base: Style::default(),
            code_theme: crate::core::config::DEFAULT_CODE_THEME.to_string(),
            line_numbers: true,
        }
    }
}

#[derive(Clone, Copy)]
pub struct BlockView<'a> {
    pub block: &'a Block,
    pub settings: &'a RenderSettings,
}

impl<'a> BlockView<'a> {
    pub fn new(block: &'a Block, settings: &'a RenderSettings) -> Self {
        Self { block, settings }
    }

    /// Rows the block occupies at `width`, borders and padding included.
    pub fn height(&self, width: u16) -> u16 {
        let (paragraph, overhead) = self.paragraph(width);
        let count = paragraph.line_count(width.saturating_sub(overhead).max(1));
        u16::try_from(count).unwrap_or(u16::MAX).max(1)
    }

    /// Blank rows left under the block before the next one.
    pub fn gap_after(&self) -> u16 {
        let kind = &self.block.kind;
        u16::from(*kind == BlockKind::Heading1 || kind.is_atomic())
    }

    /// The paragraph to draw plus its horizontal overhead (borders + padding).
    fn paragraph(&self, width: u16) -> (Paragraph<'static>, u16) {
        let spec = self.block.style.as_ref();
        let base = self.settings.base;
        let raw = self.block.raw_text.as_str();
        let padding = spec
            .and_then(|s| s.padding)
            .map(|p| Padding::new(p.left, p.right, p.top, p.bottom));
        let pad_h = padding.map_or(0, |p| p.left.saturating_add(p.right));

        let mut bordered: Option<Panel<'static>> = None;
        let (lines, style): (Vec<Line<'static>>, Style) = match &self.block.kind {
            BlockKind::Heading1 => {
                let style = block_style(
                    base.add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                    spec,
                );
                (vec![markdown::inline(raw, style)], style)
            }
            BlockKind::Heading2 => {
                let style = block_style(base.fg(Color::Cyan).add_modifier(Modifier::BOLD), spec);
                (vec![indented(markdown::inline(raw, style), "  ", style)], style)
            }
            BlockKind::Heading3 => {
                let style = block_style(base.fg(Color::Blue).add_modifier(Modifier::BOLD), spec);
                (vec![indented(markdown::inline(raw, style), "    ", style)], style)
            }
            BlockKind::Paragraph => {
                let style = block_style(base, spec);
                (markdown::inline_lines(raw, style), style)
            }
            BlockKind::ListItem { ordered, index } => {
                let style = block_style(base, spec);
                let marker = match (ordered, index) {
                    (true, Some(n)) => format!("{n}. "),
                    (true, None) => "1. ".to_string(),
                    (false, _) => "• ".to_string(),
                };
                let mut line = markdown::inline(raw, style);
                line.spans
                    .insert(0, Span::styled(marker, style.fg(Color::DarkGray)));
                (vec![line], style)
            }
            BlockKind::CodeFence { language } => {
                let mut surface = base;
                if let Some(bg) = markdown::code_background(&self.settings.code_theme) {
                    surface = surface.bg(bg);
                }
                let style = block_style(surface, spec);
                let mut panel = Panel::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::DarkGray));
                if let Some(lang) = language {
                    panel = panel.title(Span::styled(
                        format!(" {lang} "),
                        Style::default().add_modifier(Modifier::BOLD),
                    ));
                }
                bordered = Some(panel);
                let lines = markdown::highlight_code(
                    raw,
                    language.as_deref(),
                    &self.settings.code_theme,
                    self.settings.line_numbers,
                );
                (lines, style)
            }
            BlockKind::Table => {
                let style = block_style(base, spec);
                (table_lines(&self.block.table(), style), style)
            }
            BlockKind::HorizontalRule => {
                let style = block_style(base.add_modifier(Modifier::DIM), spec);
                let rule = "─".repeat(usize::from(width.saturating_sub(pad_h).max(1)));
                (vec![Line::from(Span::styled(rule, style))], style)
            }
            BlockKind::PixelImage => {
                let style = block_style(base, spec);
                (pixel_lines(&self.block.pixels()), style)
            }
            BlockKind::Alert { kind } => {
                let color = alert_color(*kind);
                let style = block_style(base, spec);
                bordered = Some(
                    Panel::bordered()
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(color))
                        .title(Span::styled(
                            format!(" {} ", kind.label()),
                            Style::default().fg(color).add_modifier(Modifier::BOLD),
                        )),
                );
                (markdown::inline_lines(raw, style), style)
            }
        };

        let (panel, overhead) = match (bordered, padding) {
            (Some(panel), pad) => {
                let pad = pad.unwrap_or(Padding::horizontal(1));
                let overhead = pad.left.saturating_add(pad.right).saturating_add(2);
                (Some(panel.padding(pad)), overhead)
            }
            (None, Some(pad)) => (
                Some(Panel::new().padding(pad)),
                pad.left.saturating_add(pad.right),
            ),
            (None, None) => (None, 0),
        };

        let mut paragraph = Paragraph::new(lines)
            .style(style)
            .alignment(alignment(spec.and_then(|s| s.align)))
            .wrap(Wrap { trim: false });
        if let Some(panel) = panel {
            paragraph = paragraph.block(panel);
        }
        (paragraph, overhead)
    }
}

impl Widget for BlockView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (paragraph, _) = self.paragraph(area.width);
        paragraph.render(area, buf);
    }
}

fn indented(mut line: Line<'static>, indent: &'static str, style: Style) -> Line<'static> {
    line.spans.insert(0, Span::styled(indent, style));
    line
}

/// Lay the grid out with every column as wide as its widest cell.
fn table_lines(grid: &TableGrid, style: Style) -> Vec<Line<'static>> {
    let columns = grid.columns();
    if columns == 0 {
        return Vec::new();
    }
    let mut widths = vec![0usize; columns];
    for row in std::iter::once(&grid.header).chain(grid.rows.iter()) {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }

    let border = style.fg(Color::DarkGray);
    let row_line = |cells: &[String], cell_style: Style| -> Line<'static> {
        let mut spans = Vec::with_capacity(columns * 2);
        for (i, width) in widths.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("│", border));
            }
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let pad = width.saturating_sub(cell.width());
            spans.push(Span::styled(
                format!(" {cell}{} ", " ".repeat(pad)),
                cell_style,
            ));
        }
        Line::from(spans)
    };

    let mut lines = Vec::with_capacity(grid.rows.len() + 2);
    lines.push(row_line(
        &grid.header,
        style.fg(Color::Magenta).add_modifier(Modifier::BOLD),
    ));
    let separator = widths
        .iter()
        .map(|w| "─".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("┼");
    lines.push(Line::from(Span::styled(separator, border)));
    for row in &grid.rows {
        lines.push(row_line(row, style));
    }
    lines
}

fn pixel_lines(pixels: &[Vec<Option<u8>>]) -> Vec<Line<'static>> {
    let cell = " ".repeat(PIXEL_WIDTH);
    pixels
        .iter()
        .map(|row| {
            Line::from(
                row.iter()
                    .map(|px| match px.and_then(pixel_color) {
                        Some(color) => Span::styled(cell.clone(), Style::default().bg(color)),
                        None => Span::raw(cell.clone()),
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect()
}
