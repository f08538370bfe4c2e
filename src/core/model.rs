//! # Block & Page Model
//!
//! Plain data produced by the parser and read by the navigator and renderer.
//!
//! ```text
//! Presentation
//! ├── project_metadata: ProjectMetadata   // front matter defaults
//! ├── pages: Vec<Page>
//! │   └── Page
//! │       ├── title: String               // text of blocks[0]
//! │       └── blocks: Vec<Block>          // blocks[0] is always Heading1
//! │           └── Block { kind, raw_text, style, line }
//! └── diagnostics: Vec<Diagnostic>        // recovered parse problems
//! ```
//!
//! Nothing in here knows about a terminal. Colors stay strings and pixel
//! cells stay palette indices; the TUI adapter maps them to real styles.

use serde::Serialize;
use std::fmt;

/// GitHub-style call-out flavours (`> [!NOTE]` and friends).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Note,
    Tip,
    Important,
    Warning,
    Caution,
}

impl AlertKind {
    pub const ALL: [AlertKind; 5] = [
        AlertKind::Note,
        AlertKind::Tip,
        AlertKind::Important,
        AlertKind::Warning,
        AlertKind::Caution,
    ];

    /// Tag as written inside `[!...]`.
    pub fn tag(self) -> &'static str {
        match self {
            AlertKind::Note => "NOTE",
            AlertKind::Tip => "TIP",
            AlertKind::Important => "IMPORTANT",
            AlertKind::Warning => "WARNING",
            AlertKind::Caution => "CAUTION",
        }
    }

    /// Human label, used as panel title and as the body of an empty alert.
    pub fn label(self) -> &'static str {
        match self {
            AlertKind::Note => "Note",
            AlertKind::Tip => "Tip",
            AlertKind::Important => "Important",
            AlertKind::Warning => "Warning",
            AlertKind::Caution => "Caution",
        }
    }

    /// Case-insensitive lookup by tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag().eq_ignore_ascii_case(tag))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockKind {
    Heading1,
    Heading2,
    Heading3,
    Paragraph,
    ListItem { ordered: bool, index: Option<u64> },
    CodeFence { language: Option<String> },
    Table,
    HorizontalRule,
    PixelImage,
    Alert { kind: AlertKind },
}

impl BlockKind {
    /// Short name used in logs and CSS-like class names.
    pub fn name(&self) -> &'static str {
        match self {
            BlockKind::Heading1 => "h1",
            BlockKind::Heading2 => "h2",
            BlockKind::Heading3 => "h3",
            BlockKind::Paragraph => "text",
            BlockKind::ListItem { .. } => "list_item",
            BlockKind::CodeFence { .. } => "code",
            BlockKind::Table => "table",
            BlockKind::HorizontalRule => "hr",
            BlockKind::PixelImage => "image",
            BlockKind::Alert { .. } => "alert",
        }
    }

    /// Multi-line kinds are revealed as one unit.
    pub fn is_atomic(&self) -> bool {
        matches!(
            self,
            BlockKind::CodeFence { .. }
                | BlockKind::Table
                | BlockKind::PixelImage
                | BlockKind::Alert { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" => Some(Align::Left),
            "center" | "centre" => Some(Align::Center),
            "right" => Some(Align::Right),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

/// Whitespace around a block, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Padding {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Padding {
    pub fn uniform(value: u16) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn symmetric(vertical: u16, horizontal: u16) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Expand 1 to 4 values using CSS shorthand order.
    pub fn from_shorthand(values: &[u16]) -> Option<Self> {
        match *values {
            [all] => Some(Self::uniform(all)),
            [vertical, horizontal] => Some(Self::symmetric(vertical, horizontal)),
            [top, horizontal, bottom] => Some(Self {
                top,
                right: horizontal,
                bottom,
                left: horizontal,
            }),
            [top, right, bottom, left] => Some(Self {
                top,
                right,
                bottom,
                left,
            }),
            _ => None,
        }
    }

    /// Shortest shorthand that expands back to `self`.
    pub fn shorthand(&self) -> String {
        if *self == Self::uniform(self.top) {
            self.top.to_string()
        } else if *self == Self::symmetric(self.top, self.right) {
            format!("{} {}", self.top, self.right)
        } else {
            format!("{} {} {} {}", self.top, self.right, self.bottom, self.left)
        }
    }
}

/// Styling attached to one block by a `style[...]` or `meta[...]` directive.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StyleSpec {
    /// Tokens from `style[...]`, verbatim and in order.
    pub free_form_tokens: Vec<String>,
    pub color: Option<String>,
    pub background: Option<String>,
    /// Tokens from `meta[text:...]`.
    pub text_tokens: Vec<String>,
    pub align: Option<Align>,
    pub padding: Option<Padding>,
}

impl StyleSpec {
    /// True when only `style[...]` tokens are set.
    pub fn is_free_form_only(&self) -> bool {
        self.color.is_none()
            && self.background.is_none()
            && self.text_tokens.is_empty()
            && self.align.is_none()
            && self.padding.is_none()
    }

    /// Every modifier token, `style[...]` first, then `meta[text:...]`.
    pub fn modifier_tokens(&self) -> impl Iterator<Item = &str> {
        self.free_form_tokens
            .iter()
            .chain(self.text_tokens.iter())
            .map(String::as_str)
    }
}

/// One independently revealable unit of page content.
#[derive(Debug, Clone, Serialize)]
pub struct Block {
    pub kind: BlockKind,
    pub raw_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleSpec>,
    /// 1-based source line where the block starts.
    pub line: usize,
}

/// Blocks compare by content; the source line is bookkeeping.
impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.raw_text == other.raw_text && self.style == other.style
    }
}

impl Eq for Block {}

impl Block {
    pub fn new(kind: BlockKind, raw_text: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            raw_text: raw_text.into(),
            style: None,
            line,
        }
    }

    pub fn with_style(mut self, style: Option<StyleSpec>) -> Self {
        self.style = style;
        self
    }

    /// Lines of the block's content.
    pub fn lines(&self) -> std::str::Lines<'_> {
        self.raw_text.lines()
    }

    /// Split a `Table` block into header and body cells.
    ///
    /// Works on any block, but only tables produce something meaningful.
    pub fn table(&self) -> TableGrid {
        TableGrid::parse(&self.raw_text)
    }

    /// Decode a `PixelImage` block into palette indices, one row per
    /// non-empty line. `None` is a transparent cell.
    pub fn pixels(&self) -> Vec<Vec<Option<u8>>> {
        self.raw_text
            .lines()
            .map(str::trim_end)
            .filter(|row| !row.is_empty())
            .map(|row| row.chars().map(pixel_index).collect())
            .collect()
    }
}

fn pixel_index(cell: char) -> Option<u8> {
    match cell.to_digit(10) {
        Some(0) | None => None,
        Some(digit) => u8::try_from(digit).ok(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableGrid {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableGrid {
    fn parse(raw: &str) -> Self {
        let mut lines = raw.lines().map(str::trim).filter(|l| !l.is_empty());
        let Some(first) = lines.next() else {
            return Self::default();
        };
        let header = split_cells(first);
        let rows = lines
            .filter(|line| !is_separator_row(line))
            .map(split_cells)
            .collect();
        Self { header, rows }
    }

    /// Column count across header and rows.
    pub fn columns(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.header.len()))
            .max()
            .unwrap_or(0)
    }
}

fn split_cells(line: &str) -> Vec<String> {
    let inner = line.strip_prefix('|').unwrap_or(line);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(|cell| cell.trim().to_string()).collect()
}

/// `|---|:---:|` style rows between header and body.
pub fn is_separator_row(line: &str) -> bool {
    let line = line.trim();
    line.starts_with('|')
        && line.contains('-')
        && line.chars().all(|c| matches!(c, '|' | '-' | ':' | ' ' | '\t'))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub title: String,
    pub blocks: Vec<Block>,
}

impl Page {
    /// Open a page with its title block.
    pub fn new(heading: Block) -> Self {
        Self {
            title: heading.raw_text.clone(),
            blocks: vec![heading],
        }
    }

    /// Number of blocks after the title.
    pub fn body_len(&self) -> usize {
        self.blocks.len().saturating_sub(1)
    }
}

/// Document-wide defaults from the leading comment block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ProjectMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub default_color: Option<String>,
    pub default_background: Option<String>,
    pub show_table_of_contents: bool,
}

impl ProjectMetadata {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "detail", rename_all = "snake_case")]
pub enum DiagnosticKind {
    MalformedDirective(String),
    UnterminatedFence,
    EmptyBlock,
    ContentBeforeFirstPage,
    EmptyDocument,
}

/// A problem the parser recovered from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub line: usize,
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::MalformedDirective(reason) => {
                write!(f, "line {}: malformed directive ({reason})", self.line)
            }
            DiagnosticKind::UnterminatedFence => {
                write!(f, "line {}: fence never closed, ends at end of file", self.line)
            }
            DiagnosticKind::EmptyBlock => write!(f, "line {}: empty block dropped", self.line),
            DiagnosticKind::ContentBeforeFirstPage => {
                write!(f, "line {}: content before the first `# ` heading dropped", self.line)
            }
            DiagnosticKind::EmptyDocument => write!(f, "no `# ` heading found, no pages"),
        }
    }
}

/// Top-level parse result. Replaced wholesale when another file loads.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Presentation {
    pub project_metadata: ProjectMetadata,
    pub pages: Vec<Page>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl Presentation {
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn block_count(&self) -> usize {
        self.pages.iter().map(|page| page.blocks.len()).sum()
    }

    /// Page titles in order, for the contents page and overlay.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().map(|page| page.title.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_shorthand_expands_like_css() {
        assert_eq!(Padding::from_shorthand(&[2]), Some(Padding::uniform(2)));
        assert_eq!(
            Padding::from_shorthand(&[1, 4]),
            Some(Padding {
                top: 1,
                right: 4,
                bottom: 1,
                left: 4
            })
        );
        assert_eq!(
            Padding::from_shorthand(&[1, 2, 3, 4]),
            Some(Padding {
                top: 1,
                right: 2,
                bottom: 3,
                left: 4
            })
        );
        assert_eq!(
            Padding::from_shorthand(&[1, 2, 3]),
            Some(Padding {
                top: 1,
                right: 2,
                bottom: 3,
                left: 2
            })
        );
        assert_eq!(Padding::from_shorthand(&[1, 2, 3, 4, 5]), None);
        assert_eq!(Padding::from_shorthand(&[]), None);
    }

    #[test]
    fn padding_shorthand_is_minimal() {
        assert_eq!(Padding::uniform(3).shorthand(), "3");
        assert_eq!(Padding::symmetric(1, 2).shorthand(), "1 2");
        let odd = Padding {
            top: 1,
            right: 2,
            bottom: 3,
            left: 4,
        };
        assert_eq!(odd.shorthand(), "1 2 3 4");
    }

    #[test]
    fn alert_tag_lookup_ignores_case() {
        assert_eq!(AlertKind::from_tag("note"), Some(AlertKind::Note));
        assert_eq!(AlertKind::from_tag("Caution"), Some(AlertKind::Caution));
        assert_eq!(AlertKind::from_tag("DANGER"), None);
    }

    #[test]
    fn table_grid_skips_separator_row() {
        let block = Block::new(BlockKind::Table, "| A | B |\n|---|:-:|\n| 1 | 2 |\n| 3 | 4 |", 1);
        let grid = block.table();
        assert_eq!(grid.header, vec!["A", "B"]);
        assert_eq!(grid.rows, vec![vec!["1", "2"], vec!["3", "4"]]);
        assert_eq!(grid.columns(), 2);
    }

    #[test]
    fn table_grid_without_separator_keeps_all_rows() {
        let block = Block::new(BlockKind::Table, "| x |\n| y |", 1);
        let grid = block.table();
        assert_eq!(grid.header, vec!["x"]);
        assert_eq!(grid.rows, vec![vec!["y"]]);
    }

    #[test]
    fn pixels_map_zero_and_junk_to_transparent() {
        let block = Block::new(BlockKind::PixelImage, "0120\n\n9x0", 1);
        assert_eq!(
            block.pixels(),
            vec![
                vec![None, Some(1), Some(2), None],
                vec![Some(9), None, None],
            ]
        );
    }

    #[test]
    fn block_equality_ignores_line() {
        let a = Block::new(BlockKind::Paragraph, "x", 3);
        let b = Block::new(BlockKind::Paragraph, "x", 9);
        assert_eq!(a, b);
    }

    #[test]
    fn style_modifier_tokens_chain_both_sources() {
        let spec = StyleSpec {
            free_form_tokens: vec!["bold".into()],
            text_tokens: vec!["italic".into()],
            ..Default::default()
        };
        assert_eq!(spec.modifier_tokens().collect::<Vec<_>>(), vec!["bold", "italic"]);
        assert!(!spec.is_free_form_only());
    }
}
