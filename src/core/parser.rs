//! # Markdown Block Parser
//!
//! Turns deck text into a [`Presentation`] in one pass over its lines.
//!
//! Every line is first classified into a [`LineKind`] on its own, then the
//! current [`Mode`] decides what happens to it:
//!
//! ```text
//!            ┌──────────── ``` ───────────┐
//!            │                            ▼
//!   ┌─────────────┐  ```image   ┌─────────────┐
//!   │   Default   │────────────▶│   InImage   │   (``` closes, EOF closes)
//!   └─────────────┘             └─────────────┘
//!     │        │  │
//!     │ | row  │  └── > [!TIP] ──▶ InAlert   (non-`>` or blank line closes)
//!     ▼        ▼
//!  InTable   InFence                          (non-row line closes)
//! ```
//!
//! Table and alert modes end on the first line that does not belong to them;
//! that line is then handled again in `Default`. Fences only end on a bare
//! ``` line or at end of file.
//!
//! The parser never fails. Anything it had to drop or patch up is recorded
//! as a [`Diagnostic`] on the result.

use log::{debug, info};

use crate::core::directive::{self, Resolution};
use crate::core::front_matter;
use crate::core::model::{
    AlertKind, Block, BlockKind, Diagnostic, DiagnosticKind, Page, Presentation, StyleSpec,
};

const FENCE: &str = "```";

/// What a single line looks like, before mode is taken into account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Directive {
        style: StyleSpec,
        problems: Vec<String>,
    },
    MalformedDirective(String),
    /// Single-line `<!-- ... -->`.
    Comment,
    Heading {
        level: u8,
        text: &'a str,
    },
    FenceOpen {
        language: Option<&'a str>,
    },
    AlertOpen {
        kind: AlertKind,
        rest: &'a str,
    },
    /// Blockquote without an alert tag.
    Quote,
    /// `![alt](src)`.
    ImageLink,
    TableRow,
    Rule,
    ListItem {
        ordered: bool,
        index: Option<u64>,
        text: &'a str,
    },
    Text(&'a str),
}

/// Classify one line in isolation.
pub fn classify(line: &str) -> LineKind<'_> {
    let line = line.trim();
    if line.is_empty() {
        return LineKind::Blank;
    }

    match directive::resolve(line) {
        Resolution::Directive { style, problems } => {
            return LineKind::Directive { style, problems };
        }
        Resolution::Malformed(reason) => return LineKind::MalformedDirective(reason),
        Resolution::NotDirective => {}
    }

    if line.starts_with("<!--") && line.ends_with("-->") && line.len() >= 7 {
        return LineKind::Comment;
    }
    if let Some((level, text)) = heading(line) {
        return LineKind::Heading { level, text };
    }
    if let Some(rest) = line.strip_prefix(FENCE) {
        let language = rest.trim();
        return LineKind::FenceOpen {
            language: (!language.is_empty()).then_some(language),
        };
    }
    if line.starts_with('>') {
        return match alert_open(line) {
            Some((kind, rest)) => LineKind::AlertOpen { kind, rest },
            None => LineKind::Quote,
        };
    }
    if line.starts_with("![") {
        return LineKind::ImageLink;
    }
    if line.starts_with('|') {
        return LineKind::TableRow;
    }
    if is_rule(line) {
        return LineKind::Rule;
    }
    if let Some((ordered, index, text)) = list_item(line) {
        return LineKind::ListItem {
            ordered,
            index,
            text,
        };
    }
    LineKind::Text(line)
}

fn heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    if !(1..=3).contains(&hashes) {
        return None;
    }
    let text = line[hashes..].strip_prefix([' ', '\t'])?.trim();
    if text.is_empty() {
        return None;
    }
    Some((hashes as u8, text))
}

fn alert_open(line: &str) -> Option<(AlertKind, &str)> {
    let rest = line.strip_prefix('>')?.trim_start();
    let (tag, after) = rest.strip_prefix("[!")?.split_once(']')?;
    let kind = AlertKind::from_tag(tag.trim())?;
    Some((kind, after.trim()))
}

/// Body of a `>` line: the marker and one following space removed.
fn quote_body(line: &str) -> Option<&str> {
    let rest = line.trim().strip_prefix('>')?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

fn is_rule(line: &str) -> bool {
    let marks: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
    marks.len() >= 3 && matches!(marks[0], '-' | '*' | '_') && marks.iter().all(|c| *c == marks[0])
}

fn list_item(line: &str) -> Option<(bool, Option<u64>, &str)> {
    for marker in ["- ", "* ", "+ "] {
        if let Some(text) = line.strip_prefix(marker) {
            let text = text.trim();
            return (!text.is_empty()).then_some((false, None, text));
        }
    }

    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let text = line[digits..].strip_prefix(". ")?.trim();
    let index = line[..digits].parse::<u64>().ok()?;
    (!text.is_empty()).then_some((true, Some(index), text))
}

/// Lines collected for a multi-line block that is still open.
#[derive(Debug)]
struct Draft {
    start: usize,
    style: Option<StyleSpec>,
    lines: Vec<String>,
}

impl Draft {
    fn new(start: usize, style: Option<StyleSpec>) -> Self {
        Self {
            start,
            style,
            lines: Vec::new(),
        }
    }
}

#[derive(Debug)]
enum Mode {
    Default,
    InFence {
        draft: Draft,
        language: Option<String>,
    },
    InImage(Draft),
    InTable(Draft),
    InAlert {
        draft: Draft,
        kind: AlertKind,
    },
}

/// How the current mode treats a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// The line belongs to the open block.
    Absorb,
    /// The line closes the open block and is used up.
    Close,
    /// The line closes the open block, then gets classified in `Default`.
    CloseAndReplay,
    /// No block is open.
    Classify,
}

struct Parser {
    mode: Mode,
    pending: Option<StyleSpec>,
    pages: Vec<Page>,
    diagnostics: Vec<Diagnostic>,
}

/// Parse a whole deck.
pub fn parse(text: &str) -> Presentation {
    let lines: Vec<&str> = text.lines().collect();
    let (project_metadata, skip) = match front_matter::extract(&lines) {
        Some(fm) => (fm.metadata, fm.consumed),
        None => (Default::default(), 0),
    };

    let mut parser = Parser::new();
    for (offset, line) in lines.iter().enumerate().skip(skip) {
        parser.feed(offset + 1, line);
    }
    let (pages, diagnostics) = parser.finish();

    info!(
        "Parsed {} pages with {} blocks ({} diagnostics)",
        pages.len(),
        pages.iter().map(|page| page.blocks.len()).sum::<usize>(),
        diagnostics.len()
    );

    Presentation {
        project_metadata,
        pages,
        diagnostics,
    }
}

impl Parser {
    fn new() -> Self {
        Self {
            mode: Mode::Default,
            pending: None,
            pages: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn step(&self, line: &str) -> Step {
        match &self.mode {
            Mode::Default => Step::Classify,
            Mode::InFence { .. } | Mode::InImage(_) => {
                if line.trim() == FENCE {
                    Step::Close
                } else {
                    Step::Absorb
                }
            }
            Mode::InTable(_) => match classify(line) {
                LineKind::TableRow => Step::Absorb,
                _ => Step::CloseAndReplay,
            },
            Mode::InAlert { .. } => match classify(line) {
                LineKind::AlertOpen { .. } => Step::CloseAndReplay,
                _ if quote_body(line).is_some() => Step::Absorb,
                _ => Step::CloseAndReplay,
            },
        }
    }

    fn feed(&mut self, line_no: usize, line: &str) {
        match self.step(line) {
            Step::Absorb => self.absorb(line),
            Step::Close => self.close_mode(),
            Step::CloseAndReplay => {
                self.close_mode();
                self.classify_line(line_no, line);
            }
            Step::Classify => self.classify_line(line_no, line),
        }
    }

    fn absorb(&mut self, line: &str) {
        match &mut self.mode {
            Mode::InFence { draft, .. } | Mode::InImage(draft) => {
                draft.lines.push(line.trim_end().to_string());
            }
            Mode::InTable(draft) => draft.lines.push(line.trim().to_string()),
            Mode::InAlert { draft, .. } => {
                if let Some(body) = quote_body(line) {
                    draft.lines.push(body.trim_end().to_string());
                }
            }
            Mode::Default => {}
        }
    }

    fn classify_line(&mut self, line_no: usize, line: &str) {
        match classify(line) {
            LineKind::Blank => {}
            LineKind::Directive { style, problems } => {
                for problem in problems {
                    self.diagnose(line_no, DiagnosticKind::MalformedDirective(problem));
                }
                if self.pending.is_some() {
                    debug!("Line {line_no}: directive replaces an unused one");
                }
                self.pending = Some(style);
            }
            LineKind::MalformedDirective(reason) => {
                self.diagnose(line_no, DiagnosticKind::MalformedDirective(reason));
            }
            LineKind::Comment | LineKind::Quote | LineKind::ImageLink => {
                if self.pending.take().is_some() {
                    debug!("Line {line_no}: directive dropped, next line renders nothing");
                }
            }
            LineKind::Heading { level: 1, text } => {
                let heading = Block::new(BlockKind::Heading1, text, line_no)
                    .with_style(self.pending.take());
                self.pages.push(Page::new(heading));
            }
            LineKind::Heading { level, text } => {
                let kind = if level == 2 {
                    BlockKind::Heading2
                } else {
                    BlockKind::Heading3
                };
                self.emit_line(kind, text, line_no);
            }
            LineKind::FenceOpen { language } => {
                let draft = Draft::new(line_no, self.pending.take());
                self.mode = match language {
                    Some(tag) if tag.eq_ignore_ascii_case("image") => Mode::InImage(draft),
                    _ => Mode::InFence {
                        draft,
                        language: language.map(str::to_string),
                    },
                };
            }
            LineKind::AlertOpen { kind, rest } => {
                let mut draft = Draft::new(line_no, self.pending.take());
                if !rest.is_empty() {
                    draft.lines.push(rest.to_string());
                }
                self.mode = Mode::InAlert { draft, kind };
            }
            LineKind::TableRow => {
                let mut draft = Draft::new(line_no, self.pending.take());
                draft.lines.push(line.trim().to_string());
                self.mode = Mode::InTable(draft);
            }
            LineKind::Rule => self.emit_line(BlockKind::HorizontalRule, "", line_no),
            LineKind::ListItem {
                ordered,
                index,
                text,
            } => self.emit_line(BlockKind::ListItem { ordered, index }, text, line_no),
            LineKind::Text(text) => self.emit_line(BlockKind::Paragraph, text, line_no),
        }
    }

    fn emit_line(&mut self, kind: BlockKind, text: &str, line_no: usize) {
        let block = Block::new(kind, text, line_no).with_style(self.pending.take());
        self.emit(block);
    }

    fn close_mode(&mut self) {
        let block = match std::mem::replace(&mut self.mode, Mode::Default) {
            Mode::Default => return,
            Mode::InFence { draft, language } => {
                let kind = BlockKind::CodeFence { language };
                Block::new(kind, draft.lines.join("\n"), draft.start).with_style(draft.style)
            }
            Mode::InImage(draft) => Block::new(BlockKind::PixelImage, draft.lines.join("\n"), draft.start)
                .with_style(draft.style),
            Mode::InTable(draft) => {
                Block::new(BlockKind::Table, draft.lines.join("\n"), draft.start).with_style(draft.style)
            }
            Mode::InAlert { draft, kind } => {
                let body = draft.lines.join("\n");
                let text = if body.trim().is_empty() {
                    kind.label().to_string()
                } else {
                    body
                };
                Block::new(BlockKind::Alert { kind }, text, draft.start).with_style(draft.style)
            }
        };

        if block.raw_text.trim().is_empty() {
            self.diagnose(block.line, DiagnosticKind::EmptyBlock);
            return;
        }
        self.emit(block);
    }

    fn emit(&mut self, block: Block) {
        match self.pages.last_mut() {
            Some(page) => page.blocks.push(block),
            None => self.diagnose(block.line, DiagnosticKind::ContentBeforeFirstPage),
        }
    }

    fn diagnose(&mut self, line: usize, kind: DiagnosticKind) {
        let diagnostic = Diagnostic { line, kind };
        debug!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    fn finish(mut self) -> (Vec<Page>, Vec<Diagnostic>) {
        let open_fence = match &self.mode {
            Mode::InFence { draft, .. } | Mode::InImage(draft) => Some(draft.start),
            _ => None,
        };
        if let Some(start) = open_fence {
            self.diagnose(start, DiagnosticKind::UnterminatedFence);
        }
        self.close_mode();

        if self.pending.take().is_some() {
            debug!("Directive at end of document dropped");
        }
        if self.pages.is_empty() {
            self.diagnose(0, DiagnosticKind::EmptyDocument);
        }
        (self.pages, self.diagnostics)
    }
}
