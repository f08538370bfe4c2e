//! Canonical Markdown listing of a parsed deck.
//!
//! The output is not the original source; it is the shortest text that parses
//! back to the same pages and blocks. `shellshow --outline` prints it.

use crate::core::directive::to_directive;
use crate::core::front_matter::to_front_matter;
use crate::core::model::{Block, BlockKind, Presentation};
use crate::core::parser::{LineKind, classify};

pub fn to_markdown(presentation: &Presentation) -> String {
    let mut out = to_front_matter(&presentation.project_metadata);

    for page in &presentation.pages {
        for block in &page.blocks {
            if !out.is_empty() {
                out.push('\n');
            }
            if let Some(style) = &block.style {
                out.push_str(&to_directive(style));
                out.push('\n');
            }
            write_block(&mut out, block);
        }
    }
    out
}

fn write_block(out: &mut String, block: &Block) {
    match &block.kind {
        BlockKind::Heading1 => push_line(out, &format!("# {}", block.raw_text)),
        BlockKind::Heading2 => push_line(out, &format!("## {}", block.raw_text)),
        BlockKind::Heading3 => push_line(out, &format!("### {}", block.raw_text)),
        BlockKind::Paragraph | BlockKind::Table => push_line(out, &block.raw_text),
        BlockKind::ListItem {
            ordered: true,
            index,
        } => push_line(out, &format!("{}. {}", index.unwrap_or(1), block.raw_text)),
        BlockKind::ListItem { ordered: false, .. } => push_line(out, &bullet(&block.raw_text)),
        BlockKind::CodeFence { language } => {
            push_line(out, &format!("```{}", language.as_deref().unwrap_or("")));
            push_line(out, &block.raw_text);
            push_line(out, "```");
        }
        BlockKind::PixelImage => {
            push_line(out, "```image");
            push_line(out, &block.raw_text);
            push_line(out, "```");
        }
        BlockKind::HorizontalRule => push_line(out, "---"),
        BlockKind::Alert { kind } => {
            push_line(out, &format!("> [!{}]", kind.tag()));
            for line in block.raw_text.split('\n') {
                if line.is_empty() {
                    push_line(out, ">");
                } else {
                    push_line(out, &format!("> {line}"));
                }
            }
        }
    }
}

/// `- text`, unless that reads back as something else (`- ---` is a rule).
fn bullet(text: &str) -> String {
    let dash = format!("- {text}");
    if matches!(classify(&dash), LineKind::ListItem { .. }) {
        dash
    } else {
        format!("* {text}")
    }
}

fn push_line(out: &mut String, text: &str) {
    out.push_str(text);
    out.push('\n');
}
