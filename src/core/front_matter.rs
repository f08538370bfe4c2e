//! Project-level metadata from the comment block that opens a deck.
//!
//! ```text
//! <!--
//! ---
//! title: Rust in Production
//! author: Ferris
//! color: bright_cyan
//! slideBG: #0f0f23
//! tableOfContent: true
//! ---
//! -->
//! ```

use log::{debug, warn};

use crate::core::model::ProjectMetadata;

/// Metadata plus the number of lines it occupied (including any blank lines
/// before it). The parser resumes after `consumed` lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrontMatter {
    pub metadata: ProjectMetadata,
    pub consumed: usize,
}

/// Read the front matter at the top of `lines`, if there is one.
///
/// The block must be the first non-blank content: a line that is exactly
/// `<!--`, then `key: value` lines, then a line that is exactly `-->`. An
/// unclosed block is not front matter.
pub fn extract(lines: &[&str]) -> Option<FrontMatter> {
    let open = lines.iter().position(|line| !line.trim().is_empty())?;
    if lines[open].trim() != "<!--" {
        return None;
    }

    let Some(close) = lines[open + 1..]
        .iter()
        .position(|line| line.trim() == "-->")
        .map(|offset| open + 1 + offset)
    else {
        warn!("Front matter opened on line {} is never closed; ignoring it", open + 1);
        return None;
    };

    let mut metadata = ProjectMetadata::default();
    for line in &lines[open + 1..close] {
        apply(&mut metadata, line);
    }
    debug!("Front matter: {:?}", metadata);

    Some(FrontMatter {
        metadata,
        consumed: close + 1,
    })
}

fn apply(metadata: &mut ProjectMetadata, line: &str) {
    let line = line.trim();
    if line.is_empty() || line.chars().all(|c| c == '-') {
        return;
    }
    let Some((key, value)) = line.split_once(':') else {
        debug!("Ignoring front matter line without `:`: {line}");
        return;
    };
    let value = unquote(value.trim());

    match key.trim().to_ascii_lowercase().as_str() {
        "title" => metadata.title = non_empty(value),
        "author" => metadata.author = non_empty(value),
        "date" => metadata.date = non_empty(value),
        "color" => metadata.default_color = non_empty(value),
        "slidebg" | "bg" | "background" => metadata.default_background = non_empty(value),
        "tableofcontent" | "tableofcontents" | "toc" => {
            metadata.show_table_of_contents = is_truthy(value)
        }
        other => debug!("Ignoring unknown front matter key `{other}`"),
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "yes" | "on" | "1"
    )
}

/// Render metadata back into a front matter block. Empty metadata renders as
/// nothing.
pub fn to_front_matter(metadata: &ProjectMetadata) -> String {
    if metadata.is_empty() {
        return String::new();
    }
    let mut out = String::from("<!--\n---\n");
    let fields = [
        ("title", &metadata.title),
        ("author", &metadata.author),
        ("date", &metadata.date),
        ("color", &metadata.default_color),
        ("slideBG", &metadata.default_background),
    ];
    for (key, value) in fields {
        if let Some(value) = value {
            out.push_str(&format!("{key}: {value}\n"));
        }
    }
    if metadata.show_table_of_contents {
        out.push_str("tableOfContent: true\n");
    }
    out.push_str("---\n-->\n");
    out
}
