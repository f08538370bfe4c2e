//! # Metadata Directive Resolver
//!
//! A directive is a line that styles the block right after it:
//!
//! ```text
//! <!-- style[bold italic] -->              free-form tokens
//! <!-- meta[color:cyan|align:center] -->   key/value pairs
//! meta[padding:1 4]                        bare form, same meaning
//! ```
//!
//! The resolver looks at one line in isolation. Attaching the result to a
//! block is the parser's job.

use log::debug;

use crate::core::model::{Align, Padding, StyleSpec};

/// What a single line turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Ordinary content; the parser classifies it further.
    NotDirective,
    /// A directive. `problems` lists recognized keys whose values were ignored.
    Directive {
        style: StyleSpec,
        problems: Vec<String>,
    },
    /// Looked like a directive but could not be read. Dropped.
    Malformed(String),
}

#[derive(Clone, Copy)]
enum Form {
    Style,
    Meta,
}

/// Classify `line` as directive, malformed directive, or content.
pub fn resolve(line: &str) -> Resolution {
    let trimmed = line.trim();
    let (body, in_comment) = match trimmed.strip_prefix("<!--") {
        Some(rest) => (rest.trim_start(), true),
        None => (trimmed, false),
    };

    let (form, after_open) = if let Some(rest) = body.strip_prefix("style[") {
        (Form::Style, rest)
    } else if let Some(rest) = body.strip_prefix("meta[") {
        (Form::Meta, rest)
    } else {
        return Resolution::NotDirective;
    };

    let tail = if in_comment {
        match after_open.trim_end().strip_suffix("-->") {
            Some(inner) => inner.trim_end(),
            None => return Resolution::Malformed("comment is not closed with `-->`".into()),
        }
    } else {
        after_open
    };

    let Some(inner) = tail.strip_suffix(']') else {
        return Resolution::Malformed("missing closing `]`".into());
    };
    if inner.contains(']') {
        return Resolution::Malformed("unexpected text after `]`".into());
    }

    match form {
        Form::Style => Resolution::Directive {
            style: StyleSpec {
                free_form_tokens: tokens(inner),
                ..Default::default()
            },
            problems: Vec::new(),
        },
        Form::Meta => {
            let (style, problems) = parse_meta(inner);
            Resolution::Directive { style, problems }
        }
    }
}

fn tokens(value: &str) -> Vec<String> {
    value.split_whitespace().map(str::to_string).collect()
}

fn parse_meta(content: &str) -> (StyleSpec, Vec<String>) {
    let mut style = StyleSpec::default();
    let mut problems = Vec::new();

    for pair in content.split('|') {
        let Some((key, value)) = pair.split_once(':') else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());
        match key.to_ascii_lowercase().as_str() {
            "color" => style.color = non_empty(value),
            "bg" => style.background = non_empty(value),
            "text" => style.text_tokens = tokens(value),
            "align" => match Align::parse(value) {
                Some(align) => style.align = Some(align),
                None => problems.push(format!("unknown align `{value}`")),
            },
            "padding" => match parse_padding(value) {
                Some(padding) => style.padding = Some(padding),
                None => problems.push(format!("bad padding `{value}`")),
            },
            other => debug!("Ignoring unknown meta key `{other}`"),
        }
    }

    (style, problems)
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn parse_padding(value: &str) -> Option<Padding> {
    let values = value
        .split_whitespace()
        .map(|part| part.parse::<u16>().ok())
        .collect::<Option<Vec<_>>>()?;
    Padding::from_shorthand(&values)
}

/// Render `style` back into a directive line, wrapped in an HTML comment.
///
/// Specs holding only `style[...]` tokens come back as `style[...]`; anything
/// else as `meta[...]`.
pub fn to_directive(style: &StyleSpec) -> String {
    if style.is_free_form_only() {
        return format!("<!-- style[{}] -->", style.free_form_tokens.join(" "));
    }

    let mut pairs = Vec::new();
    if let Some(color) = &style.color {
        pairs.push(format!("color:{color}"));
    }
    if let Some(bg) = &style.background {
        pairs.push(format!("bg:{bg}"));
    }
    if !style.text_tokens.is_empty() {
        pairs.push(format!("text:{}", style.text_tokens.join(" ")));
    }
    if let Some(align) = style.align {
        pairs.push(format!("align:{}", align.as_str()));
    }
    if let Some(padding) = style.padding {
        pairs.push(format!("padding:{}", padding.shorthand()));
    }
    format!("<!-- meta[{}] -->", pairs.join("|"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directive(line: &str) -> StyleSpec {
        match resolve(line) {
            Resolution::Directive { style, .. } => style,
            other => panic!("expected directive for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn style_tokens_are_copied_verbatim() {
        let style = directive("style[bold italic  underline]");
        assert_eq!(style.free_form_tokens, vec!["bold", "italic", "underline"]);
        assert!(style.is_free_form_only());
    }

    #[test]
    fn comment_wrapped_form_is_accepted() {
        let style = directive("  <!-- style[reverse] -->  ");
        assert_eq!(style.free_form_tokens, vec!["reverse"]);
        let style = directive("<!--meta[color:red]-->");
        assert_eq!(style.color.as_deref(), Some("red"));
    }

    #[test]
    fn meta_keys_are_parsed() {
        let style = directive("meta[color:cyan|bg:#0f0f23|text:bold italic|align:Right|padding:1 2]");
        assert_eq!(style.color.as_deref(), Some("cyan"));
        assert_eq!(style.background.as_deref(), Some("#0f0f23"));
        assert_eq!(style.text_tokens, vec!["bold", "italic"]);
        assert_eq!(style.align, Some(Align::Right));
        assert_eq!(style.padding, Some(Padding::symmetric(1, 2)));
        assert!(style.free_form_tokens.is_empty());
    }

    #[test]
    fn hex_color_keeps_everything_after_first_colon() {
        let style = directive("meta[ color : #ff8800 ]");
        assert_eq!(style.color.as_deref(), Some("#ff8800"));
    }

    #[test]
    fn unknown_keys_and_bare_words_are_ignored() {
        match resolve("meta[font:comic|shiny|color:red]") {
            Resolution::Directive { style, problems } => {
                assert_eq!(style.color.as_deref(), Some("red"));
                assert!(problems.is_empty());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn bad_values_are_reported_but_rest_applies() {
        match resolve("meta[padding:1 2 3 4 5|align:middle|color:blue]") {
            Resolution::Directive { style, problems } => {
                assert_eq!(style.color.as_deref(), Some("blue"));
                assert_eq!(style.padding, None);
                assert_eq!(style.align, None);
                assert_eq!(problems.len(), 2);
            }
            other => panic!("unexpected {other:?}"),
        }
        match resolve("meta[padding:-1]") {
            Resolution::Directive { style, problems } => {
                assert_eq!(style.padding, None);
                assert_eq!(problems.len(), 1);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn malformed_directives_are_flagged() {
        assert!(matches!(resolve("style[bold"), Resolution::Malformed(_)));
        assert!(matches!(resolve("<!-- meta[color:red]"), Resolution::Malformed(_)));
        assert!(matches!(resolve("style[bold] and more"), Resolution::Malformed(_)));
    }

    #[test]
    fn ordinary_lines_are_not_directives() {
        assert_eq!(resolve("Some text"), Resolution::NotDirective);
        assert_eq!(resolve("<!-- a comment -->"), Resolution::NotDirective);
        assert_eq!(resolve("the style[bold] word"), Resolution::NotDirective);
        assert_eq!(resolve(""), Resolution::NotDirective);
    }

    #[test]
    fn to_directive_picks_the_matching_form() {
        let free = StyleSpec {
            free_form_tokens: vec!["bold".into(), "dim".into()],
            ..Default::default()
        };
        assert_eq!(to_directive(&free), "<!-- style[bold dim] -->");

        let meta = StyleSpec {
            color: Some("red".into()),
            align: Some(Align::Center),
            padding: Some(Padding::uniform(1)),
            ..Default::default()
        };
        let line = to_directive(&meta);
        assert_eq!(line, "<!-- meta[color:red|align:center|padding:1] -->");
        assert_eq!(directive(&line), meta);
    }
}
