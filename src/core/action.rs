//! # Actions
//!
//! Everything the presenter can do becomes an `Action`.
//! Presses Enter? That's `Action::RevealNext`.
//! Hits `r` after editing the file? That's `Action::Load(text)`.
//!
//! The `update()` function applies an action to the navigator and returns an
//! `Effect` telling the shell what to redraw. No I/O happens here.
//!
//! ```text
//! Navigator + Action  →  update()  →  Effect
//! ```
//!
//! This makes everything testable: `assert_eq!(update(&mut nav, action), expected)`.
//! And debuggable: log every action, replay the exact talk.

use log::{debug, info, warn};

use crate::core::navigation::Navigator;
use crate::core::parser::parse;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    RevealNext,
    HideLast,
    NextPage,
    PrevPage,
    JumpToPage(usize),
    /// Parse this text and swap it in as the whole deck.
    Load(String),
    Quit,
}

/// What the shell has to do after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Nothing changed (a command at a boundary).
    None,
    /// One block was appended to the visible ones; the rest is unchanged.
    Append,
    /// The visible set changed in some other way; rebuild the view.
    Redraw,
    /// The action was refused; the message says why.
    Rejected(String),
    Quit,
}

impl Effect {
    fn from_change(changed: bool, on_change: Effect) -> Effect {
        if changed { on_change } else { Effect::None }
    }
}

pub fn update(navigator: &mut Navigator, action: Action) -> Effect {
    debug!("Action: {:?}", ActionSummary(&action));
    match action {
        Action::RevealNext => Effect::from_change(navigator.reveal_next(), Effect::Append),
        Action::HideLast => Effect::from_change(navigator.hide_last(), Effect::Redraw),
        Action::NextPage => Effect::from_change(navigator.next_page(), Effect::Redraw),
        Action::PrevPage => Effect::from_change(navigator.prev_page(), Effect::Redraw),
        Action::JumpToPage(n) => Effect::from_change(navigator.jump_to_page(n), Effect::Redraw),
        Action::Load(text) => {
            let presentation = parse(&text);
            for diagnostic in &presentation.diagnostics {
                warn!("{diagnostic}");
            }
            match navigator.replace(presentation) {
                Ok(()) => {
                    info!("Loaded deck with {} pages", navigator.page_count());
                    Effect::Redraw
                }
                Err(e) => {
                    warn!("Load refused: {e}");
                    Effect::Rejected(e.to_string())
                }
            }
        }
        Action::Quit => Effect::Quit,
    }
}

/// Keeps deck text out of the debug log.
struct ActionSummary<'a>(&'a Action);

impl std::fmt::Debug for ActionSummary<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Action::Load(text) => write!(f, "Load({} bytes)", text.len()),
            other => write!(f, "{other:?}"),
        }
    }
}
