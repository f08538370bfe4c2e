//! # Presentation Navigation Engine
//!
//! A small state machine over `(page_index, reveal_count)`:
//!
//! ```text
//!             reveal_next                      next_page
//!   (p, k) ───────────────▶ (p, k+1)   (p, k) ───────────▶ (p+1, 1)
//!          ◀───────────────                  ◀───────────
//!              hide_last                       prev_page
//!
//!   jump_to_page(n) ──▶ (clamp(n), 1)
//! ```
//!
//! Every transition is total. A command at a boundary leaves the state alone
//! and reports `false`; callers turn that into a silent no-op.

use std::fmt;

use log::debug;

use crate::core::model::{Block, Page, Presentation};

/// Which page is showing and how many of its blocks are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    pub page_index: usize,
    pub reveal_count: usize,
}

impl NavigationState {
    /// Start of a freshly loaded deck: first page, title only.
    pub const START: NavigationState = NavigationState {
        page_index: 0,
        reveal_count: 1,
    };
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::START
    }
}

/// The deck has no `# ` page to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyDocument;

impl fmt::Display for EmptyDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no slides found (a slide starts with a `# ` heading)")
    }
}

impl std::error::Error for EmptyDocument {}

/// Owns the loaded deck and the only mutable navigation state.
#[derive(Debug, Clone)]
pub struct Navigator {
    presentation: Presentation,
    state: NavigationState,
}

impl Navigator {
    pub fn new(presentation: Presentation) -> Result<Self, EmptyDocument> {
        if presentation.pages.is_empty() {
            return Err(EmptyDocument);
        }
        Ok(Self {
            presentation,
            state: NavigationState::START,
        })
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn page_count(&self) -> usize {
        self.presentation.pages.len()
    }

    pub fn current_page(&self) -> &Page {
        &self.presentation.pages[self.state.page_index]
    }

    /// The first `reveal_count` blocks of the current page. This is all a
    /// renderer needs.
    pub fn visible_blocks(&self) -> &[Block] {
        &self.current_page().blocks[..self.state.reveal_count]
    }

    pub fn hidden_count(&self) -> usize {
        self.current_page().blocks.len() - self.state.reveal_count
    }

    pub fn is_fully_revealed(&self) -> bool {
        self.hidden_count() == 0
    }

    pub fn is_first_page(&self) -> bool {
        self.state.page_index == 0
    }

    pub fn is_last_page(&self) -> bool {
        self.state.page_index + 1 == self.page_count()
    }

    pub fn reveal_next(&mut self) -> bool {
        if self.is_fully_revealed() {
            return false;
        }
        self.state.reveal_count += 1;
        true
    }

    pub fn hide_last(&mut self) -> bool {
        if self.state.reveal_count <= 1 {
            return false;
        }
        self.state.reveal_count -= 1;
        true
    }

    pub fn next_page(&mut self) -> bool {
        if self.is_last_page() {
            return false;
        }
        self.enter_page(self.state.page_index + 1);
        true
    }

    pub fn prev_page(&mut self) -> bool {
        if self.is_first_page() {
            return false;
        }
        self.enter_page(self.state.page_index - 1);
        true
    }

    /// Go to page `n`, clamped to the deck. Returns whether the state changed.
    pub fn jump_to_page(&mut self, n: usize) -> bool {
        let target = n.min(self.page_count() - 1);
        let before = self.state;
        self.enter_page(target);
        self.state != before
    }

    /// Swap in a new deck and start over. Decks without pages are refused and
    /// the current one stays loaded.
    pub fn replace(&mut self, presentation: Presentation) -> Result<(), EmptyDocument> {
        if presentation.pages.is_empty() {
            return Err(EmptyDocument);
        }
        self.presentation = presentation;
        self.state = NavigationState::START;
        Ok(())
    }

    fn enter_page(&mut self, page_index: usize) {
        debug!("Entering page {} of {}", page_index + 1, self.page_count());
        self.state = NavigationState {
            page_index,
            reveal_count: 1,
        };
    }
}
