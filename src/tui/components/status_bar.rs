//! # StatusBar Component
//!
//! Top line showing where the presenter is in the deck:
//!
//! ```text
//! Sample Deck │ Page 2/3 │ Block 1/3                     t contents · q quit
//! ```
//!
//! The page heading is not counted as a block, so a page shows `Block 0/n`
//! until its first body block is revealed.
//!
//! Stateless: all fields are props, rebuilt each frame.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::navigation::Navigator;
use crate::tui::component::Component;

const SEPARATOR: &str = " │ ";
const KEY_HINT: &str = "t contents · q quit";

pub struct StatusBar {
    /// Deck title (front matter) or the current page title.
    pub title: String,
    /// `Page i/n │ Block v/t`, or the name of a non-slide screen.
    pub location: String,
    /// Transient message (e.g. a failed reload).
    pub status_message: String,
}

impl StatusBar {
    pub fn new(title: String, location: String, status_message: String) -> Self {
        Self {
            title,
            location,
            status_message,
        }
    }

    /// Status for the slide currently shown by `navigator`.
    pub fn for_slide(navigator: &Navigator, status_message: &str) -> Self {
        let state = navigator.state();
        let page = navigator.current_page();
        let location = format!(
            "Page {}/{}{SEPARATOR}Block {}/{}",
            state.page_index + 1,
            navigator.page_count(),
            state.reveal_count.saturating_sub(1),
            page.body_len(),
        );
        Self::new(deck_title(navigator), location, status_message.to_string())
    }

    /// Status for the title or contents screen.
    pub fn for_screen(navigator: &Navigator, screen: &str, status_message: &str) -> Self {
        Self::new(deck_title(navigator), screen.to_string(), status_message.to_string())
    }

    pub fn text(&self) -> String {
        let mut text = format!("{}{SEPARATOR}{}", self.title, self.location);
        if !self.status_message.is_empty() {
            text.push_str(SEPARATOR);
            text.push_str(&self.status_message);
        }
        text
    }
}

fn deck_title(navigator: &Navigator) -> String {
    navigator
        .presentation()
        .project_metadata
        .title
        .clone()
        .unwrap_or_else(|| navigator.current_page().title.clone())
}

impl Component for StatusBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let bar = Style::default().fg(Color::White).bg(Color::DarkGray);
        let mut spans = vec![
            Span::styled(self.title.clone(), bar.add_modifier(Modifier::BOLD)),
            Span::styled(SEPARATOR, bar),
            Span::styled(self.location.clone(), bar),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::styled(SEPARATOR, bar));
            spans.push(Span::styled(self.status_message.clone(), bar.fg(Color::Yellow)));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)).style(bar), area);

        // Only show the hint when it fits next to the status.
        let used = u16::try_from(self.text().chars().count()).unwrap_or(u16::MAX);
        let hint_len = u16::try_from(KEY_HINT.chars().count()).unwrap_or(u16::MAX);
        if used.saturating_add(hint_len).saturating_add(2) <= area.width {
            frame.render_widget(
                Paragraph::new(KEY_HINT)
                    .style(bar.add_modifier(Modifier::DIM))
                    .alignment(Alignment::Right),
                area,
            );
        }
    }
}
