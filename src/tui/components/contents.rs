//! # Contents Component
//!
//! Page list used two ways: as the contents page shown after the title
//! page when the front matter asks for it, and as an overlay toggled with
//! `t` from any slide. Up/Down move the selection, Enter jumps, Esc or `t`
//! dismisses the overlay.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ContentsState` lives in `TuiState`
//! - `Contents` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Persistent state for the page list.
pub struct ContentsState {
    pub titles: Vec<String>,
    pub selected: usize,
    pub list_state: ListState,
}

impl ContentsState {
    /// Start with `current` highlighted.
    pub fn new(titles: Vec<String>, current: usize) -> Self {
        let selected = current.min(titles.len().saturating_sub(1));
        let mut list_state = ListState::default();
        if !titles.is_empty() {
            list_state.select(Some(selected));
        }
        Self {
            titles,
            selected,
            list_state,
        }
    }

    fn select(&mut self, index: usize) {
        if self.titles.is_empty() {
            return;
        }
        self.selected = index.min(self.titles.len() - 1);
        self.list_state.select(Some(self.selected));
    }
}

/// Events emitted by the page list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentsEvent {
    Jump(usize),
    Dismiss,
}

impl EventHandler for ContentsState {
    type Event = ContentsEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ContentsEvent> {
        match event {
            TuiEvent::ScrollUp => {
                self.select(self.selected.saturating_sub(1));
                None
            }
            TuiEvent::ScrollDown => {
                self.select(self.selected + 1);
                None
            }
            TuiEvent::FirstPage => {
                self.select(0);
                None
            }
            TuiEvent::LastPage => {
                self.select(usize::MAX);
                None
            }
            TuiEvent::Select => (!self.titles.is_empty()).then_some(ContentsEvent::Jump(self.selected)),
            TuiEvent::Quit | TuiEvent::ToggleContents => Some(ContentsEvent::Dismiss),
            _ => None,
        }
    }
}

/// Transient render wrapper for the page list.
pub struct Contents<'a> {
    state: &'a mut ContentsState,
    /// Full-screen page rather than a centered overlay.
    as_page: bool,
}

impl<'a> Contents<'a> {
    pub fn overlay(state: &'a mut ContentsState) -> Self {
        Self {
            state,
            as_page: false,
        }
    }

    pub fn page(state: &'a mut ContentsState) -> Self {
        Self {
            state,
            as_page: true,
        }
    }
}

impl Component for Contents<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let area = if self.as_page {
            area
        } else {
            let overlay = centered_rect(70, 70, area);
            frame.render_widget(Clear, overlay);
            overlay
        };

        let help = if self.as_page {
            " ↑↓ Select  Enter Open  → Start "
        } else {
            " ↑↓ Select  Enter Open  Esc Back "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Contents ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help).centered())
            .padding(Padding::horizontal(1));

        let inner_width = usize::from(area.width.saturating_sub(4)); // borders + padding
        let number_width = self.state.titles.len().to_string().len();
        let items: Vec<ListItem> = self
            .state
            .titles
            .iter()
            .enumerate()
            .map(|(i, title)| {
                let number = format!("{:>number_width$}. ", i + 1);
                let title_width = inner_width.saturating_sub(number.width());
                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(number, style.fg(Color::DarkGray)),
                    Span::styled(truncate_str(title, title_width), style),
                ]))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

/// Truncate to `max_width` display columns, adding "…" if needed.
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    if max_width > 0 {
        out.push('…');
    }
    out
}

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn titles() -> Vec<String> {
        ["Welcome", "Details", "Wrap-up"].map(String::from).to_vec()
    }

    #[test]
    fn selection_is_clamped() {
        let mut state = ContentsState::new(titles(), 1);
        assert_eq!(state.selected, 1);
        state.handle_event(&TuiEvent::ScrollDown);
        state.handle_event(&TuiEvent::ScrollDown);
        assert_eq!(state.selected, 2);
        state.handle_event(&TuiEvent::FirstPage);
        state.handle_event(&TuiEvent::ScrollUp);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn select_jumps_and_escape_dismisses() {
        let mut state = ContentsState::new(titles(), 0);
        state.handle_event(&TuiEvent::LastPage);
        assert_eq!(state.handle_event(&TuiEvent::Select), Some(ContentsEvent::Jump(2)));
        assert_eq!(state.handle_event(&TuiEvent::Quit), Some(ContentsEvent::Dismiss));
        assert_eq!(state.handle_event(&TuiEvent::ToggleContents), Some(ContentsEvent::Dismiss));
        assert_eq!(state.handle_event(&TuiEvent::Next), None);
    }

    #[test]
    fn start_index_is_clamped() {
        let state = ContentsState::new(titles(), 99);
        assert_eq!(state.selected, 2);
    }

    #[test]
    fn truncation_respects_display_width() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("abcdefgh", 5), "abcd…");
        assert_eq!(truncate_str("日本語テキスト", 5), "日本…");
    }

    #[test]
    fn overlay_lists_numbered_titles() {
        let mut state = ContentsState::new(titles(), 0);
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal
            .draw(|f| Contents::overlay(&mut state).render(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Contents"));
        assert!(text.contains("1. Welcome"));
        assert!(text.contains("3. Wrap-up"));
    }
}
