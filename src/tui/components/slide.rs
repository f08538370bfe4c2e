//! # SlideView Component
//!
//! Scrollable view of the current page's revealed blocks.
//!
//! ## Architecture
//!
//! `SlideView` is a transient component (created each frame) that wraps
//! `&'a mut SlideState` (persistent state) and the visible blocks (props).
//!
//! Block heights are cached per width. An `Effect::Append` from the core
//! only adds a block at the end, so the cache is kept and one height is
//! measured; anything else calls [`SlideState::invalidate`].
//!
//! While the presenter is revealing, the view sticks to the bottom so the
//! newest block is always on screen. Scrolling up by hand unpins it.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::model::Block;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::block_view::{BlockView, RenderSettings};
use crate::tui::event::TuiEvent;

/// Layout and scroll state for the slide view.
/// Must be persisted in the parent TuiState.
pub struct SlideState {
    pub scroll_state: ScrollViewState,
    /// Height of each block (gap included), valid for `cached_width`.
    heights: Vec<u16>,
    cached_width: u16,
    /// When true, keep the newest block in view.
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for SlideState {
    fn default() -> Self {
        Self::new()
    }
}

impl SlideState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            heights: Vec::new(),
            cached_width: 0,
            stick_to_bottom: true,
            viewport_height: 0,
        }
    }

    /// Drop cached heights and return to the top of the page. Call after
    /// any change other than an append.
    pub fn invalidate(&mut self) {
        self.heights.clear();
        self.scroll_state = ScrollViewState::default();
        self.stick_to_bottom = true;
    }

    /// Re-pin to the bottom so a freshly revealed block is visible.
    pub fn follow(&mut self) {
        self.stick_to_bottom = true;
    }

    pub fn total_height(&self) -> u16 {
        self.heights.iter().fold(0u16, |acc, h| acc.saturating_add(*h))
    }

    fn clamp_scroll(&mut self) {
        let max_y = self.total_height().saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    fn repin_if_at_bottom(&mut self) {
        let max_y = self.total_height().saturating_sub(self.viewport_height);
        if self.scroll_state.offset().y >= max_y {
            self.stick_to_bottom = true;
        }
    }

    /// Bring `heights` in line with `blocks`, measuring only what is new.
    fn measure(&mut self, blocks: &[Block], settings: &RenderSettings, width: u16) {
        if width != self.cached_width || self.heights.len() > blocks.len() {
            self.heights.clear();
            self.cached_width = width;
        }
        for block in &blocks[self.heights.len()..] {
            let view = BlockView::new(block, settings);
            self.heights.push(view.height(width).saturating_add(view.gap_after()));
        }
    }
}

pub struct SlideView<'a> {
    pub state: &'a mut SlideState,
    pub blocks: &'a [Block],
    pub settings: &'a RenderSettings,
}

impl<'a> SlideView<'a> {
    pub fn new(state: &'a mut SlideState, blocks: &'a [Block], settings: &'a RenderSettings) -> Self {
        Self {
            state,
            blocks,
            settings,
        }
    }
}

impl Component for SlideView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        self.state.measure(self.blocks, self.settings, content_width);
        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let total_height = self.state.total_height();
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y: u16 = 0;
        for (block, height) in self.blocks.iter().zip(&self.state.heights) {
            let view = BlockView::new(block, self.settings);
            let body = height.saturating_sub(view.gap_after());
            scroll_view.render_widget(view, Rect::new(0, y, content_width, body));
            y = y.saturating_add(*height);
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }
        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// Implemented on the state rather than `SlideView`, which is rebuilt every frame.
impl EventHandler for SlideState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::BlockKind;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn paragraphs(n: usize) -> Vec<Block> {
        (0..n)
            .map(|i| Block::new(BlockKind::Paragraph, format!("line {i}"), i + 1))
            .collect()
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn renders_blocks_in_order() {
        let blocks = paragraphs(3);
        let settings = RenderSettings::default();
        let mut state = SlideState::new();
        let mut terminal = Terminal::new(TestBackend::new(30, 5)).unwrap();
        terminal
            .draw(|f| SlideView::new(&mut state, &blocks, &settings).render(f, f.area()))
            .unwrap();
        let text = screen_text(&terminal);
        let first = text.find("line 0").unwrap();
        let last = text.find("line 2").unwrap();
        assert!(first < last);
        assert_eq!(state.total_height(), 3);
    }

    #[test]
    fn sticks_to_newest_block_when_overflowing() {
        let blocks = paragraphs(10);
        let settings = RenderSettings::default();
        let mut state = SlideState::new();
        let mut terminal = Terminal::new(TestBackend::new(30, 4)).unwrap();
        terminal
            .draw(|f| SlideView::new(&mut state, &blocks, &settings).render(f, f.area()))
            .unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("line 9"));
        assert!(!text.contains("line 0"));
    }

    #[test]
    fn append_reuses_measured_heights() {
        let blocks = paragraphs(3);
        let settings = RenderSettings::default();
        let mut state = SlideState::new();
        state.measure(&blocks[..2], &settings, 20);
        assert_eq!(state.heights.len(), 2);
        state.measure(&blocks, &settings, 20);
        assert_eq!(state.heights.len(), 3);

        // Fewer blocks (hide) or a new width forces a full re-measure.
        state.measure(&blocks[..1], &settings, 20);
        assert_eq!(state.heights.len(), 1);
        state.measure(&blocks, &settings, 10);
        assert_eq!(state.cached_width, 10);
        assert_eq!(state.heights.len(), 3);
    }

    #[test]
    fn scrolling_up_unpins() {
        let mut state = SlideState::new();
        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);
        state.invalidate();
        assert!(state.stick_to_bottom);
        assert_eq!(state.total_height(), 0);
    }
}
