use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin};
use ratatui::widgets::Paragraph;

use crate::core::navigation::Navigator;
use crate::tui::component::Component;
use crate::tui::components::{Contents, SlideView, StatusBar, TitlePage};
use crate::tui::{Screen, TuiState};

/// Horizontal breathing room around the slide body.
const SLIDE_MARGIN: Margin = Margin {
    horizontal: 2,
    vertical: 1,
};

pub fn draw_ui(frame: &mut Frame, navigator: &Navigator, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0)]);
    let [status_area, main_area] = layout.areas(frame.area());

    let mut status = match tui.screen {
        Screen::Title => StatusBar::for_screen(navigator, "Title", &tui.status_message),
        Screen::Contents => StatusBar::for_screen(navigator, "Contents", &tui.status_message),
        Screen::Slides => StatusBar::for_slide(navigator, &tui.status_message),
    };
    status.render(frame, status_area);

    // Slide background fills the whole body, margins included.
    frame.render_widget(Paragraph::new("").style(tui.settings.base), main_area);

    match tui.screen {
        Screen::Title => {
            TitlePage::new(&navigator.presentation().project_metadata, tui.settings.base)
                .render(frame, main_area);
        }
        Screen::Contents => Contents::page(&mut tui.contents_page).render(frame, main_area),
        Screen::Slides => {
            let body = main_area.inner(SLIDE_MARGIN);
            SlideView::new(&mut tui.slide, navigator.visible_blocks(), &tui.settings)
                .render(frame, body);
        }
    }

    if let Some(overlay) = tui.overlay.as_mut() {
        Contents::overlay(overlay).render(frame, main_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::core::config::ResolvedConfig;
    use crate::test_support::sample_navigator;
    use crate::tui::components::ContentsState;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(navigator: &Navigator, tui: &mut TuiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| draw_ui(f, navigator, tui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn title_screen() {
        let nav = sample_navigator();
        let mut tui = TuiState::new(&nav, &ResolvedConfig::default(), None);
        let text = screen(&nav, &mut tui);
        assert!(text.contains("Sample Deck │ Title"));
        assert!(text.contains("By Test Author"));
    }

    #[test]
    fn slide_shows_only_revealed_blocks() {
        let mut nav = sample_navigator();
        let mut tui = TuiState::new(&nav, &ResolvedConfig::default(), None);
        tui.screen = Screen::Slides;

        let text = screen(&nav, &mut tui);
        assert!(text.contains("Welcome"));
        assert!(!text.contains("Opening line"));

        update(&mut nav, Action::RevealNext);
        update(&mut nav, Action::RevealNext);
        tui.slide.follow();
        let text = screen(&nav, &mut tui);
        assert!(text.contains("Opening line"));
        assert!(text.contains("first point"));
        assert!(!text.contains("second point"));
        assert!(text.contains("Block 2/3"));
    }

    #[test]
    fn overlay_draws_over_the_slide() {
        let nav = sample_navigator();
        let mut tui = TuiState::new(&nav, &ResolvedConfig::default(), None);
        tui.screen = Screen::Slides;
        tui.overlay = Some(ContentsState::new(
            nav.presentation().titles().map(String::from).collect(),
            0,
        ));
        let text = screen(&nav, &mut tui);
        assert!(text.contains("Contents"));
        assert!(text.contains("2. Details"));
    }
}
