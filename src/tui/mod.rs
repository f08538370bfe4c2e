//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the deck,
//! and translates keyboard events into core `Action` values.
//!
//! This is the only module that knows about ratatui and crossterm. The
//! core never learns about the title page or the contents page: those are
//! screens in front of page 0 that only this adapter knows about.
//!
//! ```text
//!   Title ──→ Contents ──→ Slides (page 0 … n-1)
//!     ↑   ←──          ←── PrevPage on page 0
//! ```
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 250ms per poll and only
//! redraws after an event (key or resize). All queued events are drained
//! before the next draw so holding a key doesn't lag behind.

mod component;
mod components;
mod event;
pub mod markdown;
pub mod style;
mod ui;

use std::io::stdout;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use log::{debug, info, warn};
use ratatui::style::Style;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::loader;
use crate::core::model::ProjectMetadata;
use crate::core::navigation::Navigator;
use crate::tui::component::EventHandler;
use crate::tui::components::{ContentsEvent, ContentsState, RenderSettings, SlideState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const POLL_TIMEOUT: Duration = Duration::from_millis(250);

/// Which full-screen view is up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Title,
    Contents,
    Slides,
}

/// TUI-specific presentation state (not part of the core deck model)
pub struct TuiState {
    pub screen: Screen,
    // Persistent component states
    pub slide: SlideState,
    pub contents_page: ContentsState,
    /// Contents overlay (None = hidden)
    pub overlay: Option<ContentsState>,
    pub settings: RenderSettings,
    /// Shown in the status bar until the next key press.
    pub status_message: String,
    /// Deck file, re-read on `r`.
    pub source: Option<PathBuf>,
    title_page_enabled: bool,
}

impl TuiState {
    pub fn new(navigator: &Navigator, config: &ResolvedConfig, source: Option<PathBuf>) -> Self {
        let mut tui = Self {
            screen: Screen::Slides,
            slide: SlideState::new(),
            contents_page: ContentsState::new(Vec::new(), 0),
            overlay: None,
            settings: RenderSettings {
                base: Style::default(),
                code_theme: config.code_theme.clone(),
                line_numbers: config.line_numbers,
            },
            status_message: String::new(),
            source,
            title_page_enabled: config.title_page,
        };
        tui.sync_with_deck(navigator);
        tui.screen = tui.opening_screen(navigator);
        tui
    }

    fn has_title_page(&self, navigator: &Navigator) -> bool {
        self.title_page_enabled && navigator.presentation().project_metadata.title.is_some()
    }

    fn has_contents_page(navigator: &Navigator) -> bool {
        navigator.presentation().project_metadata.show_table_of_contents
    }

    fn opening_screen(&self, navigator: &Navigator) -> Screen {
        if self.has_title_page(navigator) {
            Screen::Title
        } else if Self::has_contents_page(navigator) {
            Screen::Contents
        } else {
            Screen::Slides
        }
    }

    /// The screen that PrevPage on `from` goes back to, if any.
    fn screen_before(&self, from: Screen, navigator: &Navigator) -> Option<Screen> {
        match from {
            Screen::Title => None,
            Screen::Contents => self.has_title_page(navigator).then_some(Screen::Title),
            Screen::Slides => {
                if Self::has_contents_page(navigator) {
                    Some(Screen::Contents)
                } else {
                    self.has_title_page(navigator).then_some(Screen::Title)
                }
            }
        }
    }

    /// Rebuild everything derived from the deck (after startup or a reload).
    fn sync_with_deck(&mut self, navigator: &Navigator) {
        self.settings.base = base_style(&navigator.presentation().project_metadata);
        let titles = navigator.presentation().titles().map(String::from).collect();
        self.contents_page = ContentsState::new(titles, navigator.state().page_index);
        self.overlay = None;
        self.slide.invalidate();
    }

    fn show_slides(&mut self) {
        self.screen = Screen::Slides;
        self.slide.invalidate();
    }

    /// Apply a core effect to the view. Returns true on quit.
    fn apply(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::None => {}
            Effect::Append => self.slide.follow(),
            Effect::Redraw => self.slide.invalidate(),
            Effect::Rejected(reason) => self.status_message = reason,
            Effect::Quit => return true,
        }
        false
    }
}

/// Project default color/background as a ratatui style.
fn base_style(metadata: &ProjectMetadata) -> Style {
    let mut base = Style::default();
    if let Some(color) = metadata.default_color.as_deref().and_then(style::parse_color) {
        base = base.fg(color);
    }
    if let Some(bg) = metadata.default_background.as_deref().and_then(style::parse_color) {
        base = base.bg(bg);
    }
    base
}

/// Handle one event. Returns true when the presenter asked to quit.
fn handle_event(navigator: &mut Navigator, tui: &mut TuiState, event: TuiEvent) -> bool {
    if event == TuiEvent::Resize {
        return false;
    }
    tui.status_message.clear();

    // ForceQuit (Ctrl+C) always quits, overlay or not
    if event == TuiEvent::ForceQuit {
        return tui.apply(update(navigator, Action::Quit));
    }

    // When the overlay is open, route all events to it
    if let Some(overlay) = tui.overlay.as_mut() {
        match overlay.handle_event(&event) {
            Some(ContentsEvent::Jump(page)) => {
                tui.overlay = None;
                update(navigator, Action::JumpToPage(page));
                tui.show_slides();
            }
            Some(ContentsEvent::Dismiss) => tui.overlay = None,
            None => {}
        }
        return false;
    }

    match event {
        TuiEvent::ToggleContents => {
            let titles = navigator.presentation().titles().map(String::from).collect();
            tui.overlay = Some(ContentsState::new(titles, navigator.state().page_index));
            return false;
        }
        TuiEvent::Reload => {
            reload(navigator, tui);
            return false;
        }
        _ => {}
    }

    match tui.screen {
        Screen::Title => match event {
            TuiEvent::Next | TuiEvent::Select | TuiEvent::NextPage => {
                if TuiState::has_contents_page(navigator) {
                    tui.screen = Screen::Contents;
                } else {
                    tui.show_slides();
                }
                false
            }
            TuiEvent::LastPage => {
                update(navigator, Action::JumpToPage(usize::MAX));
                tui.show_slides();
                false
            }
            TuiEvent::Quit => tui.apply(update(navigator, Action::Quit)),
            _ => false,
        },
        Screen::Contents => match event {
            TuiEvent::Next | TuiEvent::NextPage => {
                update(navigator, Action::JumpToPage(0));
                tui.show_slides();
                false
            }
            TuiEvent::Previous | TuiEvent::PrevPage => {
                if let Some(screen) = tui.screen_before(Screen::Contents, navigator) {
                    tui.screen = screen;
                }
                false
            }
            TuiEvent::Quit => tui.apply(update(navigator, Action::Quit)),
            other => {
                if let Some(ContentsEvent::Jump(page)) = tui.contents_page.handle_event(&other) {
                    update(navigator, Action::JumpToPage(page));
                    tui.show_slides();
                }
                false
            }
        },
        Screen::Slides => {
            let action = match event {
                TuiEvent::Next | TuiEvent::Select => Action::RevealNext,
                TuiEvent::Previous => Action::HideLast,
                TuiEvent::NextPage => Action::NextPage,
                TuiEvent::PrevPage => {
                    if navigator.is_first_page()
                        && let Some(screen) = tui.screen_before(Screen::Slides, navigator)
                    {
                        tui.contents_page = ContentsState::new(
                            tui.contents_page.titles.clone(),
                            navigator.state().page_index,
                        );
                        tui.screen = screen;
                        return false;
                    }
                    Action::PrevPage
                }
                TuiEvent::FirstPage => Action::JumpToPage(0),
                TuiEvent::LastPage => Action::JumpToPage(usize::MAX),
                TuiEvent::Quit => Action::Quit,
                TuiEvent::ScrollUp | TuiEvent::ScrollDown => {
                    tui.slide.handle_event(&event);
                    return false;
                }
                _ => return false,
            };
            tui.apply(update(navigator, action))
        }
    }
}

/// Re-read the deck file and swap it in. A file that no longer parses to
/// any page leaves the current deck on screen.
fn reload(navigator: &mut Navigator, tui: &mut TuiState) {
    let Some(path) = tui.source.clone() else {
        tui.status_message = "Nothing to reload".to_string();
        return;
    };
    let text = match loader::read_text(&path) {
        Ok(text) => text,
        Err(e) => {
            warn!("Reload failed: {e}");
            tui.status_message = format!("Reload failed: {e}");
            return;
        }
    };
    match update(navigator, Action::Load(text)) {
        Effect::Rejected(reason) => {
            tui.status_message = format!("Reload refused: {reason}");
        }
        _ => {
            info!("Reloaded {}", path.display());
            tui.sync_with_deck(navigator);
            if tui.screen != Screen::Slides && tui.screen != tui.opening_screen(navigator) {
                tui.screen = tui.opening_screen(navigator);
            }
            tui.status_message = format!("Reloaded ({} pages)", navigator.page_count());
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, Hide)?;
        info!("Terminal modes enabled (mouse wheel, hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, Show);
    }
}

pub fn run(mut navigator: Navigator, config: ResolvedConfig, source: PathBuf) -> std::io::Result<()> {
    let mut tui = TuiState::new(&navigator, &config, Some(source));
    info!(
        "Presenting {} pages, opening on {:?}",
        navigator.page_count(),
        tui.screen
    );

    let mut terminal = ratatui::init();
    let terminal_mode_guard = TerminalModeGuard::new();
    let mut needs_redraw = true; // Force first frame

    let result = loop {
        if needs_redraw {
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &navigator, &mut tui)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(POLL_TIMEOUT);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            debug!("Event: {event:?} on {:?}", tui.screen);
            if handle_event(&mut navigator, &mut tui, event) {
                should_quit = true;
                break;
            }
        }
        if should_quit {
            break Ok(());
        }
    };

    drop(terminal_mode_guard);
    ratatui::restore();
    info!("Presentation closed");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::navigation::NavigationState;
    use crate::core::parser::parse;
    use crate::test_support::sample_navigator;

    fn config() -> ResolvedConfig {
        ResolvedConfig::default()
    }

    fn with_contents() -> Navigator {
        let text = "<!--\ntitle: Talk\ntoc: true\n-->\n# One\nbody\n# Two\n# Three\n";
        Navigator::new(parse(text)).unwrap()
    }

    fn press(nav: &mut Navigator, tui: &mut TuiState, events: &[TuiEvent]) -> bool {
        let mut quit = false;
        for event in events {
            quit = handle_event(nav, tui, *event);
        }
        quit
    }

    #[test]
    fn opens_on_title_page_when_deck_has_a_title() {
        let nav = sample_navigator();
        assert_eq!(TuiState::new(&nav, &config(), None).screen, Screen::Title);

        let no_title = ResolvedConfig {
            title_page: false,
            ..config()
        };
        assert_eq!(TuiState::new(&nav, &no_title, None).screen, Screen::Slides);
    }

    #[test]
    fn title_then_contents_then_slides() {
        let mut nav = with_contents();
        let mut tui = TuiState::new(&nav, &config(), None);
        assert_eq!(tui.screen, Screen::Title);
        press(&mut nav, &mut tui, &[TuiEvent::Next]);
        assert_eq!(tui.screen, Screen::Contents);
        press(&mut nav, &mut tui, &[TuiEvent::Next]);
        assert_eq!(tui.screen, Screen::Slides);
        assert_eq!(nav.state(), NavigationState::START);

        // Back out again from page 0.
        press(&mut nav, &mut tui, &[TuiEvent::PrevPage]);
        assert_eq!(tui.screen, Screen::Contents);
        press(&mut nav, &mut tui, &[TuiEvent::PrevPage]);
        assert_eq!(tui.screen, Screen::Title);
    }

    #[test]
    fn contents_page_jumps_to_selection() {
        let mut nav = with_contents();
        let mut tui = TuiState::new(&nav, &config(), None);
        press(
            &mut nav,
            &mut tui,
            &[TuiEvent::Next, TuiEvent::ScrollDown, TuiEvent::ScrollDown, TuiEvent::Select],
        );
        assert_eq!(tui.screen, Screen::Slides);
        assert_eq!(nav.state().page_index, 2);
    }

    #[test]
    fn slide_keys_drive_the_navigator() {
        let mut nav = sample_navigator();
        let mut tui = TuiState::new(&nav, &config(), None);
        press(&mut nav, &mut tui, &[TuiEvent::Select, TuiEvent::Next, TuiEvent::Next]);
        assert_eq!(tui.screen, Screen::Slides);
        assert_eq!(nav.state().reveal_count, 3);

        press(&mut nav, &mut tui, &[TuiEvent::Previous]);
        assert_eq!(nav.state().reveal_count, 2);

        press(&mut nav, &mut tui, &[TuiEvent::LastPage]);
        assert!(nav.is_last_page());
        press(&mut nav, &mut tui, &[TuiEvent::FirstPage, TuiEvent::NextPage]);
        assert_eq!(nav.state().page_index, 1);
    }

    #[test]
    fn overlay_captures_keys_until_dismissed() {
        let mut nav = sample_navigator();
        let mut tui = TuiState::new(&nav, &config(), None);
        press(&mut nav, &mut tui, &[TuiEvent::Next, TuiEvent::ToggleContents]);
        assert!(tui.overlay.is_some());

        // `q` closes the overlay rather than quitting.
        assert!(!press(&mut nav, &mut tui, &[TuiEvent::Quit]));
        assert!(tui.overlay.is_none());

        press(
            &mut nav,
            &mut tui,
            &[TuiEvent::ToggleContents, TuiEvent::LastPage, TuiEvent::Select],
        );
        assert!(tui.overlay.is_none());
        assert!(nav.is_last_page());
    }

    #[test]
    fn quit_and_force_quit() {
        let mut nav = sample_navigator();
        let mut tui = TuiState::new(&nav, &config(), None);
        assert!(press(&mut nav, &mut tui, &[TuiEvent::Quit]));

        let mut tui = TuiState::new(&nav, &config(), None);
        press(&mut nav, &mut tui, &[TuiEvent::ToggleContents]);
        assert!(press(&mut nav, &mut tui, &[TuiEvent::ForceQuit]));
    }

    #[test]
    fn reload_reads_the_file_again() {
        let path = std::env::temp_dir().join(format!("shellshow-tui-{}.md", std::process::id()));
        std::fs::write(&path, "# Only\n").unwrap();
        let mut nav = loader::open(&path).unwrap();
        let mut tui = TuiState::new(&nav, &config(), Some(path.clone()));
        assert_eq!(tui.screen, Screen::Slides);

        std::fs::write(&path, "# One\n# Two\n").unwrap();
        press(&mut nav, &mut tui, &[TuiEvent::Reload]);
        assert_eq!(nav.page_count(), 2);
        assert_eq!(tui.contents_page.titles, vec!["One", "Two"]);
        assert!(tui.status_message.starts_with("Reloaded"));

        // A file with no pages is refused and the deck stays.
        std::fs::write(&path, "no headings\n").unwrap();
        press(&mut nav, &mut tui, &[TuiEvent::Reload]);
        assert_eq!(nav.page_count(), 2);
        assert!(tui.status_message.starts_with("Reload refused"));

        std::fs::remove_file(&path).unwrap();
        press(&mut nav, &mut tui, &[TuiEvent::Reload]);
        assert!(tui.status_message.starts_with("Reload failed"));
    }

    #[test]
    fn front_matter_colors_become_the_base_style() {
        let metadata = ProjectMetadata {
            default_color: Some("bright_cyan".into()),
            default_background: Some("#101010".into()),
            ..Default::default()
        };
        let base = base_style(&metadata);
        assert_eq!(base.fg, Some(ratatui::style::Color::LightCyan));
        assert_eq!(base.bg, Some(ratatui::style::Color::Rgb(0x10, 0x10, 0x10)));
    }
}
