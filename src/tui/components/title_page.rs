//! # Title Page Component
//!
//! Opening screen built from the front matter: the deck title centered and
//! wrapped, "By <author>" under it, the date in the bottom-left corner.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::model::ProjectMetadata;
use crate::tui::component::Component;

pub struct TitlePage<'a> {
    pub metadata: &'a ProjectMetadata,
    /// Project default color/background.
    pub base: Style,
}

impl<'a> TitlePage<'a> {
    pub fn new(metadata: &'a ProjectMetadata, base: Style) -> Self {
        Self { metadata, base }
    }

    fn title_lines(&self, width: u16) -> Vec<Line<'static>> {
        let title = self.metadata.title.as_deref().unwrap_or_default();
        let style = self.base.add_modifier(Modifier::BOLD);
        // Letter-spaced when it fits, plain wrap otherwise.
        let spaced: String = title
            .chars()
            .map(String::from)
            .collect::<Vec<_>>()
            .join(" ");
        let text = if spaced.chars().count() <= usize::from(width) {
            spaced
        } else {
            title.to_string()
        };
        textwrap::wrap(&text, usize::from(width.max(1)))
            .into_iter()
            .map(|line| Line::from(Span::styled(line.into_owned(), style)))
            .collect()
    }
}

impl Component for TitlePage<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Paragraph::new("").style(self.base), area);

        let mut lines = self.title_lines(area.width.saturating_sub(4));
        if let Some(author) = &self.metadata.author {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                format!("By {author}"),
                self.base.add_modifier(Modifier::ITALIC),
            )));
        }
        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);

        let [center] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), center);

        let [footer] = Layout::vertical([Constraint::Length(1)])
            .flex(Flex::End)
            .areas(area);
        if let Some(date) = &self.metadata.date {
            frame.render_widget(
                Paragraph::new(format!(" {date}")).style(self.base.fg(Color::DarkGray)),
                footer,
            );
        }
        frame.render_widget(
            Paragraph::new("→ start ")
                .style(self.base.add_modifier(Modifier::DIM))
                .alignment(Alignment::Right),
            footer,
        );
    }
}
