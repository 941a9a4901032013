//! Toolbar (file path input + load trigger) and the error banner

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::tui::theme::{icons, InspectorTheme};

const LABEL: &str = "File Path: ";
const LOAD: &str = "[ Load ]";
const LOADING: &str = "[ Loading... ]";

/// Path input line with a load button that reads "Loading..." while busy
pub struct Toolbar<'a> {
    value: &'a str,
    cursor: usize,
    loading: bool,
    focused: bool,
    theme: &'a InspectorTheme,
}

impl<'a> Toolbar<'a> {
    /// `cursor` is a char index into `value`
    pub fn new(value: &'a str, cursor: usize, theme: &'a InspectorTheme) -> Self {
        Self {
            value,
            cursor,
            loading: false,
            focused: false,
            theme,
        }
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn block(&self) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border(self.focused))
            .title(" STYLEVIEW ")
    }

    /// Where the terminal cursor belongs while typing
    pub fn cursor_position(&self, area: Rect) -> Position {
        let [_, input, _] = split(area);
        let start = window_start(self.cursor, usize::from(input.width));
        let offset = u16::try_from(self.cursor - start).unwrap_or(input.width);
        Position::new(input.x.saturating_add(offset), input.y)
    }

    /// Whether a terminal cell falls on the load button
    pub fn hits_button(area: Rect, column: u16, row: u16) -> bool {
        let [_, _, button] = split(area);
        button.contains(Position::new(column, row))
    }
}

/// [label, input, button] cells inside the border
fn split(area: Rect) -> [Rect; 3] {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    Layout::horizontal([
        Constraint::Length(LABEL.len() as u16),
        Constraint::Min(1),
        Constraint::Length(LOADING.len() as u16 + 1),
    ])
    .areas(inner)
}

/// First visible char so the cursor stays inside a `width`-wide field
fn window_start(cursor: usize, width: usize) -> usize {
    if width == 0 {
        return cursor;
    }
    cursor.saturating_sub(width - 1)
}

impl Widget for Toolbar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let [label, input, button] = split(area);
        self.block().render(area, buf);

        Paragraph::new(Span::styled(LABEL, theme.dimmed())).render(label, buf);

        let start = window_start(self.cursor, usize::from(input.width));
        let visible: String = self
            .value
            .chars()
            .skip(start)
            .take(usize::from(input.width))
            .collect();
        let input_style = if self.loading {
            theme.dimmed()
        } else {
            theme.text()
        };
        Paragraph::new(Span::styled(visible, input_style)).render(input, buf);

        let button_line = if self.loading {
            Line::from(vec![
                Span::raw(" "),
                Span::styled(LOADING, theme.warning()),
            ])
        } else {
            Line::from(vec![Span::raw(" "), Span::styled(LOAD, theme.accent())])
        };
        Paragraph::new(button_line).render(button, buf);
    }
}

/// One-line banner with the literal error message
pub struct ErrorBanner<'a> {
    message: &'a str,
    theme: &'a InspectorTheme,
}

impl<'a> ErrorBanner<'a> {
    pub fn new(message: &'a str, theme: &'a InspectorTheme) -> Self {
        Self { message, theme }
    }
}

impl Widget for ErrorBanner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(Line::from(vec![
            Span::styled(format!(" {} ", icons::ERROR), self.theme.error()),
            Span::styled(self.message, self.theme.error()),
        ]))
        .render(area, buf);
    }
}
