//! Raw HTML panel (read-only, scrollable, line-numbered)

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::tui::theme::InspectorTheme;

pub const CONTENT_PLACEHOLDER: &str = "HTML content will appear here...";

pub struct ContentPane<'a> {
    html: Option<&'a str>,
    scroll: u16,
    focused: bool,
    theme: &'a InspectorTheme,
}

impl<'a> ContentPane<'a> {
    pub fn new(html: Option<&'a str>, theme: &'a InspectorTheme) -> Self {
        Self {
            html,
            scroll: 0,
            focused: false,
            theme,
        }
    }

    pub fn scroll(mut self, scroll: u16) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for ContentPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border(self.focused))
            .title(" SOURCE ");

        let lines: Vec<Line> = match self.html {
            None => vec![Line::styled(CONTENT_PLACEHOLDER, self.theme.dimmed())],
            Some(html) => {
                let total = html.lines().count().max(1);
                let gutter = total.to_string().len();
                html.lines()
                    .enumerate()
                    .map(|(index, line)| {
                        Line::from(vec![
                            Span::styled(
                                format!("{:>width$} ", index + 1, width = gutter),
                                self.theme.dimmed(),
                            ),
                            // Tabs would desync cell widths
                            Span::styled(line.replace('\t', "    "), self.theme.text()),
                        ])
                    })
                    .collect()
            }
        };

        Paragraph::new(lines)
            .block(block)
            .scroll((self.scroll, 0))
            .render(area, buf);
    }
}
