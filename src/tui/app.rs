//! TUI Application - Main entry point and run loop

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::events::{handle_key_event, handle_mouse_event, poll_event, Action};
use super::state::{AppState, PanelFocus};
use super::theme::{icons, InspectorTheme};
use super::widgets::{utils, ContentPane, ErrorBanner, StylesPanel, Toolbar, TreeView};
use crate::client::DocumentClient;
use crate::controller::{LoadState, LoadTicket};
use crate::error::ClientError;
use crate::model::Snapshot;

/// A finished load as reported by the background task
type LoadOutcome = (LoadTicket, Result<Snapshot, ClientError>);

const HELP: &[(&str, &str)] = &[
    ("Tab / Shift+Tab", "cycle panel focus"),
    ("Enter (path)", "load the file"),
    ("Ctrl+R", "reload"),
    ("↑↓ / j k", "move tree cursor"),
    ("PgUp / PgDn", "page"),
    ("Enter (tree)", "select node"),
    ("Space", "expand / collapse"),
    ("← →", "collapse / expand"),
    ("o or /", "edit path"),
    ("Mouse", "click toggle or label"),
    ("q / Ctrl+C", "quit"),
];

/// Screen regions of the last frame, shared with mouse handling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub toolbar: Rect,
    pub banner: Rect,
    pub tree: Rect,
    pub content: Rect,
    pub styles: Rect,
    pub footer: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect, has_error: bool) -> Self {
        let [toolbar, banner, main, styles, footer] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(u16::from(has_error)),
            Constraint::Min(6),
            Constraint::Percentage(30),
            Constraint::Length(1),
        ])
        .areas(area);
        let [tree, content] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(main);
        Self {
            toolbar,
            banner,
            tree,
            content,
            styles,
            footer,
        }
    }
}

/// TUI Application
pub struct TuiApp {
    state: AppState,
    theme: InspectorTheme,
    client: Arc<dyn DocumentClient>,
    layout: ScreenLayout,
    tx: mpsc::UnboundedSender<LoadOutcome>,
    rx: mpsc::UnboundedReceiver<LoadOutcome>,
}

impl TuiApp {
    /// Create a new TUI application with `initial_path` in the input box
    pub fn new(client: Arc<dyn DocumentClient>, initial_path: &str) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(initial_path),
            theme: InspectorTheme::new(),
            client,
            layout: ScreenLayout::default(),
            tx,
            rx,
        }
    }

    /// Run the TUI application
    pub async fn run(mut self, autoload: bool) -> anyhow::Result<()> {
        let mut terminal = self.setup_terminal()?;
        info!(client = self.client.name(), "viewer started");

        if autoload {
            self.start_load();
        }

        let result = self.main_loop(&mut terminal).await;

        self.restore_terminal(&mut terminal)?;

        result
    }

    /// Setup terminal for TUI
    fn setup_terminal(&self) -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore terminal to normal state
    fn restore_terminal(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<()> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }

    /// Main event loop
    async fn main_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<()> {
        let tick_rate = Duration::from_millis(16); // ~60fps

        loop {
            self.drain_completions();

            self.draw(terminal)?;

            // Loads run on other runtime workers while this blocks
            let action = match poll_event(tick_rate)? {
                Some(Event::Key(key)) => handle_key_event(key, &mut self.state),
                Some(Event::Mouse(mouse)) => handle_mouse_event(mouse, &mut self.state, &self.layout),
                _ => Action::None,
            };
            self.apply(action);

            if self.state.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.state.should_quit = true,
            Action::Load => self.start_load(),
            Action::None => {}
        }
    }

    /// Kick off a load for the current input on a background task
    fn start_load(&mut self) {
        let Some((ticket, path)) = self.state.request_load() else {
            debug!("load ignored (blank path or already loading)");
            return;
        };
        info!(path = %path, ticket = ticket.sequence(), "loading document");

        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = client.load_document(&path).await;
            // Receiver is gone only after the app has exited
            let _ = tx.send((ticket, outcome));
        });
    }

    /// Apply every load that finished since the last frame
    fn drain_completions(&mut self) {
        while let Ok((ticket, outcome)) = self.rx.try_recv() {
            self.state.finish_load(ticket, outcome);
        }
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| self.render(frame))?;
        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let layout = ScreenLayout::new(frame.area(), self.state.controller.error().is_some());
        self.layout = layout;

        let theme = &self.theme;
        let state = &mut self.state;
        let controller = &state.controller;
        let snapshot = controller.snapshot();

        let toolbar = Toolbar::new(state.input.value(), state.input.cursor(), theme)
            .loading(controller.is_loading())
            .focused(state.focus == PanelFocus::PathInput);
        if state.focus == PanelFocus::PathInput && !state.show_help {
            frame.set_cursor_position(toolbar.cursor_position(layout.toolbar));
        }
        frame.render_widget(toolbar, layout.toolbar);

        if let Some(message) = controller.error() {
            frame.render_widget(ErrorBanner::new(message, theme), layout.banner);
        }

        let tree = TreeView::new(snapshot.map(|s| &s.root), theme)
            .selected(controller.selected_path())
            .focused(state.focus == PanelFocus::Tree);
        frame.render_stateful_widget(tree, layout.tree, &mut state.tree);

        frame.render_widget(
            ContentPane::new(snapshot.map(|s| s.html.as_str()), theme)
                .scroll(state.content_scroll)
                .focused(state.focus == PanelFocus::Content),
            layout.content,
        );

        frame.render_widget(
            StylesPanel::new(controller.selected_node(), theme)
                .scroll(state.styles_scroll)
                .focused(state.focus == PanelFocus::Styles),
            layout.styles,
        );

        self.render_footer(frame, layout.footer);

        if self.state.show_help {
            self.render_help(frame);
        }
    }

    /// Status on the left, key hints after it
    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let theme = &self.theme;
        let controller = &self.state.controller;
        let status = match controller.state() {
            LoadState::Idle => Span::styled(" Idle ", theme.dimmed()),
            LoadState::Loading => {
                Span::styled(format!(" {} Loading ", icons::LOADING), theme.warning())
            }
            LoadState::Loaded => Span::styled(" Loaded ", theme.success()),
            LoadState::Error(_) => Span::styled(format!(" {} Error ", icons::ERROR), theme.error()),
        };

        let mut spans = vec![status];
        if let Some(path) = controller.selected_path() {
            spans.push(Span::styled(
                format!("{} {}  ", icons::SELECTED, path),
                theme.highlight(),
            ));
        }
        spans.extend([
            Span::styled("[q]", theme.accent()),
            Span::styled("uit  ", theme.dimmed()),
            Span::styled("[Tab]", theme.accent()),
            Span::styled(" focus  ", theme.dimmed()),
            Span::styled("[Enter]", theme.accent()),
            Span::styled(" load/select  ", theme.dimmed()),
            Span::styled("[Space]", theme.accent()),
            Span::styled(" toggle  ", theme.dimmed()),
            Span::styled("[F1]", theme.accent()),
            Span::styled(" help", theme.dimmed()),
        ]);

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_help(&self, frame: &mut Frame) {
        let theme = &self.theme;
        let height = u16::try_from(HELP.len()).unwrap_or(u16::MAX).saturating_add(2);
        let area = utils::centered(frame.area(), 50, height);

        let lines: Vec<Line> = HELP
            .iter()
            .map(|(keys, what)| {
                Line::from(vec![
                    Span::styled(format!(" {:<16}", keys), theme.accent()),
                    Span::styled(*what, theme.text()),
                ])
            })
            .collect();

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border(true))
                    .title(Span::styled(" KEYS ", theme.header())),
            ),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{demo_snapshot, MockDocumentClient};
    use ratatui::backend::TestBackend;

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = usize::from(buffer.area.width);
        buffer
            .content
            .chunks(width)
            .map(|cells| cells.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    async fn settle(app: &mut TuiApp) {
        for _ in 0..50 {
            app.drain_completions();
            if !app.state.controller.is_loading() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    #[test]
    fn test_layout_reserves_banner_only_on_error() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(ScreenLayout::new(area, false).banner.height, 0);
        let with_error = ScreenLayout::new(area, true);
        assert_eq!(with_error.banner.height, 1);
        assert_eq!(with_error.tree.y, 4);
        assert_eq!(with_error.tree.width + with_error.content.width, 100);
    }

    #[tokio::test]
    async fn test_initial_screen_shows_placeholders() {
        let client = Arc::new(MockDocumentClient::new());
        let mut app = TuiApp::new(client, "page.html");
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        app.draw(&mut terminal).unwrap();

        let shown = screen(&terminal);
        assert!(shown.contains("File Path: page.html"));
        assert!(shown.contains("Load an HTML file to see DOM structure"));
        assert!(shown.contains("HTML content will appear here..."));
        assert!(shown.contains("Select a node to view computed styles"));
    }

    #[tokio::test]
    async fn test_load_and_render_document() {
        let client = Arc::new(MockDocumentClient::new());
        client.queue(Ok(demo_snapshot()));
        let mut app = TuiApp::new(client.clone(), "demo.html");

        app.apply(Action::Load);
        assert!(app.state.controller.is_loading());
        settle(&mut app).await;

        assert_eq!(client.requests(), vec!["demo.html"]);
        assert_eq!(app.state.controller.state(), &LoadState::Loaded);

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        app.draw(&mut terminal).unwrap();
        let shown = screen(&terminal);
        assert!(shown.contains("▼ <html>"));
        assert!(shown.contains("1 <!DOCTYPE html>"));
    }

    #[tokio::test]
    async fn test_failed_load_shows_banner() {
        let client = Arc::new(MockDocumentClient::new());
        client.queue(Err(ClientError::Service("File not found".into())));
        let mut app = TuiApp::new(client, "missing.html");

        app.start_load();
        settle(&mut app).await;

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        app.draw(&mut terminal).unwrap();
        let shown = screen(&terminal);
        assert!(shown.contains("File not found"));
        assert!(shown.contains("Error"));
        assert_eq!(app.layout.banner.height, 1);
    }

    #[tokio::test]
    async fn test_help_overlay() {
        let client = Arc::new(MockDocumentClient::new());
        let mut app = TuiApp::new(client, "");
        app.state.show_help = true;
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        app.draw(&mut terminal).unwrap();
        assert!(screen(&terminal).contains("KEYS"));
    }
}
