//! Event Handling - Keyboard and mouse input processing

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::time::Duration;

use super::app::ScreenLayout;
use super::state::{AppState, PanelFocus};
use super::widgets::{Toolbar, TreeHit};

/// Actions that need the app (not just state) to act on them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Load the path currently in the input box
    Load,
    None,
}

/// Handle keyboard events
pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Action {
    if key.kind == KeyEventKind::Release {
        return Action::None;
    }

    // Global keybindings (work in any panel)
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Action::Quit,
        (KeyModifiers::CONTROL, KeyCode::Char('r')) => return Action::Load,
        (_, KeyCode::F(1)) => {
            state.show_help = !state.show_help;
            return Action::None;
        }
        (KeyModifiers::NONE, KeyCode::Tab) => {
            state.focus = state.focus.next();
            return Action::None;
        }
        (_, KeyCode::BackTab) => {
            state.focus = state.focus.prev();
            return Action::None;
        }
        _ => {}
    }

    if state.show_help {
        // Any other key dismisses help
        state.show_help = false;
        return Action::None;
    }

    match state.focus {
        PanelFocus::PathInput => handle_input_key(key, state),
        PanelFocus::Tree => handle_tree_key(key, state),
        PanelFocus::Content => {
            scroll(&mut state.content_scroll, key);
            handle_panel_key(key, state)
        }
        PanelFocus::Styles => {
            scroll(&mut state.styles_scroll, key);
            handle_panel_key(key, state)
        }
    }
}

/// Path input: text editing, Enter loads
fn handle_input_key(key: KeyEvent, state: &mut AppState) -> Action {
    let input = &mut state.input;
    match key.code {
        KeyCode::Enter => return Action::Load,
        KeyCode::Esc => state.focus = PanelFocus::Tree,
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => input.clear(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => input.insert(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.left(),
        KeyCode::Right => input.right(),
        KeyCode::Home => input.home(),
        KeyCode::End => input.end(),
        _ => {}
    }
    Action::None
}

/// Tree: cursor movement, Enter selects, Space/←/→ expand and collapse
fn handle_tree_key(key: KeyEvent, state: &mut AppState) -> Action {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => state.move_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => state.move_cursor(1),
        KeyCode::PageUp => state.move_cursor(-page(state)),
        KeyCode::PageDown => state.move_cursor(page(state)),
        KeyCode::Home | KeyCode::Char('g') => state.tree.cursor_to_start(),
        KeyCode::End | KeyCode::Char('G') => state.cursor_to_end(),
        KeyCode::Enter => state.select_at_cursor(),
        KeyCode::Char(' ') => state.expand_at_cursor(None),
        KeyCode::Left | KeyCode::Char('h') => state.expand_at_cursor(Some(false)),
        KeyCode::Right | KeyCode::Char('l') => state.expand_at_cursor(Some(true)),
        _ => return handle_panel_key(key, state),
    }
    Action::None
}

/// Keys shared by all non-input panels
fn handle_panel_key(key: KeyEvent, state: &mut AppState) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('?') => {
            state.show_help = true;
            Action::None
        }
        KeyCode::Char('o') | KeyCode::Char('/') => {
            state.focus = PanelFocus::PathInput;
            Action::None
        }
        _ => Action::None,
    }
}

fn page(state: &AppState) -> isize {
    isize::try_from(state.tree.page_size()).unwrap_or(1)
}

fn scroll(offset: &mut u16, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => *offset = offset.saturating_sub(1),
        KeyCode::Down | KeyCode::Char('j') => *offset = offset.saturating_add(1),
        KeyCode::PageUp => *offset = offset.saturating_sub(10),
        KeyCode::PageDown => *offset = offset.saturating_add(10),
        KeyCode::Home | KeyCode::Char('g') => *offset = 0,
        _ => {}
    }
}

/// Handle mouse events: clicks focus panels, tree clicks toggle or select
pub fn handle_mouse_event(mouse: MouseEvent, state: &mut AppState, layout: &ScreenLayout) -> Action {
    let (column, row) = (mouse.column, mouse.row);
    let inside = |area: ratatui::layout::Rect| {
        area.contains(ratatui::layout::Position::new(column, row))
    };

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            state.show_help = false;
            if inside(layout.toolbar) {
                state.focus = PanelFocus::PathInput;
                if Toolbar::hits_button(layout.toolbar, column, row) {
                    return Action::Load;
                }
            } else if inside(layout.tree) {
                state.focus = PanelFocus::Tree;
                click_tree(state, column, row);
            } else if inside(layout.content) {
                state.focus = PanelFocus::Content;
            } else if inside(layout.styles) {
                state.focus = PanelFocus::Styles;
            }
        }
        MouseEventKind::ScrollDown | MouseEventKind::ScrollUp => {
            let delta: i16 = if mouse.kind == MouseEventKind::ScrollDown { 3 } else { -3 };
            if inside(layout.tree) {
                state.move_cursor(isize::from(delta));
            } else if inside(layout.content) {
                state.content_scroll = state.content_scroll.saturating_add_signed(delta);
            } else if inside(layout.styles) {
                state.styles_scroll = state.styles_scroll.saturating_add_signed(delta);
            }
        }
        _ => {}
    }
    Action::None
}

fn click_tree(state: &mut AppState, column: u16, row: u16) {
    let Some(snapshot) = state.controller.snapshot() else {
        return;
    };
    let root = &snapshot.root;
    match state.tree.hit(root, column, row) {
        Some(TreeHit::Toggle(path)) => {
            state.tree.toggle(root, &path);
        }
        Some(TreeHit::Select(path)) => state.select(path),
        None => {}
    }
}

/// Poll for terminal events with timeout
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        return Ok(Some(event::read()?));
    }
    Ok(None)
}
