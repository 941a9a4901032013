//! AppState - Domain Layer
//!
//! Wraps the [`ViewController`] with the purely visual state of the
//! terminal UI: path input, focus, tree expansion, scroll offsets.

use crate::controller::{Applied, LoadTicket, ViewController};
use crate::error::ClientError;
use crate::model::{NodePath, Snapshot};

use super::widgets::TreeViewState;

/// Pre-filled path when none is given on the command line
pub const DEFAULT_PATH: &str = "../backend/src/main/resources/sample.html";

// ─────────────────────────────────────────────────────────────────────────────
// Core State
// ─────────────────────────────────────────────────────────────────────────────

/// Main application state
#[derive(Debug)]
pub struct AppState {
    /// Load/selection state machine (owns the snapshot)
    pub controller: ViewController,

    // Per-snapshot view state
    pub tree: TreeViewState,
    pub content_scroll: u16,
    pub styles_scroll: u16,

    // UI state
    pub input: PathInput,
    pub focus: PanelFocus,
    pub show_help: bool,
    pub should_quit: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_PATH)
    }
}

impl AppState {
    pub fn new(initial_path: &str) -> Self {
        Self {
            controller: ViewController::new(),
            tree: TreeViewState::new(),
            content_scroll: 0,
            styles_scroll: 0,
            input: PathInput::new(initial_path),
            focus: PanelFocus::PathInput,
            show_help: false,
            should_quit: false,
        }
    }

    /// Begin loading the path in the input box, exactly as typed.
    ///
    /// Blank paths and requests made while a load is in flight are ignored.
    pub fn request_load(&mut self) -> Option<(LoadTicket, String)> {
        if self.input.value().trim().is_empty() {
            return None;
        }
        let path = self.input.value().to_string();
        let ticket = self.controller.load_requested(&path)?;
        Some((ticket, path))
    }

    /// Feed a finished load back in; resets view state on a new snapshot
    pub fn finish_load(&mut self, ticket: LoadTicket, outcome: Result<Snapshot, ClientError>) {
        if self.controller.load_finished(ticket, outcome) == Applied::Replaced {
            self.tree.reset();
            self.content_scroll = 0;
            self.styles_scroll = 0;
            self.focus = PanelFocus::Tree;
        }
    }

    /// Report a tree selection to the controller
    pub fn select(&mut self, path: NodePath) {
        if self.controller.select(path) {
            self.styles_scroll = 0;
        }
    }

    /// Select the row under the tree cursor
    pub fn select_at_cursor(&mut self) {
        let Some(snapshot) = self.controller.snapshot() else {
            return;
        };
        if let Some(path) = self.tree.cursor_path(&snapshot.root) {
            self.select(path);
        }
    }

    /// Toggle (`None`) or force (`Some`) the expansion of the cursor row
    pub fn expand_at_cursor(&mut self, expanded: Option<bool>) {
        let Some(snapshot) = self.controller.snapshot() else {
            return;
        };
        let root = &snapshot.root;
        let Some(path) = self.tree.cursor_path(root) else {
            return;
        };
        match expanded {
            None => self.tree.toggle(root, &path),
            Some(flag) => self.tree.set_expanded(root, &path, flag),
        };
    }

    /// Move the tree cursor
    pub fn move_cursor(&mut self, delta: isize) {
        if let Some(snapshot) = self.controller.snapshot() {
            self.tree.move_cursor(&snapshot.root, delta);
        }
    }

    pub fn cursor_to_end(&mut self) {
        if let Some(snapshot) = self.controller.snapshot() {
            self.tree.cursor_to_end(&snapshot.root);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Focus
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelFocus {
    PathInput,
    Tree,
    Content,
    Styles,
}

impl PanelFocus {
    pub fn next(self) -> Self {
        match self {
            Self::PathInput => Self::Tree,
            Self::Tree => Self::Content,
            Self::Content => Self::Styles,
            Self::Styles => Self::PathInput,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::PathInput => Self::Styles,
            Self::Tree => Self::PathInput,
            Self::Content => Self::Tree,
            Self::Styles => Self::Content,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Path Input
// ─────────────────────────────────────────────────────────────────────────────

/// Single-line text field; the cursor is a char index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathInput {
    value: String,
    cursor: usize,
}

impl PathInput {
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(i, _)| i)
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}
