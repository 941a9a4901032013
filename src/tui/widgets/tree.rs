//! DOM tree panel
//!
//! Renders the styled tree one row per visible node, with per-node
//! expand/collapse keyed by [`NodePath`]. Every node starts expanded; a node
//! is visible iff all its ancestors are expanded. Traversal uses an explicit
//! stack so document depth never touches the call stack.
//!
//! ```text
//! ▼ <html>
//!   ▼ <body class="main">
//!     ▶ <ul>
//!       TEXT: "Hello"
//! ```

use std::collections::HashSet;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, StatefulWidget, Widget},
};

use super::utils::truncate;
use crate::model::{NodePath, StyledNode};
use crate::tui::theme::{icons, InspectorTheme};

/// Longest rendered text preview, ellipsis included
pub const TEXT_PREVIEW_MAX: usize = 50;

/// Label of a text node that is empty after trimming
pub const WHITESPACE_LABEL: &str = "TEXT: (whitespace)";

pub const EMPTY_TREE_PLACEHOLDER: &str = "Load an HTML file to see DOM structure";

/// Columns of indentation per depth level
const INDENT: u16 = 2;

/// Columns taken by the toggle glyph and its trailing space
const TOGGLE_WIDTH: u16 = 2;

// ─────────────────────────────────────────────────────────────────────────────
// Labels
// ─────────────────────────────────────────────────────────────────────────────

/// `<tag a="1" b="2">` for elements, `TEXT: "..."` for text runs
pub fn node_label(node: &StyledNode) -> String {
    match node {
        StyledNode::Element {
            tag_name,
            attributes,
            ..
        } => {
            let mut label = format!("<{}", tag_name);
            for (name, value) in attributes {
                label.push_str(&format!(" {}=\"{}\"", name, value));
            }
            label.push('>');
            label
        }
        StyledNode::Text { text, .. } => text_label(text),
    }
}

pub fn text_label(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return WHITESPACE_LABEL.to_string();
    }
    format!("TEXT: \"{}\"", truncate(trimmed, TEXT_PREVIEW_MAX))
}

// ─────────────────────────────────────────────────────────────────────────────
// View State
// ─────────────────────────────────────────────────────────────────────────────

/// One visible row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow<'a> {
    pub node: &'a StyledNode,
    pub path: NodePath,
    pub expanded: bool,
}

impl TreeRow<'_> {
    pub fn depth(&self) -> usize {
        self.path.depth()
    }

    /// Childless nodes have no toggle
    pub fn has_toggle(&self) -> bool {
        self.node.has_children()
    }

    pub fn label(&self) -> String {
        node_label(self.node)
    }
}

/// Result of a click inside the tree panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeHit {
    Toggle(NodePath),
    Select(NodePath),
}

/// Expand/collapse flags, keyboard cursor and scroll for one snapshot.
///
/// Must be [`reset`](Self::reset) whenever the snapshot is replaced.
#[derive(Debug, Default)]
pub struct TreeViewState {
    /// Paths whose flag is "collapsed"; everything else is expanded
    collapsed: HashSet<NodePath>,
    /// Index into the visible rows
    cursor: usize,
    /// First visible row index
    offset: usize,
    /// Inner area of the last render, for mouse hit testing
    area: Rect,
}

impl TreeViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all per-node state (new snapshot)
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_expanded(&self, path: &NodePath) -> bool {
        !self.collapsed.contains(path)
    }

    /// Flip one node's flag. No-op (returns false) for childless or
    /// unknown nodes.
    pub fn toggle(&mut self, root: &StyledNode, path: &NodePath) -> bool {
        let expanded = self.is_expanded(path);
        self.set_expanded(root, path, !expanded)
    }

    /// Set one node's flag; returns whether anything changed.
    ///
    /// The cursor stays on the same node, or lands on the collapsed
    /// ancestor when its row is hidden.
    pub fn set_expanded(&mut self, root: &StyledNode, path: &NodePath, expanded: bool) -> bool {
        if !root.node_at(path).is_some_and(StyledNode::has_children) {
            return false;
        }
        let anchor = self.cursor_path(root);
        let changed = if expanded {
            self.collapsed.remove(path)
        } else {
            self.collapsed.insert(path.clone())
        };
        if let Some(anchor) = anchor.filter(|_| changed) {
            self.follow(root, &anchor);
        }
        changed
    }

    /// Point the cursor at `anchor`, or at its deepest visible ancestor
    fn follow(&mut self, root: &StyledNode, anchor: &NodePath) {
        let rows = self.visible_rows(root);
        let index = rows
            .iter()
            .position(|row| &row.path == anchor)
            .or_else(|| rows.iter().rposition(|row| row.path.is_ancestor_of(anchor)));
        if let Some(index) = index {
            self.cursor = index;
        }
    }

    /// Visible rows in document order
    pub fn visible_rows<'a>(&self, root: &'a StyledNode) -> Vec<TreeRow<'a>> {
        let mut rows = Vec::new();
        let mut stack = vec![(root, NodePath::root())];
        while let Some((node, path)) = stack.pop() {
            let expanded = self.is_expanded(&path);
            if expanded {
                for (index, child) in node.children().iter().enumerate().rev() {
                    stack.push((child, path.child(index)));
                }
            }
            rows.push(TreeRow {
                node,
                path,
                expanded,
            });
        }
        rows
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor by `delta` rows, clamped to the visible rows
    pub fn move_cursor(&mut self, root: &StyledNode, delta: isize) {
        let last = self.visible_rows(root).len().saturating_sub(1);
        let target = self.cursor.saturating_add_signed(delta);
        self.cursor = target.min(last);
    }

    pub fn cursor_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_to_end(&mut self, root: &StyledNode) {
        self.cursor = self.visible_rows(root).len().saturating_sub(1);
    }

    /// Path of the row under the cursor
    pub fn cursor_path(&self, root: &StyledNode) -> Option<NodePath> {
        self.visible_rows(root)
            .into_iter()
            .nth(self.cursor)
            .map(|row| row.path)
    }

    /// Rows that fit in the last rendered area
    pub fn page_size(&self) -> usize {
        usize::from(self.area.height).max(1)
    }

    /// Map a terminal cell to a toggle or label hit
    pub fn hit(&self, root: &StyledNode, column: u16, row: u16) -> Option<TreeHit> {
        let area = self.area;
        if column < area.x
            || row < area.y
            || column >= area.x.saturating_add(area.width)
            || row >= area.y.saturating_add(area.height)
        {
            return None;
        }
        let index = self.offset + usize::from(row - area.y);
        let target = self.visible_rows(root).into_iter().nth(index)?;

        let depth = u16::try_from(target.depth()).unwrap_or(u16::MAX);
        let toggle_start = area.x.saturating_add(depth.saturating_mul(INDENT));
        let label_start = toggle_start.saturating_add(TOGGLE_WIDTH);

        if column >= label_start {
            Some(TreeHit::Select(target.path))
        } else if column >= toggle_start && target.has_toggle() {
            Some(TreeHit::Toggle(target.path))
        } else {
            None
        }
    }

    /// Clamp the cursor and scroll it into a window of `height` rows
    fn scroll_into_view(&mut self, row_count: usize, height: usize) {
        self.cursor = self.cursor.min(row_count.saturating_sub(1));
        if height == 0 {
            return;
        }
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + height {
            self.offset = self.cursor + 1 - height;
        }
        self.offset = self.offset.min(row_count.saturating_sub(height));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Widget
// ─────────────────────────────────────────────────────────────────────────────

/// DOM tree panel widget
pub struct TreeView<'a> {
    root: Option<&'a StyledNode>,
    selected: Option<&'a NodePath>,
    focused: bool,
    theme: &'a InspectorTheme,
}

impl<'a> TreeView<'a> {
    pub fn new(root: Option<&'a StyledNode>, theme: &'a InspectorTheme) -> Self {
        Self {
            root,
            selected: None,
            focused: false,
            theme,
        }
    }

    pub fn selected(mut self, selected: Option<&'a NodePath>) -> Self {
        self.selected = selected;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn row_line(&self, row: &TreeRow<'_>, is_cursor: bool) -> Line<'static> {
        let theme = self.theme;
        let indent = " ".repeat(row.depth() * usize::from(INDENT));
        let toggle = match (row.has_toggle(), row.expanded) {
            (false, _) => "  ".to_string(),
            (true, true) => format!("{} ", icons::EXPANDED),
            (true, false) => format!("{} ", icons::COLLAPSED),
        };

        let mut spans = vec![Span::raw(indent), Span::styled(toggle, theme.dimmed())];
        match row.node {
            StyledNode::Element {
                tag_name,
                attributes,
                ..
            } => {
                spans.push(Span::styled(format!("<{}", tag_name), theme.tag()));
                for (name, value) in attributes {
                    spans.push(Span::styled(format!(" {}", name), theme.accent()));
                    spans.push(Span::styled(format!("=\"{}\"", value), theme.attr_value()));
                }
                spans.push(Span::styled(">", theme.tag()));
            }
            StyledNode::Text { text, .. } => {
                spans.push(Span::styled(text_label(text), theme.text_node()));
            }
        }

        let mut line = Line::from(spans);
        if self.selected == Some(&row.path) {
            line = line.patch_style(theme.selected());
        }
        if is_cursor && self.focused {
            line = line.patch_style(theme.cursor());
        }
        line
    }
}

impl StatefulWidget for TreeView<'_> {
    type State = TreeViewState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border(self.focused))
            .title(format!(" {} DOM TREE ", icons::DOCUMENT));
        let inner = block.inner(area);
        block.render(area, buf);
        state.area = inner;

        let Some(root) = self.root else {
            Paragraph::new(Line::styled(EMPTY_TREE_PLACEHOLDER, self.theme.dimmed()))
                .render(inner, buf);
            return;
        };

        let rows = state.visible_rows(root);
        let height = usize::from(inner.height);
        state.scroll_into_view(rows.len(), height);

        let lines: Vec<Line> = rows
            .iter()
            .enumerate()
            .skip(state.offset)
            .take(height)
            .map(|(index, row)| self.row_line(row, index == state.cursor))
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
