//! TUI Widgets - UI Components
//!
//! Each widget renders a borrowed slice of [`AppState`](super::AppState)
//! into Ratatui primitives. Transient view state (tree expansion, scroll)
//! lives in the widget's own state type, never in the document model.

mod content;
mod styles;
mod toolbar;
mod tree;

pub use content::{ContentPane, CONTENT_PLACEHOLDER};
pub use styles::{inspect, Inspection, StylesPanel, NO_SELECTION_PLACEHOLDER, NO_STYLES};
pub use toolbar::{ErrorBanner, Toolbar};
pub use tree::{
    node_label, text_label, TreeHit, TreeRow, TreeView, TreeViewState, EMPTY_TREE_PLACEHOLDER,
    TEXT_PREVIEW_MAX, WHITESPACE_LABEL,
};

/// Common widget utilities
pub mod utils {
    use ratatui::layout::{Constraint, Flex, Layout, Rect};

    /// Truncate to `max_chars` characters, ending in `...` when cut
    pub fn truncate(s: &str, max_chars: usize) -> String {
        if s.chars().count() <= max_chars {
            s.to_string()
        } else if max_chars <= 3 {
            s.chars().take(max_chars).collect()
        } else {
            let mut out: String = s.chars().take(max_chars - 3).collect();
            out.push_str("...");
            out
        }
    }

    /// Rect of `width` x `height` centered in `area`
    pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
        let [row] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        let [cell] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(row);
        cell
    }
}

#[cfg(test)]
mod tests {
    use super::utils::*;
    use ratatui::layout::Rect;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("hi", 2), "hi");
        assert_eq!(truncate("hello", 2), "he");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        let s = "é".repeat(10);
        assert_eq!(truncate(&s, 10), s);
        assert_eq!(truncate(&s, 6), "ééé...");
    }

    #[test]
    fn test_centered() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered(area, 40, 10);
        assert_eq!(popup, Rect::new(30, 15, 40, 10));
    }
}
