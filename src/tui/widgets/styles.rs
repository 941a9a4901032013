//! Computed styles panel
//!
//! Lists the selected node's styles sorted by property name (ordinal,
//! ascending) as `property: value;` lines.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::tree::node_label;
use crate::model::StyledNode;
use crate::tui::theme::{icons, InspectorTheme};

pub const NO_SELECTION_PLACEHOLDER: &str = "Select a node to view computed styles";
pub const NO_STYLES: &str = "(no styles)";

/// What the panel shows for a given selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inspection<'a> {
    NoSelection,
    NoStyles,
    /// (property, value), sorted by property
    Entries(Vec<(&'a str, &'a str)>),
}

/// Deterministic view of a node's styles, independent of map order
pub fn inspect(node: Option<&StyledNode>) -> Inspection<'_> {
    let Some(node) = node else {
        return Inspection::NoSelection;
    };
    let mut entries: Vec<(&str, &str)> = node
        .styles()
        .iter()
        .map(|(property, value)| (property.as_str(), value.as_str()))
        .collect();
    if entries.is_empty() {
        return Inspection::NoStyles;
    }
    // Keys are unique, so an unstable sort is deterministic
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
    Inspection::Entries(entries)
}

impl Inspection<'_> {
    /// Plain-text lines, as printed by `dump --styles`
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::NoSelection => vec![NO_SELECTION_PLACEHOLDER.to_string()],
            Self::NoStyles => vec![NO_STYLES.to_string()],
            Self::Entries(entries) => entries
                .iter()
                .map(|(property, value)| format!("{}: {};", property, value))
                .collect(),
        }
    }
}

/// Computed styles panel widget
pub struct StylesPanel<'a> {
    node: Option<&'a StyledNode>,
    scroll: u16,
    focused: bool,
    theme: &'a InspectorTheme,
}

impl<'a> StylesPanel<'a> {
    pub fn new(node: Option<&'a StyledNode>, theme: &'a InspectorTheme) -> Self {
        Self {
            node,
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

impl Widget for StylesPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border(self.focused))
            .title(format!(" {} COMPUTED STYLES ", icons::STYLES));
        if let Some(node) = self.node {
            block = block.title_bottom(Line::styled(format!(" {} ", node_label(node)), theme.dimmed()));
        }

        let lines: Vec<Line> = match inspect(self.node) {
            Inspection::NoSelection => {
                vec![Line::styled(NO_SELECTION_PLACEHOLDER, theme.dimmed())]
            }
            Inspection::NoStyles => vec![Line::styled(NO_STYLES, theme.dimmed())],
            Inspection::Entries(entries) => entries
                .into_iter()
                .map(|(property, value)| {
                    Line::from(vec![
                        Span::styled(property, theme.property()),
                        Span::styled(": ", theme.dimmed()),
                        Span::styled(value, theme.style_value()),
                        Span::styled(";", theme.dimmed()),
                    ])
                })
                .collect(),
        };

        Paragraph::new(lines)
            .block(block)
            .scroll((self.scroll, 0))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_no_selection_placeholder() {
        assert_eq!(inspect(None), Inspection::NoSelection);
        assert_eq!(inspect(None).lines(), vec![NO_SELECTION_PLACEHOLDER]);
    }

    #[test]
    fn test_empty_styles_message() {
        let node = StyledNode::element("div");
        assert_eq!(inspect(Some(&node)), Inspection::NoStyles);
        assert_eq!(inspect(Some(&node)).lines(), vec![NO_STYLES]);
    }

    #[test]
    fn test_sorted_lines() {
        let node = StyledNode::element("div")
            .with_style("font-size", "12px")
            .with_style("color", "red");
        assert_eq!(
            inspect(Some(&node)).lines(),
            vec!["color: red;", "font-size: 12px;"]
        );
    }

    #[test]
    fn test_ordinal_not_locale_order() {
        let node = StyledNode::element("div")
            .with_style("b", "1")
            .with_style("B", "2")
            .with_style("-webkit-x", "3")
            .with_style("a", "4");
        let Inspection::Entries(entries) = inspect(Some(&node)) else {
            panic!("expected entries");
        };
        let keys: Vec<&str> = entries.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["-webkit-x", "B", "a", "b"]);
    }

    #[test]
    fn test_panel_renders_entries() {
        let theme = InspectorTheme::new();
        let node = StyledNode::element("div")
            .with_style("font-size", "12px")
            .with_style("color", "red");
        let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
        terminal
            .draw(|frame| frame.render_widget(StylesPanel::new(Some(&node), &theme), frame.area()))
            .unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        let color = content.find("color: red;").unwrap();
        let font = content.find("font-size: 12px;").unwrap();
        assert!(color < font);
        assert!(content.contains("<div>"));
    }

    proptest! {
        #[test]
        fn prop_inspector_sorted_regardless_of_insertion(
            pairs in prop::collection::hash_map("[a-z-]{1,12}", "[a-z0-9]{1,6}", 0..16)
        ) {
            let node = pairs
                .iter()
                .fold(StyledNode::text("x"), |n, (k, v)| n.with_style(k, v));
            match inspect(Some(&node)) {
                Inspection::NoStyles => prop_assert!(pairs.is_empty()),
                Inspection::Entries(entries) => {
                    let mut expected: Vec<(&str, &str)> =
                        pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
                    expected.sort();
                    prop_assert_eq!(entries, expected);
                }
                Inspection::NoSelection => prop_assert!(false, "node was given"),
            }
        }
    }
}
