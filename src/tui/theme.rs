//! Inspector Theme - Visual Design System
//!
//! Dark devtools palette: tags in violet, attributes in amber, text runs in
//! teal, style properties and values in their own hues.

use ratatui::style::{Color, Modifier, Style};

/// Inspector color palette
pub struct InspectorTheme {
    // Markup palette
    pub tag_violet: Color,
    pub attr_amber: Color,
    pub value_green: Color,
    pub text_teal: Color,
    pub star_white: Color,

    // Style listing
    pub property_blue: Color,
    pub value_sage: Color,

    // Status colors
    pub success_green: Color,
    pub warning_orange: Color,
    pub error_red: Color,

    // Chrome
    pub border_dim: Color,
    pub selection_bg: Color,
}

impl Default for InspectorTheme {
    fn default() -> Self {
        Self {
            // Markup palette
            tag_violet: Color::Rgb(197, 134, 192), // #C586C0
            attr_amber: Color::Rgb(220, 180, 100), // #DCB464
            value_green: Color::Rgb(206, 145, 120), // #CE9178
            text_teal: Color::Rgb(78, 201, 176),   // #4EC9B0
            star_white: Color::Rgb(212, 212, 212), // #D4D4D4

            // Style listing
            property_blue: Color::Rgb(156, 220, 254), // #9CDCFE
            value_sage: Color::Rgb(181, 206, 168),    // #B5CEA8

            // Status colors
            success_green: Color::Rgb(63, 185, 80),   // #3FB950
            warning_orange: Color::Rgb(210, 153, 34), // #D29922
            error_red: Color::Rgb(248, 81, 73),       // #F85149

            // Chrome
            border_dim: Color::Rgb(90, 90, 90),
            selection_bg: Color::Rgb(38, 79, 120), // #264F78
        }
    }
}

impl InspectorTheme {
    /// Create a new theme instance
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Styles
    // ─────────────────────────────────────────────────────────────────────

    /// Default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.star_white)
    }

    /// Dimmed text style
    pub fn dimmed(&self) -> Style {
        Style::default().fg(Color::Rgb(128, 128, 128))
    }

    /// Bold header style
    pub fn header(&self) -> Style {
        Style::default()
            .fg(self.tag_violet)
            .add_modifier(Modifier::BOLD)
    }

    /// Accent style (amber)
    pub fn accent(&self) -> Style {
        Style::default().fg(self.attr_amber)
    }

    /// Focused panel border
    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.text_teal)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.success_green)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning_orange)
    }

    pub fn error(&self) -> Style {
        Style::default()
            .fg(self.error_red)
            .add_modifier(Modifier::BOLD)
    }

    /// Border for a panel, brighter when focused
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.highlight()
        } else {
            Style::default().fg(self.border_dim)
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Tree + Inspector
    // ─────────────────────────────────────────────────────────────────────

    pub fn tag(&self) -> Style {
        Style::default().fg(self.tag_violet)
    }

    pub fn attr_value(&self) -> Style {
        Style::default().fg(self.value_green)
    }

    pub fn text_node(&self) -> Style {
        Style::default().fg(self.text_teal)
    }

    pub fn property(&self) -> Style {
        Style::default().fg(self.property_blue)
    }

    pub fn style_value(&self) -> Style {
        Style::default().fg(self.value_sage)
    }

    /// Row under the keyboard cursor
    pub fn cursor(&self) -> Style {
        Style::default().bg(self.selection_bg)
    }

    /// Row of the selected node
    pub fn selected(&self) -> Style {
        Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Icons and Symbols
// ─────────────────────────────────────────────────────────────────────────────

/// UI Icons used throughout the TUI
pub mod icons {
    pub const EXPANDED: &str = "▼";
    pub const COLLAPSED: &str = "▶";
    pub const SELECTED: &str = "◉";
    pub const DOCUMENT: &str = "◎";
    pub const STYLES: &str = "◆";
    pub const ERROR: &str = "✖";
    pub const LOADING: &str = "◌";
}
