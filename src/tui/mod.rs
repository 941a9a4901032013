//! TUI Module - Styled tree inspector
//!
//! Architecture:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        UI LAYER (widgets/)                          │
//! │  Pure rendering. Toolbar, DOM tree, source pane, styles panel.      │
//! └─────────────────────────────────────────────────────────────────────┘
//!                               ▲
//!                               │ &AppState
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      DOMAIN LAYER (state.rs)                        │
//! │  AppState wraps ViewController plus per-snapshot tree state.        │
//! └─────────────────────────────────────────────────────────────────────┘
//!                               ▲
//!                               │ (LoadTicket, Result<Snapshot, _>)
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    CONNECTOR LAYER (client/)                        │
//! │  DocumentClient trait. Loads run on spawned tasks.                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

mod app;
mod events;
mod state;
mod theme;

pub mod widgets;

use std::sync::Arc;

use crate::client::DocumentClient;

pub use app::TuiApp;
pub use state::{AppState, PanelFocus, DEFAULT_PATH};
pub use theme::InspectorTheme;

/// Run the viewer; with `autoload` the initial path is loaded right away
pub async fn run(
    client: Arc<dyn DocumentClient>,
    initial_path: &str,
    autoload: bool,
) -> anyhow::Result<()> {
    TuiApp::new(client, initial_path).run(autoload).await
}
