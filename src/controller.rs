//! # View Controller
//!
//! Load/selection state machine. Sole owner of the current [`Snapshot`]
//! and selection; renderers borrow from it each frame.
//!
//! ```text
//!   Idle ──┐
//!  Loaded ─┼─ load_requested ──► Loading ──┬─ load_succeeded ──► Loaded
//!   Error ─┘                               └─ load_failed ─────► Error
//! ```
//!
//! A failed load keeps the previous snapshot on display. Each load hands out
//! a [`LoadTicket`]; completions carrying any other ticket are dropped, so a
//! late response can never overwrite a newer one.

use std::fmt;
use std::sync::Arc;

use crate::error::ClientError;
use crate::model::{NodePath, Snapshot, StyledNode};

/// Load status
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error(String),
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "IDLE"),
            Self::Loading => write!(f, "LOADING"),
            Self::Loaded => write!(f, "LOADED"),
            Self::Error(_) => write!(f, "ERROR"),
        }
    }
}

/// Handle tying a completion to the request that started it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// What a completion did to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// New snapshot installed; dependent view state must reset
    Replaced,
    /// Error recorded; snapshot untouched
    Failed,
    /// Not the outstanding request
    Stale,
}

#[derive(Debug, Default)]
pub struct ViewController {
    state: LoadState,
    snapshot: Option<Arc<Snapshot>>,
    selected: Option<NodePath>,
    pending: Option<LoadTicket>,
    next_sequence: u64,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// Message for the error banner, if any
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> Option<&Arc<Snapshot>> {
        self.snapshot.as_ref()
    }

    pub fn selected_path(&self) -> Option<&NodePath> {
        self.selected.as_ref()
    }

    /// Currently selected node, resolved against the held snapshot
    pub fn selected_node(&self) -> Option<&StyledNode> {
        let path = self.selected.as_ref()?;
        self.snapshot.as_deref()?.node_at(path)
    }

    /// Start a load. Rejected while another load is outstanding.
    ///
    /// Clears any error; the held snapshot stays until a success replaces it.
    pub fn load_requested(&mut self, path: &str) -> Option<LoadTicket> {
        if self.is_loading() {
            tracing::debug!(path, "Load ignored: another load is in flight");
            return None;
        }
        self.next_sequence += 1;
        let ticket = LoadTicket(self.next_sequence);
        tracing::info!(path, ticket = ticket.0, from = %self.state, "Load requested");
        self.pending = Some(ticket);
        self.state = LoadState::Loading;
        Some(ticket)
    }

    /// Apply the outcome of the load identified by `ticket`
    pub fn load_finished(
        &mut self,
        ticket: LoadTicket,
        outcome: Result<Snapshot, ClientError>,
    ) -> Applied {
        if self.pending != Some(ticket) {
            tracing::warn!(ticket = ticket.0, "Dropping stale load completion");
            return Applied::Stale;
        }
        self.pending = None;

        match outcome {
            Ok(snapshot) => {
                tracing::info!(
                    ticket = ticket.0,
                    nodes = snapshot.root.node_count(),
                    "Snapshot replaced"
                );
                self.snapshot = Some(Arc::new(snapshot));
                self.selected = None;
                self.state = LoadState::Loaded;
                Applied::Replaced
            }
            Err(err) => {
                tracing::warn!(ticket = ticket.0, error = %err, "Load failed");
                self.state = LoadState::Error(err.message().to_string());
                Applied::Failed
            }
        }
    }

    /// Select a node of the held snapshot.
    ///
    /// Accepted whenever a snapshot is on display, including while a newer
    /// load is in flight; unresolvable paths are ignored. Returns whether the
    /// selection changed.
    pub fn select(&mut self, path: NodePath) -> bool {
        let Some(snapshot) = self.snapshot.as_deref() else {
            return false;
        };
        if snapshot.node_at(&path).is_none() {
            tracing::debug!(path = %path, "Selection outside snapshot ignored");
            return false;
        }
        tracing::debug!(path = %path, "Node selected");
        self.selected = Some(path);
        true
    }
}
