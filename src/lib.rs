//! Styleview - terminal viewer for HTML documents and their computed-style trees

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod tui;

pub use client::{create_client, DocumentClient, HttpDocumentClient, MockDocumentClient};
pub use config::ClientConfig;
pub use controller::{Applied, LoadState, LoadTicket, ViewController};
pub use error::{ClientError, FixSuggestion, ViewerError};
pub use model::{NodePath, Snapshot, StyledNode};
