//! Error types with fix suggestions

use thiserror::Error;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// Failure of a single parse request.
///
/// The message is display-ready and shown verbatim in the error banner.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Request never reached the backend, or its answer could not be read
    #[error("{0}")]
    Transport(String),

    /// Backend answered with a failure status
    #[error("{0}")]
    Service(String),
}

impl ClientError {
    /// Banner text
    pub fn message(&self) -> &str {
        match self {
            Self::Transport(msg) | Self::Service(msg) => msg,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Top-level error for the `styleview` binary
#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("{0}")]
    Client(#[from] ClientError),

    #[error("Invalid configuration: {details}")]
    Config { details: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FixSuggestion for ClientError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            ClientError::Transport(_) => {
                Some("Check the parse backend is running (see --api-base / STYLEVIEW_API_BASE)")
            }
            ClientError::Service(_) => Some("Check the file path exists on the backend host"),
        }
    }
}

impl FixSuggestion for ViewerError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            ViewerError::Client(e) => e.fix_suggestion(),
            ViewerError::Config { .. } => {
                Some("Use an absolute http(s) URL and a positive whole number of seconds")
            }
            ViewerError::Io(_) => Some("Check file path and permissions"),
        }
    }
}
