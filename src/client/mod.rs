//! # Document Client
//!
//! Fetches a [`Snapshot`] for a file path from the parse backend.
//!
//! - [`DocumentClient`] - the async seam the viewer depends on
//! - [`HttpDocumentClient`] - production client (`POST <base>/parse`)
//! - [`MockDocumentClient`] - canned responses for tests and `--demo`
//!
//! Each call issues exactly one request: no retries, no caching. Failures
//! come back as [`ClientError::Transport`] or [`ClientError::Service`].

mod http;
mod mock;

pub use http::HttpDocumentClient;
pub use mock::{demo_snapshot, MockDocumentClient};

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::model::Snapshot;

/// Source of parsed, style-annotated documents
#[async_trait]
pub trait DocumentClient: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Parse the file at `path` (resolved by the backend, not locally)
    async fn load_document(&self, path: &str) -> Result<Snapshot, ClientError>;
}

/// Build the client for this run: the built-in demo source or HTTP
pub fn create_client(
    config: &ClientConfig,
    demo: bool,
) -> Result<Arc<dyn DocumentClient>, ClientError> {
    if demo {
        tracing::info!("Using built-in demo document source");
        return Ok(Arc::new(MockDocumentClient::demo()));
    }
    Ok(Arc::new(HttpDocumentClient::new(config)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client_by_mode() {
        let config = ClientConfig::default();
        assert_eq!(create_client(&config, true).unwrap().name(), "mock");
        assert_eq!(create_client(&config, false).unwrap().name(), "http");
    }
}
