//! Mock document client
//!
//! Returns queued responses without making network calls. Backs unit tests
//! and the `--demo` mode.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use super::DocumentClient;
use crate::error::ClientError;
use crate::model::{Snapshot, StyledNode};

type Outcome = Result<Snapshot, ClientError>;

/// Mock client that answers from a FIFO queue
#[derive(Clone)]
pub struct MockDocumentClient {
    /// Queue of outcomes to return (FIFO)
    responses: Arc<Mutex<VecDeque<Outcome>>>,
    /// Returned when the queue is empty
    fallback: Outcome,
    /// Every requested path, in call order
    requests: Arc<Mutex<Vec<String>>>,
    /// Simulated round-trip time
    latency: Duration,
}

impl MockDocumentClient {
    /// Empty queue; unqueued calls fail as if the backend were down
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            fallback: Err(ClientError::Transport("connection refused".to_string())),
            requests: Arc::new(Mutex::new(Vec::new())),
            latency: Duration::ZERO,
        }
    }

    /// Always answers with the built-in sample document
    pub fn demo() -> Self {
        Self::new()
            .with_fallback(Ok(demo_snapshot()))
            .with_latency(Duration::from_millis(300))
    }

    pub fn with_fallback(mut self, outcome: Outcome) -> Self {
        self.fallback = outcome;
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Queue the next outcome
    pub fn queue(&self, outcome: Outcome) {
        lock(&self.responses).push_back(outcome);
    }

    /// All paths requested so far
    pub fn requests(&self) -> Vec<String> {
        lock(&self.requests).clone()
    }
}

impl Default for MockDocumentClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentClient for MockDocumentClient {
    fn name(&self) -> &str {
        "mock"
    }

    async fn load_document(&self, path: &str) -> Result<Snapshot, ClientError> {
        lock(&self.requests).push(path.to_string());
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let outcome = lock(&self.responses).pop_front();
        outcome.unwrap_or_else(|| self.fallback.clone())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

const DEMO_HTML: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <style>
      body { margin: 8px; font-family: serif; }
      h1 { font-size: 32px; color: navy; }
      .intro { color: #333; line-height: 1.5; }
    </style>
  </head>
  <body>
    <h1 id="title">Styled trees</h1>
    <p class="intro" data-role="lead">Each node carries the values the cascade settled on, so you can see why it looks the way it does.</p>
  </body>
</html>
"#;

/// Sample document served by `--demo`
pub fn demo_snapshot() -> Snapshot {
    let css = "\n      body { margin: 8px; font-family: serif; }\n      h1 { font-size: 32px; color: navy; }\n      .intro { color: #333; line-height: 1.5; }\n    ";
    let ws = |s: &str| StyledNode::text(s);

    let head = StyledNode::element("head")
        .with_style("display", "none")
        .with_child(ws("\n    "))
        .with_child(
            StyledNode::element("style")
                .with_style("display", "none")
                .with_child(StyledNode::text(css)),
        )
        .with_child(ws("\n  "));

    let body = StyledNode::element("body")
        .with_style("display", "block")
        .with_style("margin", "8px")
        .with_style("font-family", "serif")
        .with_child(ws("\n    "))
        .with_child(
            StyledNode::element("h1")
                .with_attribute("id", "title")
                .with_style("display", "block")
                .with_style("font-size", "32px")
                .with_style("color", "navy")
                .with_style("font-family", "serif")
                .with_child(StyledNode::text("Styled trees").with_style("color", "navy")),
        )
        .with_child(ws("\n    "))
        .with_child(
            StyledNode::element("p")
                .with_attribute("class", "intro")
                .with_attribute("data-role", "lead")
                .with_style("display", "block")
                .with_style("color", "#333")
                .with_style("line-height", "1.5")
                .with_style("font-family", "serif")
                .with_child(
                    StyledNode::text(
                        "Each node carries the values the cascade settled on, so you can see why it looks the way it does.",
                    )
                    .with_style("color", "#333"),
                ),
        )
        .with_child(ws("\n  "));

    let html = StyledNode::element("html")
        .with_style("display", "block")
        .with_child(ws("\n  "))
        .with_child(head)
        .with_child(ws("\n  "))
        .with_child(body)
        .with_child(ws("\n"));

    Snapshot::new(DEMO_HTML, html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_queue_then_fallback() {
        let client = MockDocumentClient::new();
        client.queue(Ok(Snapshot::new("<p>", StyledNode::element("p"))));

        let first = client.load_document("a.html").await.unwrap();
        assert_eq!(first.root, StyledNode::element("p"));

        let second = client.load_document("b.html").await.unwrap_err();
        assert_eq!(second.message(), "connection refused");

        assert_eq!(client.requests(), vec!["a.html", "b.html"]);
    }

    #[tokio::test]
    async fn test_demo_serves_sample() {
        let client = MockDocumentClient::demo().with_latency(Duration::ZERO);
        let snapshot = client.load_document("anything.html").await.unwrap();
        assert_eq!(snapshot.root.tag_name(), Some("html"));
        assert!(snapshot.html.contains("Styled trees"));
        assert!(snapshot.root.node_count() > 10);
    }
}
