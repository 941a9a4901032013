//! HTTP client for the parse backend
//!
//! `POST <base>/parse` with `{ "filePath": ... }`, answered by
//! `{ "htmlContent": ..., "styledTree": ... }` or, on failure, a non-2xx
//! status with `{ "error": ... }`.

use std::time::Instant;

use async_trait::async_trait;
use url::Url;

use super::DocumentClient;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::model::{ErrorBody, ParseRequest, ParseResponse, Snapshot};

/// Production document client
pub struct HttpDocumentClient {
    /// HTTP client (carries the request timeout)
    client: reqwest::Client,
    /// Full parse endpoint URL
    parse_url: Url,
}

impl HttpDocumentClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            parse_url: config.parse_url(),
        })
    }

    pub fn parse_url(&self) -> &Url {
        &self.parse_url
    }

    fn transport_error(&self, err: reqwest::Error) -> ClientError {
        let message = if err.is_timeout() {
            format!("Request to {} timed out", self.parse_url)
        } else if err.is_connect() {
            format!("Could not connect to {}", self.parse_url)
        } else {
            format!("Request to {} failed: {}", self.parse_url, err)
        };
        ClientError::Transport(message)
    }
}

#[async_trait]
impl DocumentClient for HttpDocumentClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn load_document(&self, path: &str) -> Result<Snapshot, ClientError> {
        let started = Instant::now();
        let payload = ParseRequest {
            file_path: path.to_string(),
        };

        tracing::debug!(url = %self.parse_url, path, "Sending parse request");

        let response = self
            .client
            .post(self.parse_url.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or_else(|_| format!("Request failed with status code {}", status.as_u16()));
            tracing::warn!(
                path,
                status = %status,
                error = %message,
                "Parse backend reported failure"
            );
            return Err(ClientError::Service(message));
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        // No schema validation beyond what decoding enforces
        let parsed = ParseResponse::from_json(&body).map_err(|e| {
            tracing::error!(path, error = %e, "Undecodable parse response");
            ClientError::Transport(format!("Invalid response from backend: {}", e))
        })?;

        tracing::info!(
            path,
            html_bytes = parsed.html_content.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Document parsed"
        );

        Ok(parsed.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StyledNode;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HttpDocumentClient {
        let base = format!("{}/api", server.uri());
        let config = ClientConfig::resolve_with(Some(base.as_str()), Some(5), |_| None).unwrap();
        HttpDocumentClient::new(&config).unwrap()
    }

    fn hello_payload() -> serde_json::Value {
        json!({
            "htmlContent": "<div>Hello</div>",
            "styledTree": {
                "type": "element",
                "tagName": "div",
                "attributes": {},
                "styles": {},
                "children": [{ "type": "text", "text": "Hello", "styles": {}, "children": [] }]
            }
        })
    }

    #[tokio::test]
    async fn test_sends_exactly_one_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/parse"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "filePath": "x.html" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(hello_payload()))
            .expect(1)
            .mount(&server)
            .await;

        let snapshot = client_for(&server).load_document("x.html").await.unwrap();

        assert_eq!(snapshot.html, "<div>Hello</div>");
        assert_eq!(
            snapshot.root,
            StyledNode::element("div").with_child(StyledNode::text("Hello"))
        );
        // expect(1) is verified when the server drops
    }

    #[tokio::test]
    async fn test_service_error_uses_backend_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/parse"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({ "error": "File not found: missing.html" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .load_document("missing.html")
            .await
            .unwrap_err();

        assert_eq!(err, ClientError::Service("File not found: missing.html".to_string()));
    }

    #[tokio::test]
    async fn test_service_error_without_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).load_document("a.html").await.unwrap_err();

        assert_eq!(
            err,
            ClientError::Service("Request failed with status code 500".to_string())
        );
    }

    #[tokio::test]
    async fn test_malformed_success_body_fails_fast() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "htmlContent": "<p></p>",
                "styledTree": { "type": "element", "styles": {} }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).load_document("a.html").await.unwrap_err();

        assert!(err.is_transport());
        assert!(err.message().starts_with("Invalid response from backend"));
    }

    #[tokio::test]
    async fn test_deeply_nested_document_loads() {
        let depth = 2_000;
        let mut tree = String::new();
        for _ in 0..depth {
            tree.push_str(r#"{"type":"element","tagName":"div","children":["#);
        }
        tree.push_str(r#"{"type":"text","text":"deep"}"#);
        tree.push_str(&"]}".repeat(depth));
        let body = format!(r#"{{"htmlContent":"<div>","styledTree":{}}}"#, tree);

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let snapshot = client_for(&server).load_document("deep.html").await.unwrap();

        assert_eq!(snapshot.root.node_count(), depth + 1);
        assert_eq!(
            snapshot.node_at(&vec![0; depth].into()),
            Some(&StyledNode::text("deep"))
        );
    }

    #[tokio::test]
    async fn test_timeout_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(hello_payload())
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let config = ClientConfig::resolve_with(Some(server.uri().as_str()), Some(1), |_| None).unwrap();
        let client = HttpDocumentClient::new(&config).unwrap();
        let err = client.load_document("slow.html").await.unwrap_err();

        assert!(err.is_transport());
        assert!(err.message().contains("timed out"));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Port 9 (discard) on localhost is essentially never listening
        let config =
            ClientConfig::resolve_with(Some("http://127.0.0.1:9/api"), Some(2), |_| None).unwrap();
        let client = HttpDocumentClient::new(&config).unwrap();

        let err = client.load_document("a.html").await.unwrap_err();

        assert!(err.is_transport());
        assert_eq!(client.parse_url().as_str(), "http://127.0.0.1:9/api/parse");
    }
}
