//! HTTP transport beneath the gateway
//!
//! The gateway talks to a [`Transport`] rather than to reqwest directly so
//! the credential pipeline can be exercised without a network.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::HeaderMap;
use reqwest::{Client as HttpClient, Method, StatusCode};

use crate::error::{ApiError, Result};

/// Request after the credential stage has run.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    /// Path relative to the API base URL, starting with `/`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
}

/// Raw response as seen by the response stage.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

#[cfg(test)]
impl TransportResponse {
    /// Build a response with no headers.
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }
}

/// One network round trip. Errors are always [`ApiError::Unreachable`]:
/// any response that arrives, whatever its status, is `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        request: PreparedRequest,
    ) -> std::result::Result<TransportResponse, ApiError>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: HttpClient,
    base_url: String,
}

impl ReqwestTransport {
    /// Create a transport for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Unreachable(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        request: PreparedRequest,
    ) -> std::result::Result<TransportResponse, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);

        let mut builder = self
            .http
            .request(request.method, &url)
            .headers(request.headers);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(ApiError::from)?;
        let status = response.status();
        let headers = response.headers().clone();
        // The status has arrived; a broken body must not hide it
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to read {} response body: {}", status, e);
                String::new()
            }
        };

        debug!("{} -> {} ({} bytes)", url, status, body.len());

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{AUTHORIZATION, HeaderValue};

    fn prepared(method: Method, path: &str) -> PreparedRequest {
        PreparedRequest {
            method,
            path: path.to_string(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    #[tokio::test]
    async fn test_sends_headers_query_and_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/orders")
            .match_header("authorization", "Bearer abc")
            .match_query(mockito::Matcher::UrlEncoded("page".into(), "2".into()))
            .match_body(mockito::Matcher::Json(serde_json::json!({"quantity": 3})))
            .with_status(201)
            .with_body(r#"{"id":9}"#)
            .create_async()
            .await;

        let transport = ReqwestTransport::new(&server.url(), Duration::from_secs(5)).unwrap();
        let mut request = prepared(Method::POST, "/api/orders");
        request
            .headers
            .insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        request.query.push(("page".to_string(), "2".to_string()));
        request.body = Some(serde_json::json!({"quantity": 3}));

        let response = transport.send(request).await.unwrap();
        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body, r#"{"id":9}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_is_still_a_response() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/users")
            .with_status(401)
            .create_async()
            .await;

        let transport = ReqwestTransport::new(&server.url(), Duration::from_secs(5)).unwrap();
        let response = transport
            .send(prepared(Method::GET, "/api/users"))
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_truncated_body_keeps_status() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            // Promise more body than is ever sent, then hang up
            let _ = socket
                .write_all(b"HTTP/1.1 401 Unauthorized\r\nContent-Length: 100\r\n\r\n{\"mes")
                .await;
        });

        let transport =
            ReqwestTransport::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();
        let response = transport
            .send(prepared(Method::GET, "/api/users"))
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert!(response.body.is_empty());
    }

    #[tokio::test]
    async fn test_connection_refused_is_unreachable() {
        // Port 9 (discard) on localhost is closed in test environments
        let transport =
            ReqwestTransport::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = transport
            .send(prepared(Method::GET, "/api/users"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unreachable(_)));
    }
}
