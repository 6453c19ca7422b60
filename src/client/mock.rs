//! Test doubles for the gateway
//!
//! [`MockTransport`] answers requests from canned routes without a network,
//! and [`CountingStorage`] records how often the credential was written or
//! cleared.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Method, StatusCode};
use tokio::sync::{Mutex, Notify};

use super::transport::{PreparedRequest, Transport, TransportResponse};
use crate::error::{ApiError, SessionError};
use crate::session::{MemorySessionStorage, SessionStorage, StoredSession};

/// Canned reply for one route
#[derive(Debug, Clone)]
enum Reply {
    Status {
        status: StatusCode,
        body: String,
        retry_after: Option<&'static str>,
    },
    Unreachable,
}

/// A request as seen by the transport.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub authorization: Option<String>,
    pub body: Option<serde_json::Value>,
}

/// Mock transport for testing.
///
/// # Example
/// ```ignore
/// let transport = MockTransport::new()
///     .with_json(Method::POST, "/api/auth/login", 200, r#"{"token":"a.b.c"}"#);
/// ```
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(Method, String), Reply>>,
    captured: Mutex<Vec<CapturedRequest>>,
    calls: AtomicUsize,
    /// Requests to this path wait for `release` before answering
    held: Mutex<Option<(String, Arc<Notify>)>>,
    /// Notified once a held request has been received
    arrived: Arc<Notify>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` with `status` and `body`.
    pub fn with_json(self, method: Method, path: &str, status: u16, body: &str) -> Self {
        self.routes.try_lock().expect("routes lock").insert(
            (method, path.to_string()),
            Reply::Status {
                status: StatusCode::from_u16(status).expect("valid status"),
                body: body.to_string(),
                retry_after: None,
            },
        );
        self
    }

    /// Answer `method path` with 429 and a `retry-after` header.
    pub fn with_rate_limit(self, method: Method, path: &str, retry_after: &'static str) -> Self {
        self.routes.try_lock().expect("routes lock").insert(
            (method, path.to_string()),
            Reply::Status {
                status: StatusCode::TOO_MANY_REQUESTS,
                body: String::new(),
                retry_after: Some(retry_after),
            },
        );
        self
    }

    /// Fail `method path` as if the server could not be reached.
    pub fn with_unreachable(self, method: Method, path: &str) -> Self {
        self.routes
            .try_lock()
            .expect("routes lock")
            .insert((method, path.to_string()), Reply::Unreachable);
        self
    }

    /// Hold requests to `path` until the returned handle is notified.
    pub fn hold(&self, path: &str) -> Arc<Notify> {
        let release = Arc::new(Notify::new());
        *self.held.try_lock().expect("held lock") = Some((path.to_string(), release.clone()));
        release
    }

    /// Resolves once a held request has reached the transport.
    pub async fn wait_for_held(&self) {
        self.arrived.notified().await;
    }

    /// Number of requests that reached the transport.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn captured(&self) -> Vec<CapturedRequest> {
        self.captured.lock().await.clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(
        &self,
        request: PreparedRequest,
    ) -> std::result::Result<TransportResponse, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.captured.lock().await.push(CapturedRequest {
            method: request.method.clone(),
            path: request.path.clone(),
            query: request.query.clone(),
            authorization: request
                .headers
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            body: request.body.clone(),
        });

        let release = self
            .held
            .lock()
            .await
            .as_ref()
            .filter(|(path, _)| *path == request.path)
            .map(|(_, release)| release.clone());
        if let Some(release) = release {
            self.arrived.notify_one();
            release.notified().await;
        }

        let reply = self
            .routes
            .lock()
            .await
            .get(&(request.method.clone(), request.path.clone()))
            .cloned();

        match reply {
            Some(Reply::Status {
                status,
                body,
                retry_after,
            }) => {
                let mut response = TransportResponse::new(status, body);
                if let Some(value) = retry_after {
                    response
                        .headers
                        .insert("retry-after", HeaderValue::from_static(value));
                }
                Ok(response)
            }
            Some(Reply::Unreachable) => Err(ApiError::Unreachable("connection refused".into())),
            None => Ok(TransportResponse::new(StatusCode::NOT_FOUND, "no route")),
        }
    }
}

/// Session storage that counts writes and clears.
#[derive(Debug, Default)]
pub struct CountingStorage {
    inner: MemorySessionStorage,
    saves: AtomicUsize,
    clears: AtomicUsize,
    fail_saves: bool,
}

impl CountingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage whose writes always fail.
    pub fn failing_saves() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    /// Seed a record without counting it.
    pub fn seeded(token: &str) -> Self {
        let storage = Self::default();
        storage
            .inner
            .save(&StoredSession {
                token: Some(token.to_string()),
                expires_at: None,
            })
            .expect("seed memory storage");
        storage
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn clears(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

impl SessionStorage for CountingStorage {
    fn load(&self) -> Result<Option<StoredSession>, SessionError> {
        self.inner.load()
    }

    fn save(&self, session: &StoredSession) -> Result<(), SessionError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves {
            return Err(SessionError::Storage("disk full".to_string()));
        }
        self.inner.save(session)
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        self.inner.clear()
    }
}
