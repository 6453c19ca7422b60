//! Request and response stages of the gateway pipeline
//!
//! Both stages are plain functions. They never touch storage or emit events
//! themselves; instead they return [`Signal`]s that the gateway applies once
//! the stage has finished.

use std::time::Duration;

use log::{debug, warn};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;

use super::models::LoginResponse;
use super::transport::{PreparedRequest, TransportResponse};
use crate::error::{ApiError, ErrorBody};
use crate::session::TokenManager;

/// Login endpoint; the only place a credential is issued
pub const LOGIN_PATH: &str = "/api/auth/login";

/// Setup status probe, reachable before any account exists
pub const SETUP_STATUS_PATH: &str = "/api/setup/status";

/// First-run setup
pub const SETUP_PATH: &str = "/api/setup";

/// How an endpoint relates to the credential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    /// Issues the credential
    Login,
    /// Reachable without a credential (setup)
    Public,
    /// Requires a valid credential
    Protected,
}

impl EndpointKind {
    /// Classify a request path.
    pub fn classify(path: &str) -> Self {
        match path {
            LOGIN_PATH => EndpointKind::Login,
            SETUP_STATUS_PATH | SETUP_PATH => EndpointKind::Public,
            _ => EndpointKind::Protected,
        }
    }

    pub fn requires_auth(self) -> bool {
        self == EndpointKind::Protected
    }
}

/// A call as issued by the domain layer, before any credential handling.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append query parameters.
    pub fn query(mut self, params: Vec<(&'static str, String)>) -> Self {
        self.query
            .extend(params.into_iter().map(|(k, v)| (k.to_string(), v)));
        self
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn kind(&self) -> EndpointKind {
        EndpointKind::classify(&self.path)
    }
}

/// Side effects requested by a stage, applied by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// Persist a freshly issued token
    StoreToken(String),
    /// Drop the stored credential
    ClearToken,
    /// Tell subscribers the user must sign in again
    Unauthenticated,
    /// Tell subscribers the service still needs first-run setup
    SetupRequired,
}

/// Stage output: the (possibly transformed) value plus requested side effects.
#[derive(Debug)]
pub struct Staged<T> {
    pub value: T,
    pub signals: Vec<Signal>,
}

impl<T> Staged<T> {
    fn pure(value: T) -> Self {
        Self {
            value,
            signals: Vec::new(),
        }
    }
}

/// Result of the request stage
#[derive(Debug)]
pub enum Preflight {
    /// Send this request to the transport
    Dispatch(PreparedRequest),
    /// Resolve without a network call
    Reject(ApiError),
}

fn bearer_header(token: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!("Bearer {}", token)).ok()
}

/// Attach or validate the credential.
///
/// Protected calls with an expired or missing credential are rejected here
/// and never reach the transport.
pub fn before_request(request: ApiRequest, session: &TokenManager) -> Staged<Preflight> {
    let kind = request.kind();

    let credential = if session.is_token_expired() {
        None
    } else {
        session.get_token().and_then(|token| {
            let header = bearer_header(&token);
            if header.is_none() {
                warn!("Stored token contains characters not allowed in a header");
            }
            header
        })
    };

    if credential.is_none() && kind.requires_auth() {
        debug!("Short-circuiting {} {}: no valid session", request.method, request.path);
        return Staged {
            value: Preflight::Reject(ApiError::SessionExpired),
            signals: vec![Signal::ClearToken, Signal::Unauthenticated],
        };
    }

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    if let Some(value) = credential {
        headers.insert(AUTHORIZATION, value);
    }

    Staged::pure(Preflight::Dispatch(PreparedRequest {
        method: request.method,
        path: request.path,
        query: request.query,
        headers,
        body: request.body,
    }))
}

fn retry_after(response: &TransportResponse) -> Duration {
    let secs = response
        .headers
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60);
    Duration::from_secs(secs)
}

/// Capture credentials from login and react to authentication failures.
pub fn after_response(
    kind: EndpointKind,
    response: Result<TransportResponse, ApiError>,
) -> Staged<Result<TransportResponse, ApiError>> {
    let response = match response {
        Ok(response) => response,
        // No response at all: nothing to learn about the credential
        Err(err) => return Staged::pure(Err(err)),
    };

    let status = response.status;

    if status.is_success() {
        let mut signals = Vec::new();
        if kind == EndpointKind::Login {
            match serde_json::from_str::<LoginResponse>(&response.body) {
                Ok(issued) if !issued.token.is_empty() => {
                    signals.push(Signal::StoreToken(issued.token));
                }
                _ => warn!("Login succeeded but response carried no token"),
            }
        }
        return Staged {
            value: Ok(response),
            signals,
        };
    }

    let body = ErrorBody::parse(&response.body);

    match status {
        StatusCode::UNAUTHORIZED => {
            warn!("Request rejected with 401; clearing session");
            let mut signals = vec![Signal::ClearToken];
            if kind != EndpointKind::Login {
                signals.push(Signal::Unauthenticated);
            }
            Staged {
                value: Err(ApiError::Unauthorized),
                signals,
            }
        }
        StatusCode::FORBIDDEN if body.setup_required => Staged {
            value: Err(ApiError::SetupRequired),
            signals: vec![Signal::SetupRequired],
        },
        StatusCode::FORBIDDEN => {
            warn!("Request rejected with 403");
            Staged::pure(Err(ApiError::Forbidden(
                body.message_or("You don't have permission for this action"),
            )))
        }
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            Staged::pure(Err(ApiError::BadRequest {
                message: body.message_or("Bad request"),
                field_errors: body.errors,
            }))
        }
        StatusCode::NOT_FOUND => {
            Staged::pure(Err(ApiError::NotFound(body.message_or("Resource not found"))))
        }
        StatusCode::CONFLICT => Staged::pure(Err(ApiError::Conflict {
            code: body.code().map(str::to_string),
            message: body.message_or("Conflicting data"),
        })),
        StatusCode::TOO_MANY_REQUESTS => {
            Staged::pure(Err(ApiError::RateLimit(retry_after(&response))))
        }
        status if status.is_server_error() => Staged::pure(Err(ApiError::ServerError(
            body.message_or(&format!("Server error: {}", status)),
        ))),
        _ => Staged::pure(Err(ApiError::InvalidResponse(format!(
            "Unexpected status code: {}",
            status
        )))),
    }
}
