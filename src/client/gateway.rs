//! Request gateway
//!
//! Every call to the service goes through [`Gateway::execute`], which runs
//! the request stage, the transport round trip and the response stage, then
//! applies the signals the stages produced: credential writes go to the
//! shared [`TokenManager`] and user-facing notices go out as
//! [`GatewayEvent`]s.

use std::sync::Arc;

use log::{debug, warn};
use serde::de::DeserializeOwned;
use tokio::sync::broadcast;

use super::stages::{ApiRequest, Preflight, Signal, after_response, before_request};
use super::transport::{Transport, TransportResponse};
use crate::error::{ApiError, Result};
use crate::session::TokenManager;

const EVENT_CAPACITY: usize = 16;

/// Notices for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayEvent {
    /// The credential was rejected or has expired; sign in again
    Unauthenticated,
    /// The service has no accounts yet
    SetupRequired,
}

/// Authenticated access to the service.
pub struct Gateway {
    transport: Arc<dyn Transport>,
    session: Arc<TokenManager>,
    events: broadcast::Sender<GatewayEvent>,
}

impl Gateway {
    pub fn new(transport: Arc<dyn Transport>, session: Arc<TokenManager>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            transport,
            session,
            events,
        }
    }

    /// Receive events emitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<GatewayEvent> {
        self.events.subscribe()
    }

    pub fn session(&self) -> &TokenManager {
        &self.session
    }

    #[cfg(test)]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Run one call through the pipeline.
    pub async fn execute(&self, request: ApiRequest) -> Result<TransportResponse> {
        let kind = request.kind();
        let (method, path) = (request.method.clone(), request.path.clone());

        let staged = before_request(request, &self.session);
        self.apply(staged.signals)?;
        let prepared = match staged.value {
            Preflight::Dispatch(prepared) => prepared,
            Preflight::Reject(err) => return Err(err.into()),
        };

        debug!("{} {}", method, path);
        let result = self.transport.send(prepared).await;

        let staged = after_response(kind, result);
        self.apply(staged.signals)?;
        Ok(staged.value?)
    }

    /// Run a call and decode the JSON body.
    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let path = request.path.clone();
        let response = self.execute(request).await?;
        serde_json::from_str(&response.body).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse {} response: {}", path, e)).into()
        })
    }

    /// Run a call whose body is not needed.
    pub async fn send(&self, request: ApiRequest) -> Result<()> {
        self.execute(request).await.map(|_| ())
    }

    /// Drop the local credential. No network call is made.
    pub fn logout(&self) -> Result<()> {
        self.session.remove_token()?;
        Ok(())
    }

    fn apply(&self, signals: Vec<Signal>) -> Result<()> {
        for signal in signals {
            match signal {
                Signal::StoreToken(token) => self.session.set_token(&token)?,
                Signal::ClearToken => {
                    if let Err(e) = self.session.remove_token() {
                        warn!("Failed to clear session: {}", e);
                    }
                }
                Signal::Unauthenticated => self.emit(GatewayEvent::Unauthenticated),
                Signal::SetupRequired => self.emit(GatewayEvent::SetupRequired),
            }
        }
        Ok(())
    }

    fn emit(&self, event: GatewayEvent) {
        // No receivers is not an error
        if self.events.send(event).is_err() {
            debug!("No subscribers for {:?}", event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{CountingStorage, MockTransport};
    use crate::client::stages::LOGIN_PATH;
    use crate::error::Error;
    use crate::session::{ExpiryPolicy, jwt};
    use chrono::Utc;
    use reqwest::Method;
    use tokio::sync::broadcast::error::TryRecvError;

    fn valid_token() -> String {
        jwt::token_with_exp(Utc::now().timestamp() + 3600)
    }

    fn expired_token() -> String {
        jwt::token_with_exp(Utc::now().timestamp() - 3600)
    }

    fn gateway(
        transport: MockTransport,
        storage: CountingStorage,
    ) -> (Gateway, Arc<MockTransport>, Arc<CountingStorage>) {
        let transport = Arc::new(transport);
        let storage = Arc::new(storage);
        let session = Arc::new(TokenManager::new(storage.clone(), ExpiryPolicy::Claim));
        (
            Gateway::new(transport.clone(), session),
            transport,
            storage,
        )
    }

    fn count_events(
        rx: &mut broadcast::Receiver<GatewayEvent>,
        wanted: GatewayEvent,
    ) -> usize {
        let mut count = 0;
        loop {
            match rx.try_recv() {
                Ok(event) if event == wanted => count += 1,
                Ok(_) => {}
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return count,
                Err(TryRecvError::Lagged(_)) => {}
            }
        }
    }

    fn login_request() -> ApiRequest {
        ApiRequest::post(LOGIN_PATH)
            .json(&serde_json::json!({"username": "admin", "password": "secret"}))
            .unwrap()
    }

    #[tokio::test]
    async fn test_expired_protected_call_never_reaches_transport() {
        let (gateway, transport, storage) =
            gateway(MockTransport::new(), CountingStorage::seeded(&expired_token()));
        let mut rx = gateway.subscribe();

        let err = gateway
            .execute(ApiRequest::get("/api/orders/paginated"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Api(ApiError::SessionExpired)));
        assert_eq!(transport.call_count(), 0);
        assert_eq!(storage.clears(), 1);
        assert_eq!(gateway.session().get_token(), None);
        assert_eq!(count_events(&mut rx, GatewayEvent::Unauthenticated), 1);
    }

    #[tokio::test]
    async fn test_login_always_reaches_transport() {
        let (gateway, transport, _) = gateway(
            MockTransport::new().with_json(Method::POST, LOGIN_PATH, 401, ""),
            CountingStorage::seeded(&expired_token()),
        );

        let _ = gateway.execute(login_request()).await;
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_successful_login_sets_token_once() {
        let token = valid_token();
        let body = serde_json::json!({ "token": token }).to_string();
        let (gateway, _, storage) = gateway(
            MockTransport::new().with_json(Method::POST, LOGIN_PATH, 200, &body),
            CountingStorage::new(),
        );

        gateway.execute(login_request()).await.unwrap();

        assert_eq!(storage.saves(), 1);
        assert_eq!(gateway.session().get_token(), Some(token));
        assert!(gateway.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_store_failure_is_surfaced() {
        let body = serde_json::json!({ "token": valid_token() }).to_string();
        let (gateway, _, _) = gateway(
            MockTransport::new().with_json(Method::POST, LOGIN_PATH, 200, &body),
            CountingStorage::failing_saves(),
        );

        let err = gateway.execute(login_request()).await.unwrap_err();
        assert!(matches!(err, Error::Session(_)));
    }

    #[tokio::test]
    async fn test_401_clears_once_and_emits_once() {
        let (gateway, transport, storage) = gateway(
            MockTransport::new().with_json(Method::GET, "/api/users", 401, ""),
            CountingStorage::seeded(&valid_token()),
        );
        let mut rx = gateway.subscribe();

        let err = gateway
            .execute(ApiRequest::get("/api/users"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Api(ApiError::Unauthorized)));
        assert_eq!(transport.call_count(), 1);
        assert_eq!(storage.clears(), 1);
        assert_eq!(count_events(&mut rx, GatewayEvent::Unauthenticated), 1);
        assert_eq!(gateway.session().get_token(), None);
    }

    #[tokio::test]
    async fn test_login_401_clears_without_event() {
        let (gateway, _, storage) = gateway(
            MockTransport::new().with_json(Method::POST, LOGIN_PATH, 401, ""),
            CountingStorage::new(),
        );
        let mut rx = gateway.subscribe();

        let err = gateway.execute(login_request()).await.unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::Unauthorized)));
        assert_eq!(storage.clears(), 1);
        assert_eq!(count_events(&mut rx, GatewayEvent::Unauthenticated), 0);
    }

    #[tokio::test]
    async fn test_403_neither_clears_nor_emits() {
        let token = valid_token();
        let (gateway, _, storage) = gateway(
            MockTransport::new().with_json(
                Method::DELETE,
                "/api/stores/4",
                403,
                r#"{"message":"Not your store"}"#,
            ),
            CountingStorage::seeded(&token),
        );
        let mut rx = gateway.subscribe();

        let err = gateway
            .execute(ApiRequest::delete("/api/stores/4"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Api(ApiError::Forbidden(_))));
        assert_eq!(storage.clears(), 0);
        assert_eq!(storage.saves(), 0);
        assert_eq!(count_events(&mut rx, GatewayEvent::Unauthenticated), 0);
        assert_eq!(gateway.session().get_token(), Some(token));
    }

    #[tokio::test]
    async fn test_setup_required_event() {
        let (gateway, _, storage) = gateway(
            MockTransport::new().with_json(
                Method::GET,
                "/api/dashboard",
                403,
                r#"{"setupRequired":true}"#,
            ),
            CountingStorage::seeded(&valid_token()),
        );
        let mut rx = gateway.subscribe();

        let err = gateway
            .execute(ApiRequest::get("/api/dashboard"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::SetupRequired)));
        assert_eq!(storage.clears(), 0);
        assert_eq!(count_events(&mut rx, GatewayEvent::SetupRequired), 1);
    }

    #[tokio::test]
    async fn test_other_failures_propagate_unchanged() {
        let (gateway, _, storage) = gateway(
            MockTransport::new()
                .with_unreachable(Method::GET, "/api/sizes")
                .with_json(Method::GET, "/api/stores", 500, "boom")
                .with_rate_limit(Method::GET, "/api/users", "3"),
            CountingStorage::seeded(&valid_token()),
        );

        let err = gateway.execute(ApiRequest::get("/api/sizes")).await.unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::Unreachable(_))));

        let err = gateway.execute(ApiRequest::get("/api/stores")).await.unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::ServerError(_))));

        let err = gateway.execute(ApiRequest::get("/api/users")).await.unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::RateLimit(_))));

        assert_eq!(storage.clears(), 0);
        assert!(gateway.is_authenticated());
    }

    #[tokio::test]
    async fn test_bearer_header_attached() {
        let token = valid_token();
        let (gateway, transport, _) = gateway(
            MockTransport::new().with_json(Method::GET, "/api/sizes", 200, "[]"),
            CountingStorage::seeded(&token),
        );

        let sizes: Vec<serde_json::Value> =
            gateway.send_json(ApiRequest::get("/api/sizes")).await.unwrap();
        assert!(sizes.is_empty());

        let captured = transport.captured().await;
        assert_eq!(
            captured[0].authorization.as_deref(),
            Some(format!("Bearer {}", token).as_str())
        );
    }

    #[tokio::test]
    async fn test_send_json_rejects_malformed_body() {
        let (gateway, _, _) = gateway(
            MockTransport::new().with_json(Method::GET, "/api/dashboard", 200, "<html>"),
            CountingStorage::seeded(&valid_token()),
        );

        let err = gateway
            .send_json::<serde_json::Value>(ApiRequest::get("/api/dashboard"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_logout_is_local_and_idempotent() {
        let (gateway, transport, storage) =
            gateway(MockTransport::new(), CountingStorage::seeded(&valid_token()));

        gateway.logout().unwrap();
        gateway.logout().unwrap();

        assert_eq!(transport.call_count(), 0);
        assert_eq!(storage.clears(), 2);
        assert!(!gateway.is_authenticated());
    }

    #[tokio::test]
    async fn test_in_flight_call_keeps_its_token_across_login() {
        let old_token = valid_token();
        let new_token = jwt::token_with_exp(Utc::now().timestamp() + 7200);
        let login_body = serde_json::json!({ "token": new_token }).to_string();

        let transport = MockTransport::new()
            .with_json(Method::GET, "/api/orders", 200, "[]")
            .with_json(Method::POST, LOGIN_PATH, 200, &login_body);
        let release = transport.hold("/api/orders");
        let (gateway, transport, _) = gateway(transport, CountingStorage::seeded(&old_token));
        let gateway = Arc::new(gateway);

        let in_flight = {
            let gateway = gateway.clone();
            tokio::spawn(async move { gateway.execute(ApiRequest::get("/api/orders")).await })
        };

        // Log in while the protected call is parked inside the transport
        transport.wait_for_held().await;
        gateway.execute(login_request()).await.unwrap();
        release.notify_one();

        let outcome = in_flight.await.unwrap();
        assert!(outcome.is_ok());

        let captured = transport.captured().await;
        let orders_call = captured
            .iter()
            .find(|c| c.path == "/api/orders")
            .unwrap();
        assert_eq!(
            orders_call.authorization.as_deref(),
            Some(format!("Bearer {}", old_token).as_str())
        );
        assert_eq!(gateway.session().get_token(), Some(new_token));
    }
}
