//! Clothes Manager API client implementation

use std::sync::Arc;

use async_trait::async_trait;

use super::api::{AuthApi, DashboardApi, MaterialApi, OrderApi, StoreApi, UserApi};
use super::gateway::Gateway;
use super::models::{
    ChangePasswordRequest, CreateMaterialRequest, CreateUserRequest, Credentials, Dashboard,
    DistributeRequest, EditMaterialRequest, Material, Order, OrderRequest, SetupRequest,
    SetupStatus, Size, Store, StoreRequest, User,
};
use super::pagination::{Page, PageParams};
use super::stages::{ApiRequest, LOGIN_PATH, SETUP_PATH, SETUP_STATUS_PATH};
use crate::error::Result;

/// Typed client over the [`Gateway`].
#[derive(Clone)]
pub struct ClothesClient {
    gateway: Arc<Gateway>,
}

impl ClothesClient {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }
}

#[async_trait]
impl AuthApi for ClothesClient {
    async fn login(&self, credentials: &Credentials) -> Result<()> {
        self.gateway
            .send(ApiRequest::post(LOGIN_PATH).json(credentials)?)
            .await
    }

    async fn logout(&self) -> Result<()> {
        self.gateway.logout()
    }

    async fn setup_status(&self) -> Result<SetupStatus> {
        self.gateway
            .send_json(ApiRequest::get(SETUP_STATUS_PATH))
            .await
    }

    async fn setup(&self, request: &SetupRequest) -> Result<()> {
        self.gateway
            .send(ApiRequest::post(SETUP_PATH).json(request)?)
            .await
    }

    async fn change_password(&self, request: &ChangePasswordRequest) -> Result<()> {
        self.gateway
            .send(ApiRequest::post("/api/auth/change-password").json(request)?)
            .await
    }
}

#[async_trait]
impl UserApi for ClothesClient {
    async fn list_users(&self) -> Result<Vec<User>> {
        self.gateway.send_json(ApiRequest::get("/api/users")).await
    }

    async fn current_user(&self) -> Result<User> {
        self.gateway
            .send_json(ApiRequest::get("/api/users/details"))
            .await
    }

    async fn create_user(&self, request: &CreateUserRequest) -> Result<User> {
        self.gateway
            .send_json(ApiRequest::post("/api/users").json(request)?)
            .await
    }

    async fn delete_user(&self, user_id: i64) -> Result<()> {
        self.gateway
            .send(ApiRequest::delete(format!("/api/users/{}", user_id)))
            .await
    }
}

#[async_trait]
impl StoreApi for ClothesClient {
    async fn list_stores(&self) -> Result<Vec<Store>> {
        self.gateway.send_json(ApiRequest::get("/api/stores")).await
    }

    async fn get_store(&self, store_id: i64) -> Result<Store> {
        self.gateway
            .send_json(ApiRequest::get(format!("/api/stores/{}", store_id)))
            .await
    }

    async fn create_store(&self, request: &StoreRequest) -> Result<Store> {
        self.gateway
            .send_json(ApiRequest::post("/api/stores").json(request)?)
            .await
    }

    async fn edit_store(&self, store_id: i64, request: &StoreRequest) -> Result<Store> {
        self.gateway
            .send_json(ApiRequest::put(format!("/api/stores/{}", store_id)).json(request)?)
            .await
    }

    async fn delete_store(&self, store_id: i64) -> Result<()> {
        self.gateway
            .send(ApiRequest::delete(format!("/api/stores/{}", store_id)))
            .await
    }
}

#[async_trait]
impl MaterialApi for ClothesClient {
    async fn list_materials(&self) -> Result<Vec<Material>> {
        self.gateway.send_json(ApiRequest::get("/api/materials")).await
    }

    async fn list_store_materials(
        &self,
        store_id: i64,
        params: &PageParams,
    ) -> Result<Page<Material>> {
        let params = params.clone().store_id(store_id);
        self.gateway
            .send_json(ApiRequest::get("/api/materials/paginated").query(params.to_query_params()))
            .await
    }

    async fn list_all_materials(&self, params: &PageParams) -> Result<Page<Material>> {
        self.gateway
            .send_json(
                ApiRequest::get("/api/materials/all/paginated").query(params.to_query_params()),
            )
            .await
    }

    async fn create_material(&self, request: &CreateMaterialRequest) -> Result<Material> {
        self.gateway
            .send_json(ApiRequest::post("/api/materials").json(request)?)
            .await
    }

    async fn edit_material(
        &self,
        material_id: i64,
        request: &EditMaterialRequest,
    ) -> Result<Material> {
        self.gateway
            .send_json(ApiRequest::put(format!("/api/materials/{}", material_id)).json(request)?)
            .await
    }

    async fn delete_material(&self, material_id: i64) -> Result<()> {
        self.gateway
            .send(ApiRequest::delete(format!("/api/materials/{}", material_id)))
            .await
    }

    async fn distribute_material(
        &self,
        material_id: i64,
        request: &DistributeRequest,
    ) -> Result<()> {
        self.gateway
            .send(
                ApiRequest::post(format!("/api/materials/{}/distribute", material_id))
                    .json(request)?,
            )
            .await
    }

    async fn list_sizes(&self) -> Result<Vec<Size>> {
        self.gateway.send_json(ApiRequest::get("/api/sizes")).await
    }
}

#[async_trait]
impl OrderApi for ClothesClient {
    async fn list_orders(&self, params: &PageParams) -> Result<Page<Order>> {
        self.gateway
            .send_json(ApiRequest::get("/api/orders/paginated").query(params.to_query_params()))
            .await
    }

    async fn create_order(&self, request: &OrderRequest) -> Result<Order> {
        self.gateway
            .send_json(ApiRequest::post("/api/orders").json(request)?)
            .await
    }

    async fn edit_order(&self, order_id: i64, request: &OrderRequest) -> Result<Order> {
        self.gateway
            .send_json(ApiRequest::put(format!("/api/orders/{}", order_id)).json(request)?)
            .await
    }

    async fn delete_order(&self, order_id: i64) -> Result<()> {
        self.gateway
            .send(ApiRequest::delete(format!("/api/orders/{}", order_id)))
            .await
    }
}

#[async_trait]
impl DashboardApi for ClothesClient {
    async fn dashboard(&self) -> Result<Dashboard> {
        self.gateway.send_json(ApiRequest::get("/api/dashboard")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{CountingStorage, MockTransport};
    use crate::client::transport::ReqwestTransport;
    use crate::error::{ApiError, Error};
    use crate::session::{ExpiryPolicy, MemorySessionStorage, TokenManager, jwt};
    use chrono::Utc;
    use reqwest::Method;
    use std::time::Duration;

    fn valid_token() -> String {
        jwt::token_with_exp(Utc::now().timestamp() + 3600)
    }

    fn client_with(transport: MockTransport) -> (ClothesClient, Arc<MockTransport>) {
        let transport = Arc::new(transport);
        let session = Arc::new(TokenManager::new(
            Arc::new(CountingStorage::seeded(&valid_token())),
            ExpiryPolicy::Claim,
        ));
        let gateway = Arc::new(Gateway::new(transport.clone(), session));
        (ClothesClient::new(gateway), transport)
    }

    #[tokio::test]
    async fn test_list_orders_sends_filters() {
        let (client, transport) = client_with(MockTransport::new().with_json(
            Method::GET,
            "/api/orders/paginated",
            200,
            r#"{"content":[{"id":1,"materialText":"Jacket","sizeName":"M","status":1}],"totalPages":3,"number":0}"#,
        ));

        let page = client
            .list_orders(&PageParams::new().size(10).store_id(2).material_text("Jacket"))
            .await
            .unwrap();

        assert_eq!(page.content.len(), 1);
        assert!(page.has_next());

        let captured = transport.captured().await;
        let query = &captured[0].query;
        assert!(query.contains(&("storeId".to_string(), "2".to_string())));
        assert!(query.contains(&("materialText".to_string(), "Jacket".to_string())));
        assert!(query.contains(&("size".to_string(), "10".to_string())));
    }

    #[tokio::test]
    async fn test_store_materials_scoped_to_store() {
        let (client, transport) = client_with(MockTransport::new().with_json(
            Method::GET,
            "/api/materials/paginated",
            200,
            r#"{"content":[],"totalPages":0,"number":0}"#,
        ));

        client
            .list_store_materials(7, &PageParams::new().text("Shirt"))
            .await
            .unwrap();

        let captured = transport.captured().await;
        assert!(captured[0].query.contains(&("storeId".to_string(), "7".to_string())));
        assert!(captured[0].query.contains(&("text".to_string(), "Shirt".to_string())));
    }

    #[tokio::test]
    async fn test_distribute_posts_payload() {
        let (client, transport) = client_with(MockTransport::new().with_json(
            Method::POST,
            "/api/materials/3/distribute",
            200,
            "",
        ));

        client
            .distribute_material(
                3,
                &DistributeRequest {
                    receiver_store_id: 5,
                    quantity: 2,
                },
            )
            .await
            .unwrap();

        let captured = transport.captured().await;
        assert_eq!(
            captured[0].body,
            Some(serde_json::json!({"receiverStoreId": 5, "quantity": 2}))
        );
    }

    #[tokio::test]
    async fn test_delete_store_conflict() {
        let (client, _) = client_with(MockTransport::new().with_json(
            Method::DELETE,
            "/api/stores/2",
            409,
            r#"{"errorCode":"STORE_IN_USE","message":"Store has materials"}"#,
        ));

        let err = client.delete_store(2).await.unwrap_err();
        match err {
            Error::Api(ApiError::Conflict { code, .. }) => {
                assert_eq!(code.as_deref(), Some("STORE_IN_USE"));
            }
            other => panic!("expected Conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_logout_makes_no_request() {
        let (client, transport) = client_with(MockTransport::new());
        client.logout().await.unwrap();

        assert_eq!(transport.call_count(), 0);
        assert!(!client.gateway().is_authenticated());
    }

    #[tokio::test]
    async fn test_login_then_list_over_http() {
        let token = valid_token();
        let mut server = mockito::Server::new_async().await;
        let login = server
            .mock("POST", "/api/auth/login")
            .match_body(mockito::Matcher::Json(
                serde_json::json!({"username": "admin", "password": "secret"}),
            ))
            .with_status(200)
            .with_body(serde_json::json!({ "token": token }).to_string())
            .create_async()
            .await;
        let sizes = server
            .mock("GET", "/api/sizes")
            .match_header("authorization", format!("Bearer {}", token).as_str())
            .with_status(200)
            .with_body(r#"[{"id":1,"name":"S"},{"id":2,"name":"M"}]"#)
            .create_async()
            .await;

        let transport =
            Arc::new(ReqwestTransport::new(&server.url(), Duration::from_secs(5)).unwrap());
        let session = Arc::new(TokenManager::new(
            Arc::new(MemorySessionStorage::new()),
            ExpiryPolicy::Claim,
        ));
        let client = ClothesClient::new(Arc::new(Gateway::new(transport, session)));

        client
            .login(&Credentials {
                username: "admin".into(),
                password: "secret".into(),
            })
            .await
            .unwrap();
        let result = client.list_sizes().await.unwrap();

        assert_eq!(result.len(), 2);
        login.assert_async().await;
        sizes.assert_async().await;
    }
}
