#![allow(dead_code)]

use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use market_service::domain::auth::service::AuthService;
use market_service::domain::item::service::ItemService;
use market_service::inbound::http::router::create_router;
use market_service::outbound::repositories::InMemoryCredentialStore;
use market_service::outbound::repositories::InMemoryItemRepository;
use serde_json::json;
use serde_json::Value;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TEST_PASSWORD: &str = "correct-horse";

/// Test application that spawns a real server backed by in-memory stores
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(Authenticator::new(TEST_SECRET));
        let auth_service = Arc::new(AuthService::new(
            Arc::new(InMemoryCredentialStore::new()),
            authenticator,
        ));
        let item_service = Arc::new(ItemService::new(Arc::new(InMemoryItemRepository::new())));

        let router = create_router(auth_service, item_service);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(TEST_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    pub async fn signup(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/auth/signup")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to send signup request")
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to send login request")
    }

    /// Register `email` and return a session token for it
    pub async fn signup_and_login(&self, email: &str) -> String {
        let response = self.signup(email, TEST_PASSWORD).await;
        assert_eq!(response.status(), 201);

        let response = self.login(email, TEST_PASSWORD).await;
        assert_eq!(response.status(), 200);

        let body: Value = response.json().await.unwrap();
        body["data"]["token"]
            .as_str()
            .expect("Login response has no token")
            .to_string()
    }

    pub async fn create_item(&self, token: &str, name: &str, price: i64) -> Value {
        let response = self
            .post_authenticated("/items", token)
            .json(&json!({ "name": name, "price": price, "description": "test item" }))
            .send()
            .await
            .expect("Failed to send create request");
        assert_eq!(response.status(), 201);

        let body: Value = response.json().await.unwrap();
        body["data"].clone()
    }
}
