//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use companyhub_api::{AppState, build_app};
use companyhub_core::config::{AppConfig, DatabaseProvider};
use companyhub_database::{MemoryStore, RepositoryManager};

pub const IT_SOLUTIONS_ID: &str = "c9d4c053-49b6-410c-bc78-2d54a9991870";
pub const ADMIN_SOLUTIONS_ID: &str = "3d490a70-94ce-4d15-9494-5248280c2ce3";
pub const SAM_RAIDEN_ID: &str = "80abbca8-664d-4b20-b5de-024705497d4a";
pub const JANA_MCLEAF_ID: &str = "86dba8c0-d178-41e7-938c-ed49778fb52a";
pub const KANE_MILLER_ID: &str = "021ca3c1-0deb-4afd-ae94-2159a8479811";

pub const PASSWORD: &str = "Password1000";

/// Configuration for tests: in-memory store, cheap hashing, no rate limit.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.database.provider = DatabaseProvider::Memory;
    config.auth.argon2_memory_kib = 8;
    config.auth.argon2_iterations = 1;
    config.rate_limit.enabled = false;
    config
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for reaching services directly
    pub state: AppState,
}

impl TestApp {
    /// Create an app over the seeded store with the default test config
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// Create an app over the seeded store with a custom config
    pub fn with_config(config: AppConfig) -> Self {
        let repositories = RepositoryManager::memory(MemoryStore::seeded());
        let state = AppState::new(config, repositories).expect("Failed to build state");
        let router = build_app(state.clone());
        Self { router, state }
    }

    /// Register a user with the given roles
    pub async fn register(&self, user_name: &str, password: &str, roles: &[&str]) -> TestResponse {
        let body = json!({
            "firstName": "Test",
            "lastName": "User",
            "userName": user_name,
            "password": password,
            "email": format!("{user_name}@companyhub.test"),
            "roles": roles,
        });
        self.request("POST", "/api/authentication", Some(body), None)
            .await
    }

    /// Login and return the JWT access token
    pub async fn login(&self, user_name: &str, password: &str) -> String {
        let body = json!({ "userName": user_name, "password": password });
        let response = self
            .request("POST", "/api/authentication/login", Some(body), None)
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.body["token"]
            .as_str()
            .expect("No token in login response")
            .to_string()
    }

    /// Register a fresh user with the given roles and return their token
    pub async fn token_with_roles(&self, roles: &[&str]) -> String {
        let user_name = format!("user_{}", Uuid::new_v4().simple());
        let response = self.register(&user_name, PASSWORD, roles).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Registration failed: {:?}",
            response.body
        );
        self.login(&user_name, PASSWORD).await
    }

    /// Token of a freshly registered manager
    pub async fn manager_token(&self) -> String {
        self.token_with_roles(&["Manager"]).await
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        self.request_with_headers(method, path, body, token, &[])
            .await
    }

    /// Make a JSON request carrying extra headers
    pub async fn request_with_headers(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            req = req.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        for (name, value) in headers {
            req = req.header(*name, *value);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// GET with an explicit Accept header
    pub async fn get_as(&self, path: &str, accept: &str, token: Option<&str>) -> TestResponse {
        self.request_with_headers("GET", path, None, token, &[(ACCEPT.as_str(), accept)])
            .await
    }

    /// Send a prepared request
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let text = String::from_utf8_lossy(&body_bytes).to_string();
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
            text,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body, `Null` when the body is not JSON
    pub body: Value,
    /// Raw body text
    pub text: String,
}

impl TestResponse {
    /// A header value as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The `X-Pagination` header parsed as JSON
    pub fn pagination(&self) -> Value {
        let raw = self.header("x-pagination").expect("No X-Pagination header");
        serde_json::from_str(raw).expect("X-Pagination is not JSON")
    }

    /// The body as a JSON array
    pub fn items(&self) -> &Vec<Value> {
        self.body.as_array().expect("Body is not an array")
    }
}
