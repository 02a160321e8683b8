//! Mock backend shared by the client integration tests.

#![allow(dead_code)]

use examdesk_client::ApiClient;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ACCESS: &str = "access-abc";
pub const REFRESH: &str = "refresh-xyz";

pub struct Backend {
    pub server: MockServer,
    pub client: ApiClient,
}

impl Backend {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let client = ApiClient::new(&server.uri()).expect("mock server uri is a valid url");
        Self { server, client }
    }

    pub async fn token_ok(&self) {
        Mock::given(method("POST"))
            .and(path("/api/users/token/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access": ACCESS,
                "refresh": REFRESH,
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn token_err(&self, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path("/api/users/token/"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Admin users endpoint answering with `status` for the issued token.
    pub async fn admin_users(&self, status: u16, body: Value) {
        Mock::given(method("GET"))
            .and(path("/api/admin/users/"))
            .and(header("authorization", format!("Bearer {ACCESS}").as_str()))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn register(&self, request: Value, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path("/api/users/register/"))
            .and(body_json(request))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn verify(&self, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path("/api/users/verify/"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }
}

pub fn user_json(id: i64, role: &str, verified: bool) -> Value {
    json!({
        "id": id,
        "email": format!("user{id}@example.com"),
        "first_name": "Test",
        "last_name": format!("User{id}"),
        "role": role,
        "subscription_tier": "FREE",
        "is_active": true,
        "is_verified": verified,
        "date_joined": "2024-01-01T00:00:00Z",
        "last_login": null,
        "phone_number": null
    })
}

/// Client pointed at a port nothing listens on.
pub fn unreachable_client() -> ApiClient {
    ApiClient::new("http://127.0.0.1:9").expect("static url is valid")
}
