use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Redirect, Response},
    routing::post,
    Router,
};
use examdesk_client::{login, ApiClient};
use examdesk_types::{ApiFailure, FailureKind, LoginOutcome, ProbePolicy, SessionTokens, TokenStore};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::middleware::session::{read_credentials, read_session, SessionCookies};

/// Shared by the JSON routes, the page middleware and the Leptos server
/// functions.
#[derive(Clone, Debug)]
pub struct AppState {
    pub client: ApiClient,
    pub probe_policy: ProbePolicy,
    pub secure_cookies: bool,
}

impl AppState {
    pub fn session_cookies(&self) -> SessionCookies {
        SessionCookies::new(self.secure_cookies)
    }
}

#[derive(Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
struct RefreshResponse {
    ok: bool,
}

/// JSON error body with a status derived from the failure kind.
pub struct FailureResponse(pub ApiFailure);

impl IntoResponse for FailureResponse {
    fn into_response(self) -> Response {
        let status = match self.0.kind {
            FailureKind::InvalidCredentials | FailureKind::InactiveAccount => StatusCode::UNAUTHORIZED,
            FailureKind::Forbidden => StatusCode::FORBIDDEN,
            FailureKind::Validation => StatusCode::BAD_REQUEST,
            FailureKind::Conflict => StatusCode::CONFLICT,
            FailureKind::Network | FailureKind::Server | FailureKind::Generic => StatusCode::BAD_GATEWAY,
        };
        (
            status,
            Json(ErrorResponse {
                error: self.0.message,
            }),
        )
            .into_response()
    }
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/auth/login", post(handle_login))
        .route("/api/v1/auth/logout", post(handle_logout))
        .route("/api/v1/auth/refresh", post(handle_refresh))
}

fn with_cookies(mut response: Response, cookies: SessionCookies) -> Response {
    for value in cookies.into_headers() {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    response
}

async fn handle_login(State(state): State<AppState>, Json(body): Json<LoginRequest>) -> Response {
    let mut cookies = state.session_cookies();
    let outcome = login::login(
        &state.client,
        &mut cookies,
        state.probe_policy,
        body.email.trim(),
        &body.password,
    )
    .await;

    let status = match &outcome {
        LoginOutcome::AdminConfirmed | LoginOutcome::Degraded => StatusCode::OK,
        LoginOutcome::NotAdmin | LoginOutcome::Unconfirmed => StatusCode::FORBIDDEN,
        LoginOutcome::InactiveAccount { .. } | LoginOutcome::Rejected { .. } => StatusCode::UNAUTHORIZED,
    };
    with_cookies((status, Json(outcome)).into_response(), cookies)
}

async fn handle_logout(State(state): State<AppState>) -> Response {
    let mut cookies = state.session_cookies();
    cookies.clear();
    info!("session cleared");
    with_cookies(Json(serde_json::json!({ "ok": true })).into_response(), cookies)
}

/// Swap the refresh cookie for a new access token.
async fn handle_refresh(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(session) = read_session(&headers) else {
        return unauthorized();
    };

    match state.client.refresh_access(&session.refresh).await {
        Ok(access) => {
            let mut cookies = state.session_cookies();
            cookies.store(&SessionTokens {
                access,
                refresh: session.refresh,
            });
            with_cookies(Json(RefreshResponse { ok: true }).into_response(), cookies)
        }
        Err(e) => {
            warn!(error = %e, "token refresh failed");
            let mut cookies = state.session_cookies();
            cookies.clear();
            with_cookies(unauthorized(), cookies)
        }
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: "unauthorized".into(),
        }),
    )
        .into_response()
}

/// Middleware for API routes: requires a bearer header or the access cookie
/// and hands the credentials to the handler as an extension.
pub async fn require_api_auth(mut request: Request<Body>, next: Next) -> Response {
    let Some(credentials) = read_credentials(request.headers()) else {
        return unauthorized();
    };
    request.extensions_mut().insert(credentials);
    next.run(request).await
}

/// Middleware for page routes: the dashboard needs a session cookie,
/// everything else is public.
pub async fn require_page_auth(request: Request<Body>, next: Next) -> Response {
    let path = request.uri().path();
    let isProtected = path == "/admin" || path.starts_with("/admin/");

    if isProtected && read_session(request.headers()).is_none() {
        let mut response = Redirect::to("/login").into_response();
        response
            .headers_mut()
            .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
        return response;
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, routing::get};
    use tower::ServiceExt;

    fn state(base: &str) -> AppState {
        AppState {
            client: ApiClient::new(base).unwrap(),
            probe_policy: ProbePolicy::Advisory,
            secure_cookies: false,
        }
    }

    fn pages() -> Router {
        Router::new()
            .route("/admin", get(|| async { "dashboard" }))
            .route("/login", get(|| async { "login" }))
            .layer(middleware::from_fn(require_page_auth))
    }

    fn get_request(uri: &str, cookie: Option<&'static str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(c) = cookie {
            builder = builder.header(header::COOKIE, c);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn dashboard_without_session_redirects_to_login() {
        let response = pages().oneshot(get_request("/admin", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }

    #[tokio::test]
    async fn dashboard_with_session_passes() {
        let response = pages()
            .oneshot(get_request("/admin", Some("access_token=a; refresh_token=r")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn login_page_is_public() {
        let response = pages().oneshot(get_request("/login", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn logout_clears_both_cookies() {
        let app = auth_routes().with_state(state("http://127.0.0.1:9"));
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/auth/logout")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        let cleared: Vec<&str> = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect();
        assert_eq!(cleared.len(), 2);
        assert!(cleared.iter().all(|c| c.contains("Max-Age=0")));
    }

    #[tokio::test]
    async fn refresh_without_session_is_unauthorized() {
        let app = auth_routes().with_state(state("http://127.0.0.1:9"));
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/auth/refresh")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
