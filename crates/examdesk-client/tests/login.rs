mod common;

use common::{Backend, ACCESS, REFRESH};
use examdesk_client::login::{activate, login, resend_activation};
use examdesk_types::{
    LoginOutcome, MemoryTokenStore, Notice, ProbePolicy, ACCOUNT_ACTIVATED, CODE_RESENT,
    INACTIVE_ACCOUNT_PROMPT, INVALID_CODE, RESEND_FAILED,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn admin_probe_success_stores_tokens_and_redirects() {
    let backend = Backend::start().await;
    backend.token_ok().await;
    backend.admin_users(200, json!([])).await;

    let mut store = MemoryTokenStore::default();
    let outcome = login(&backend.client, &mut store, ProbePolicy::Advisory, "admin@example.com", "pw").await;

    assert_eq!(outcome, LoginOutcome::AdminConfirmed);
    assert!(outcome.redirects());
    let tokens = store.tokens.expect("tokens stored");
    assert_eq!(tokens.access, ACCESS);
    assert_eq!(tokens.refresh, REFRESH);
}

#[tokio::test]
async fn token_request_sends_email_as_username() {
    let backend = Backend::start().await;
    Mock::given(method("POST"))
        .and(path("/api/users/token/"))
        .and(body_json(json!({ "username": "admin@example.com", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access": ACCESS, "refresh": REFRESH })))
        .expect(1)
        .mount(&backend.server)
        .await;
    backend.admin_users(200, json!({ "results": [] })).await;

    let mut store = MemoryTokenStore::default();
    let outcome = login(&backend.client, &mut store, ProbePolicy::Advisory, "admin@example.com", "pw").await;
    assert_eq!(outcome, LoginOutcome::AdminConfirmed);
}

#[tokio::test]
async fn forbidden_probe_revokes_stored_tokens() {
    let backend = Backend::start().await;
    backend.token_ok().await;
    backend
        .admin_users(403, json!({ "detail": "You do not have permission to perform this action." }))
        .await;

    let mut store = MemoryTokenStore::default();
    let outcome = login(&backend.client, &mut store, ProbePolicy::Advisory, "student@example.com", "pw").await;

    assert_eq!(outcome, LoginOutcome::NotAdmin);
    assert!(!outcome.redirects());
    assert!(store.tokens.is_none());
    assert_eq!(store.writes, 1);
    assert_eq!(store.clears, 1);
}

#[tokio::test]
async fn other_probe_failures_follow_policy() {
    let backend = Backend::start().await;
    backend.token_ok().await;
    backend.admin_users(500, json!({ "detail": "boom" })).await;

    let mut advisory = MemoryTokenStore::default();
    let outcome = login(&backend.client, &mut advisory, ProbePolicy::Advisory, "a@example.com", "pw").await;
    assert_eq!(outcome, LoginOutcome::Degraded);
    assert!(outcome.redirects());
    assert!(advisory.tokens.is_some());

    let mut enforced = MemoryTokenStore::default();
    let outcome = login(&backend.client, &mut enforced, ProbePolicy::Enforced, "a@example.com", "pw").await;
    assert_eq!(outcome, LoginOutcome::Unconfirmed);
    assert!(enforced.tokens.is_none());
}

#[tokio::test]
async fn unknown_account_shows_invalid_credentials() {
    let backend = Backend::start().await;
    backend
        .token_err(401, json!({ "detail": "No active account found with the given credentials" }))
        .await;

    let mut store = MemoryTokenStore::default();
    let outcome = login(&backend.client, &mut store, ProbePolicy::Advisory, "x@example.com", "bad").await;

    assert_eq!(
        outcome,
        LoginOutcome::Rejected {
            message: "Invalid credentials.".into()
        }
    );
    assert_eq!(store.writes, 0);
}

#[tokio::test]
async fn inactive_account_asks_for_code() {
    let backend = Backend::start().await;
    backend
        .token_err(403, json!({ "error": "Account not activated." }))
        .await;

    let mut store = MemoryTokenStore::default();
    let outcome = login(&backend.client, &mut store, ProbePolicy::Advisory, "new@example.com", "pw").await;

    assert_eq!(
        outcome,
        LoginOutcome::InactiveAccount {
            email: "new@example.com".into(),
            message: INACTIVE_ACCOUNT_PROMPT.into(),
        }
    );
    assert!(outcome.awaits_activation());
}

#[tokio::test]
async fn unreachable_backend_rejects_login() {
    let client = common::unreachable_client();
    let mut store = MemoryTokenStore::default();
    let outcome = login(&client, &mut store, ProbePolicy::Advisory, "a@example.com", "pw").await;
    assert!(matches!(outcome, LoginOutcome::Rejected { .. }));
    assert!(store.tokens.is_none());
}

#[tokio::test]
async fn activation_success_and_failure() {
    let backend = Backend::start().await;
    Mock::given(method("POST"))
        .and(path("/api/users/verify/"))
        .and(body_json(json!({ "email": "new@example.com", "code": "123456" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Account verified successfully!" })))
        .mount(&backend.server)
        .await;
    backend.verify(400, json!({ "error": "Invalid code" })).await;

    assert_eq!(
        activate(&backend.client, "new@example.com", " 123456 ").await,
        Notice::Success(ACCOUNT_ACTIVATED.into())
    );
    assert_eq!(
        activate(&backend.client, "new@example.com", "000000").await,
        Notice::Error(INVALID_CODE.into())
    );
}

#[tokio::test]
async fn resending_twice_gives_two_independent_banners() {
    let backend = Backend::start().await;
    Mock::given(method("POST"))
        .and(path("/api/users/register/"))
        .and(body_json(json!({ "email": "new@example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "sent" })))
        .expect(2)
        .mount(&backend.server)
        .await;

    let first = resend_activation(&backend.client, "new@example.com").await;
    let second = resend_activation(&backend.client, "new@example.com").await;
    assert_eq!(first, Notice::Success(CODE_RESENT.into()));
    assert_eq!(second, Notice::Success(CODE_RESENT.into()));

    let failed = resend_activation(&common::unreachable_client(), "new@example.com").await;
    assert_eq!(failed, Notice::Error(RESEND_FAILED.into()));
}
