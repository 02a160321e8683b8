#![allow(non_snake_case)]

mod common;

use common::{user_json, Backend, ACCESS};
use examdesk_client::exams::{fetch_exams, set_exam_active};
use examdesk_client::users::{fetch_users, resend_activation_for, submit_edit};
use examdesk_types::{
    Credentials, Exam, Notice, Role, UserPatch, ACTIVATION_RESENT, RESEND_FAILED, USERS_FETCH_FAILED,
    USER_UPDATE_FAILED,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

fn credentials() -> Credentials {
    Credentials(ACCESS.into())
}

#[tokio::test]
async fn listing_tolerates_array_and_envelope() {
    let bare = Backend::start().await;
    bare.admin_users(200, json!([user_json(1, "ADMIN", true), user_json(2, "STUDENT", false)]))
        .await;

    let paged = Backend::start().await;
    paged
        .admin_users(
            200,
            json!({
                "count": 2,
                "next": null,
                "previous": null,
                "results": [user_json(1, "ADMIN", true), user_json(2, "STUDENT", false)]
            }),
        )
        .await;

    let fromBare = fetch_users(&bare.client, &credentials()).await.unwrap();
    let fromPaged = fetch_users(&paged.client, &credentials()).await.unwrap();
    assert_eq!(fromBare.len(), 2);
    assert_eq!(fromBare.len(), fromPaged.len());
    assert_eq!(fromBare[1].role, Role::Student);
}

#[tokio::test]
async fn listing_failure_collapses_to_one_message() {
    let backend = Backend::start().await;
    backend.admin_users(401, json!({ "detail": "Token is invalid or expired" })).await;

    let failure = fetch_users(&backend.client, &credentials()).await.unwrap_err();
    assert_eq!(failure.message, USERS_FETCH_FAILED);
}

#[tokio::test]
async fn edit_relists_and_returns_server_record() {
    let backend = Backend::start().await;

    let mut serverRecord = user_json(7, "CREATOR", true);
    serverRecord["first_name"] = json!("FromServer");

    Mock::given(method("PATCH"))
        .and(path("/api/admin/users/7/"))
        .and(header("authorization", format!("Bearer {ACCESS}").as_str()))
        .and(body_json(json!({ "role": "CREATOR" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serverRecord.clone()))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/users/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([user_json(1, "ADMIN", true), serverRecord])),
        )
        .expect(1)
        .mount(&backend.server)
        .await;

    let patch = UserPatch {
        role: Some(Role::Creator),
        ..UserPatch::default()
    };
    let outcome = submit_edit(&backend.client, &credentials(), 7, &patch).await.unwrap();

    assert_eq!(outcome.updated.id, 7);
    assert_eq!(outcome.updated.role, Role::Creator);
    assert_eq!(outcome.updated.first_name, "FromServer");
    assert_eq!(outcome.users.map(|u| u.len()), Some(2));
}

#[tokio::test]
async fn edit_failure_reports_generic_message() {
    let backend = Backend::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/admin/users/7/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "role": ["\"OWNER\" is not a valid choice."] })))
        .mount(&backend.server)
        .await;

    let failure = submit_edit(&backend.client, &credentials(), 7, &UserPatch::default())
        .await
        .unwrap_err();
    assert_eq!(failure.message, USER_UPDATE_FAILED);
}

#[tokio::test]
async fn resend_for_user_is_scoped_to_their_email() {
    let backend = Backend::start().await;
    backend
        .register(json!({ "email": "user2@example.com" }), 200, json!({ "message": "sent" }))
        .await;

    assert_eq!(
        resend_activation_for(&backend.client, "user2@example.com").await,
        Notice::Success(ACTIVATION_RESENT.into())
    );
    // No mock matches a different body.
    assert_eq!(
        resend_activation_for(&backend.client, "other@example.com").await,
        Notice::Error(RESEND_FAILED.into())
    );
}

#[tokio::test]
async fn exam_toggle_patches_then_relists() {
    let backend = Backend::start().await;
    let exam = json!({
        "id": 4,
        "title": "Algebra I",
        "slug": "algebra-i",
        "description": "",
        "duration_minutes": 45,
        "is_active": false,
        "created_at": "2024-03-01T09:00:00Z"
    });

    Mock::given(method("PATCH"))
        .and(path("/api/admin/exams/4/"))
        .and(body_json(json!({ "is_active": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(exam.clone()))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/exams/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [exam] })))
        .mount(&backend.server)
        .await;

    let toggle = set_exam_active(&backend.client, &credentials(), 4, false).await.unwrap();
    assert!(!toggle.updated.is_active);
    let exams = toggle.exams.unwrap();
    assert_eq!(exams.len(), 1);
    assert!(!exams[0].is_active);

    let listed = fetch_exams(&backend.client, &credentials()).await.unwrap();
    assert_eq!(listed[0].duration_minutes, 45);
}

#[tokio::test]
async fn exam_toggle_survives_failed_relist() {
    let backend = Backend::start().await;
    let before = json!({ "id": 4, "title": "Algebra I", "is_active": true });
    let after = json!({ "id": 4, "title": "Algebra I", "is_active": false });

    Mock::given(method("PATCH"))
        .and(path("/api/admin/exams/4/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(after))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/exams/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&backend.server)
        .await;

    let toggle = set_exam_active(&backend.client, &credentials(), 4, false).await.unwrap();
    assert_eq!(toggle.exams, None);

    let current: Vec<Exam> = vec![serde_json::from_value(before).unwrap()];
    let table = toggle.merge_into(current);
    assert_eq!(table.len(), 1);
    assert!(!table[0].is_active);
}
