use axum::{
    extract::{Path, State},
    routing::{get, patch, post},
    Extension, Json, Router,
};
use examdesk_client::users;
use examdesk_types::{Credentials, EditOutcome, Notice, User, UserPatch};
use serde::Deserialize;

use crate::middleware::auth::{AppState, FailureResponse};

#[derive(Deserialize)]
struct ResendRequest {
    email: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/users", get(get_users))
        .route("/api/v1/users/:id", patch(patch_user))
        .route("/api/v1/users/resend", post(post_resend))
}

async fn get_users(
    State(state): State<AppState>,
    Extension(credentials): Extension<Credentials>,
) -> Result<Json<Vec<User>>, FailureResponse> {
    users::fetch_users(&state.client, &credentials)
        .await
        .map(Json)
        .map_err(FailureResponse)
}

async fn patch_user(
    State(state): State<AppState>,
    Extension(credentials): Extension<Credentials>,
    Path(id): Path<i64>,
    Json(body): Json<UserPatch>,
) -> Result<Json<EditOutcome>, FailureResponse> {
    users::submit_edit(&state.client, &credentials, id, &body)
        .await
        .map(Json)
        .map_err(FailureResponse)
}

async fn post_resend(
    State(state): State<AppState>,
    Json(body): Json<ResendRequest>,
) -> Json<Notice> {
    Json(users::resend_activation_for(&state.client, body.email.trim()).await)
}
