use axum::{
    extract::{Path, State},
    routing::{get, patch},
    Extension, Json, Router,
};
use examdesk_client::exams;
use examdesk_types::{Credentials, Exam, ExamToggle};
use serde::Deserialize;

use crate::middleware::auth::{AppState, FailureResponse};

#[derive(Deserialize)]
struct ActiveRequest {
    is_active: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/exams", get(get_exams))
        .route("/api/v1/exams/:id", patch(patch_exam))
}

async fn get_exams(
    State(state): State<AppState>,
    Extension(credentials): Extension<Credentials>,
) -> Result<Json<Vec<Exam>>, FailureResponse> {
    exams::fetch_exams(&state.client, &credentials)
        .await
        .map(Json)
        .map_err(FailureResponse)
}

/// Returns the updated exam and, when the re-list worked, the fresh list.
async fn patch_exam(
    State(state): State<AppState>,
    Extension(credentials): Extension<Credentials>,
    Path(id): Path<i64>,
    Json(body): Json<ActiveRequest>,
) -> Result<Json<ExamToggle>, FailureResponse> {
    exams::set_exam_active(&state.client, &credentials, id, body.is_active)
        .await
        .map(Json)
        .map_err(FailureResponse)
}
