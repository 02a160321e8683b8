use examdesk_types::{
    ApiFailure, Credentials, Exam, ExamPatch, ExamToggle, Listing, EXAMS_FETCH_FAILED, EXAM_UPDATE_FAILED,
};
use tracing::warn;

use crate::{ApiClient, ClientError};

const ADMIN_EXAMS_PATH: &str = "/api/admin/exams/";

impl ApiClient {
    pub async fn list_exams(&self, credentials: &Credentials) -> Result<Vec<Exam>, ClientError> {
        let listing: Listing<Exam> = self
            .send_json(self.get(ADMIN_EXAMS_PATH, Some(credentials)))
            .await?;
        Ok(listing.into_items())
    }

    pub async fn patch_exam(
        &self,
        credentials: &Credentials,
        id: i64,
        patch: &ExamPatch,
    ) -> Result<Exam, ClientError> {
        let path = format!("{ADMIN_EXAMS_PATH}{id}/");
        self.send_json(self.patch(&path, Some(credentials)).json(patch))
            .await
    }
}

pub async fn fetch_exams(client: &ApiClient, credentials: &Credentials) -> Result<Vec<Exam>, ApiFailure> {
    client.list_exams(credentials).await.map_err(|e| {
        warn!(error = %e, "listing exams failed");
        ApiFailure::generic(&e.fault(), EXAMS_FETCH_FAILED)
    })
}

/// Flip an exam's active flag, then re-list. A failed re-list still counts as
/// a successful toggle.
pub async fn set_exam_active(
    client: &ApiClient,
    credentials: &Credentials,
    id: i64,
    active: bool,
) -> Result<ExamToggle, ApiFailure> {
    let patch = ExamPatch {
        is_active: Some(active),
    };
    let updated = client
        .patch_exam(credentials, id, &patch)
        .await
        .map_err(|e| {
            warn!(exam_id = id, error = %e, "updating exam failed");
            ApiFailure::generic(&e.fault(), EXAM_UPDATE_FAILED)
        })?;

    let exams = fetch_exams(client, credentials).await.ok();
    Ok(ExamToggle { updated, exams })
}
