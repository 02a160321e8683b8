use examdesk_types::{
    ApiFailure, Credentials, EditOutcome, Listing, Notice, User, UserPatch, ACTIVATION_RESENT,
    RESEND_FAILED, USERS_FETCH_FAILED, USER_UPDATE_FAILED,
};
use tracing::warn;

use crate::auth::ADMIN_USERS_PATH;
use crate::{ApiClient, ClientError};

impl ApiClient {
    pub async fn list_users(&self, credentials: &Credentials) -> Result<Vec<User>, ClientError> {
        let listing: Listing<User> = self
            .send_json(self.get(ADMIN_USERS_PATH, Some(credentials)))
            .await?;
        Ok(listing.into_items())
    }

    pub async fn patch_user(
        &self,
        credentials: &Credentials,
        id: i64,
        patch: &UserPatch,
    ) -> Result<User, ClientError> {
        let path = format!("{ADMIN_USERS_PATH}{id}/");
        self.send_json(self.patch(&path, Some(credentials)).json(patch))
            .await
    }
}

pub async fn fetch_users(client: &ApiClient, credentials: &Credentials) -> Result<Vec<User>, ApiFailure> {
    client.list_users(credentials).await.map_err(|e| {
        warn!(error = %e, "listing users failed");
        ApiFailure::generic(&e.fault(), USERS_FETCH_FAILED)
    })
}

/// Patch one user, then re-list. The returned record is the server's, not
/// the submitted draft.
pub async fn submit_edit(
    client: &ApiClient,
    credentials: &Credentials,
    id: i64,
    patch: &UserPatch,
) -> Result<EditOutcome, ApiFailure> {
    let updated = client.patch_user(credentials, id, patch).await.map_err(|e| {
        warn!(user_id = id, error = %e, "updating user failed");
        ApiFailure::generic(&e.fault(), USER_UPDATE_FAILED)
    })?;

    let users = fetch_users(client, credentials).await.ok();
    Ok(EditOutcome { updated, users })
}

/// Resend the verification email for a listed user.
pub async fn resend_activation_for(client: &ApiClient, email: &str) -> Notice {
    match client.resend_code(email).await {
        Ok(()) => Notice::Success(ACTIVATION_RESENT.into()),
        Err(e) => {
            warn!(error = %e, "resending activation code failed");
            Notice::Error(RESEND_FAILED.into())
        }
    }
}
