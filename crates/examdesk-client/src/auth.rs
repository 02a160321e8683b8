//! Account endpoints under `/api/users/` and the admin probe.

use examdesk_types::{Credentials, RegistrationDetails, SessionTokens};
use serde::{Deserialize, Serialize};

use crate::{ApiClient, ClientError};

const TOKEN_PATH: &str = "/api/users/token/";
const TOKEN_REFRESH_PATH: &str = "/api/users/token/refresh/";
const REGISTER_PATH: &str = "/api/users/register/";
const VERIFY_PATH: &str = "/api/users/verify/";
pub(crate) const ADMIN_USERS_PATH: &str = "/api/admin/users/";

#[derive(Serialize)]
struct TokenRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh: &'a str,
}

#[derive(Deserialize)]
struct RefreshResponse {
    access: String,
}

#[derive(Serialize)]
struct EmailRequest<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct VerifyRequest<'a> {
    email: &'a str,
    code: &'a str,
}

#[derive(Deserialize)]
struct MessageResponse {
    #[serde(default)]
    message: String,
}

impl ApiClient {
    /// Exchange email and password for a token pair. The backend calls the
    /// email `username`.
    pub async fn issue_token(&self, email: &str, password: &str) -> Result<SessionTokens, ClientError> {
        let request = self.post(TOKEN_PATH, None).json(&TokenRequest {
            username: email,
            password,
        });
        self.send_json(request).await
    }

    /// New access token for a refresh token.
    pub async fn refresh_access(&self, refresh: &str) -> Result<String, ClientError> {
        let request = self
            .post(TOKEN_REFRESH_PATH, None)
            .json(&RefreshRequest { refresh });
        let response: RefreshResponse = self.send_json(request).await?;
        Ok(response.access)
    }

    /// GET an admin-only resource to learn whether `credentials` grant admin
    /// rights. The body is ignored.
    pub async fn probe_admin(&self, credentials: &Credentials) -> Result<(), ClientError> {
        self.send_unit(self.get(ADMIN_USERS_PATH, Some(credentials))).await
    }

    /// Create an account and trigger the verification email. Returns the
    /// server's message.
    pub async fn register(&self, details: &RegistrationDetails) -> Result<String, ClientError> {
        let request = self.post(REGISTER_PATH, None).json(details);
        let response: MessageResponse = self.send_json(request).await?;
        Ok(response.message)
    }

    /// Re-trigger the verification email for an existing address.
    pub async fn resend_code(&self, email: &str) -> Result<(), ClientError> {
        let request = self.post(REGISTER_PATH, None).json(&EmailRequest { email });
        // Only the status matters; the body shape varies.
        self.send_unit(request).await
    }

    pub async fn verify(&self, email: &str, code: &str) -> Result<(), ClientError> {
        let request = self.post(VERIFY_PATH, None).json(&VerifyRequest { email, code });
        self.send_unit(request).await
    }
}
