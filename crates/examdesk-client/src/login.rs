//! Login, admin probe and account activation.

use examdesk_types::{
    classify_login, Credentials, FailureKind, LoginOutcome, Notice, ProbePolicy, TokenStore,
    ACCOUNT_ACTIVATED, CODE_RESENT, INVALID_CODE, RESEND_FAILED,
};
use tracing::{info, warn};

use crate::ApiClient;

/// Authenticate, persist the token pair, then probe for admin rights.
///
/// Requests are strictly sequential. Tokens are written to `store` as soon as
/// they are issued and cleared again when the probe says the account is not
/// an admin (or, under [`ProbePolicy::Enforced`], when the probe fails).
pub async fn login(
    client: &ApiClient,
    store: &mut impl TokenStore,
    policy: ProbePolicy,
    email: &str,
    password: &str,
) -> LoginOutcome {
    let tokens = match client.issue_token(email, password).await {
        Ok(tokens) => tokens,
        Err(e) => {
            let failure = classify_login(&e.fault());
            warn!(error = %e, kind = ?failure.kind, "token request failed");
            return match failure.kind {
                FailureKind::InactiveAccount => LoginOutcome::InactiveAccount {
                    email: email.to_string(),
                    message: failure.message,
                },
                _ => LoginOutcome::Rejected {
                    message: failure.message,
                },
            };
        }
    };

    store.store(&tokens);
    let credentials = Credentials::from(&tokens);

    match client.probe_admin(&credentials).await {
        Ok(()) => {
            info!("admin login confirmed");
            LoginOutcome::AdminConfirmed
        }
        Err(e) if e.fault().is_forbidden() => {
            info!("login refused: account is not an admin");
            store.clear();
            LoginOutcome::NotAdmin
        }
        Err(e) => match policy {
            ProbePolicy::Advisory => {
                warn!(error = %e, "admin probe failed, continuing to dashboard");
                LoginOutcome::Degraded
            }
            ProbePolicy::Enforced => {
                warn!(error = %e, "admin probe failed, revoking session");
                store.clear();
                LoginOutcome::Unconfirmed
            }
        },
    }
}

/// Submit the emailed code for an account that cannot log in yet.
pub async fn activate(client: &ApiClient, email: &str, code: &str) -> Notice {
    match client.verify(email, code.trim()).await {
        Ok(()) => {
            info!("account activated");
            Notice::Success(ACCOUNT_ACTIVATED.into())
        }
        Err(e) => {
            warn!(error = %e, "activation failed");
            Notice::Error(INVALID_CODE.into())
        }
    }
}

/// Ask the backend to send a fresh code. Safe to repeat; never touches the
/// session.
pub async fn resend_activation(client: &ApiClient, email: &str) -> Notice {
    match client.resend_code(email).await {
        Ok(()) => Notice::Success(CODE_RESENT.into()),
        Err(e) => {
            warn!(error = %e, "resending activation code failed");
            Notice::Error(RESEND_FAILED.into())
        }
    }
}
