use examdesk_types::{classify_registration, classify_verification, ApiFailure, RegistrationDetails};
use tracing::{info, warn};

use crate::ApiClient;

/// Step one of signup. `Ok` carries the message to show above the code form.
pub async fn submit_details(client: &ApiClient, details: &RegistrationDetails) -> Result<String, ApiFailure> {
    match client.register(details).await {
        Ok(message) => {
            info!("registration accepted, verification code sent");
            Ok(message)
        }
        Err(e) => {
            let failure = classify_registration(&e.fault(), client.base_url());
            warn!(error = %e, kind = ?failure.kind, "registration failed");
            Err(failure)
        }
    }
}

/// Step two of signup.
pub async fn submit_code(client: &ApiClient, email: &str, code: &str) -> Result<(), ApiFailure> {
    client.verify(email, code.trim()).await.map_err(|e| {
        let failure = classify_verification(&e.fault());
        warn!(error = %e, kind = ?failure.kind, "verification failed");
        failure
    })
}
