//! Server-side helpers shared by the server functions.

use examdesk_api::middleware::auth::AppState;
use examdesk_api::middleware::session::{read_credentials, SessionCookies};
use examdesk_types::Credentials;
use http::header::SET_COOKIE;
use http::HeaderMap;
use leptos::prelude::*;
use leptos_axum::ResponseOptions;

pub fn app_state() -> Result<AppState, ServerFnError> {
    use_context::<AppState>().ok_or_else(|| ServerFnError::new("app state unavailable"))
}

/// Credentials of the browser session making this request.
pub async fn session_credentials() -> Result<Option<Credentials>, ServerFnError> {
    let headers: HeaderMap = leptos_axum::extract().await?;
    Ok(read_credentials(&headers))
}

/// Forward the cookies a flow wrote to the response.
pub fn write_cookies(cookies: SessionCookies) -> Result<(), ServerFnError> {
    let responseOptions = use_context::<ResponseOptions>()
        .ok_or_else(|| ServerFnError::new("response options unavailable"))?;
    for value in cookies.into_headers() {
        responseOptions.append_header(SET_COOKIE, value);
    }
    Ok(())
}

/// Like [`session_credentials`], but a missing session is an error.
pub async fn require_credentials() -> Result<Credentials, ServerFnError> {
    session_credentials()
        .await?
        .ok_or_else(|| ServerFnError::new("Not authenticated."))
}
