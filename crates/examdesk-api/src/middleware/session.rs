//! Session tokens carried in the browser's cookies.

use axum::http::{HeaderMap, HeaderValue};
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use examdesk_types::{Credentials, SessionTokens, TokenStore, ACCESS_COOKIE, REFRESH_COOKIE};
use tracing::warn;

/// [`TokenStore`] that renders `Set-Cookie` headers. Each write replaces the
/// previous one, so only the final state of a flow reaches the browser.
#[derive(Debug, Clone)]
pub struct SessionCookies {
    secure: bool,
    headers: Vec<HeaderValue>,
}

impl SessionCookies {
    pub fn new(secure: bool) -> Self {
        Self {
            secure,
            headers: Vec::new(),
        }
    }

    pub fn into_headers(self) -> Vec<HeaderValue> {
        self.headers
    }

    fn cookie(&self, name: &'static str, value: String) -> Cookie<'static> {
        Cookie::build((name, value))
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Strict)
            .path("/")
            .build()
    }

    fn render(cookies: [Cookie<'static>; 2]) -> Vec<HeaderValue> {
        cookies
            .iter()
            .filter_map(|c| match HeaderValue::from_str(&c.to_string()) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(cookie = c.name(), "unrepresentable cookie value: {e}");
                    None
                }
            })
            .collect()
    }
}

impl TokenStore for SessionCookies {
    fn store(&mut self, tokens: &SessionTokens) {
        self.headers = Self::render([
            self.cookie(ACCESS_COOKIE, tokens.access.clone()),
            self.cookie(REFRESH_COOKIE, tokens.refresh.clone()),
        ]);
    }

    fn clear(&mut self) {
        let mut access = self.cookie(ACCESS_COOKIE, String::new());
        let mut refresh = self.cookie(REFRESH_COOKIE, String::new());
        access.make_removal();
        refresh.make_removal();
        self.headers = Self::render([access, refresh]);
    }
}

/// Both tokens, when the browser holds a complete session.
pub fn read_session(headers: &HeaderMap) -> Option<SessionTokens> {
    let jar = CookieJar::from_headers(headers);
    let access = jar.get(ACCESS_COOKIE)?.value().to_string();
    let refresh = jar.get(REFRESH_COOKIE)?.value().to_string();
    if access.is_empty() || refresh.is_empty() {
        return None;
    }
    Some(SessionTokens { access, refresh })
}

/// Credentials from `Authorization: Bearer ..`, falling back to the access cookie.
pub fn read_credentials(headers: &HeaderMap) -> Option<Credentials> {
    let bearer = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(Credentials(token.to_string()));
    }

    CookieJar::from_headers(headers)
        .get(ACCESS_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
        .map(Credentials)
}
