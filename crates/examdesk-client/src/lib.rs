#![allow(non_snake_case)]

pub mod auth;
pub mod error;
pub mod exams;
pub mod login;
pub mod registration;
pub mod users;

use std::time::Duration;

use examdesk_types::Credentials;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

pub use error::ClientError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Client for the exam platform REST API. Holds no credentials; each
/// authenticated call takes them explicitly.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, None)
    }

    /// `timeout` of `None` keeps the transport default.
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let trimmed = base_url.trim_end_matches('/');
        Url::parse(trimmed).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        let mut builder = Client::builder().user_agent(concat!("examdesk/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ClientError::Setup)?;

        Ok(Self {
            http,
            base_url: trimmed.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn get(&self, path: &str, credentials: Option<&Credentials>) -> RequestBuilder {
        authorize(self.http.get(self.url(path)), credentials)
    }

    fn post(&self, path: &str, credentials: Option<&Credentials>) -> RequestBuilder {
        authorize(self.http.post(self.url(path)), credentials)
    }

    fn patch(&self, path: &str, credentials: Option<&Credentials>) -> RequestBuilder {
        authorize(self.http.patch(self.url(path)), credentials)
    }

    /// Send and decode a 2xx JSON body.
    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        response.json::<T>().await.map_err(ClientError::Malformed)
    }

    /// Send and ignore any 2xx body.
    async fn send_unit(&self, request: RequestBuilder) -> Result<(), ClientError> {
        self.send(request).await.map(|_| ())
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, ClientError> {
        let response = request.send().await.map_err(ClientError::Unreachable)?;
        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "backend response");

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        Err(ClientError::Rejected {
            status: status.as_u16(),
            body: parse_error_body(&text),
        })
    }
}

fn authorize(request: RequestBuilder, credentials: Option<&Credentials>) -> RequestBuilder {
    match credentials {
        Some(c) => request.bearer_auth(&c.0),
        None => request,
    }
}

/// Error bodies are usually JSON; anything else is kept as a string.
fn parse_error_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn base_url_is_validated_and_trimmed() {
        let client = ApiClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/api/users/token/"), "http://localhost:8000/api/users/token/");

        assert!(matches!(
            ApiClient::new("not a url"),
            Err(ClientError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn error_bodies_fall_back_to_text() {
        assert_eq!(parse_error_body(""), Value::Null);
        assert_eq!(parse_error_body(r#"{"error":"x"}"#), json!({ "error": "x" }));
        assert_eq!(
            parse_error_body("<h1>Server Error (500)</h1>"),
            json!("<h1>Server Error (500)</h1>")
        );
    }
}
