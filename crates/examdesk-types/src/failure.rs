//! Classification of backend failures into one display string per operation.
//!
//! The backend reports errors in several shapes (`{"detail": ..}`,
//! `{"error": ..}`, per-field arrays, plain strings). Each `classify_*`
//! function maps a [`Fault`] to a tagged [`ApiFailure`] so views only render
//! `message` and can branch on `kind`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials.";
pub const NO_ACTIVE_ACCOUNT: &str = "No active account found with the given credentials";
pub const ACCOUNT_NOT_ACTIVATED: &str = "Account not activated.";
pub const INACTIVE_ACCOUNT_PROMPT: &str =
    "Your account is not active. Please enter the code sent to your email to activate.";
pub const LOGIN_FAILED: &str = "Login failed. Check your credentials.";
pub const EMAIL_IN_USE: &str = "This email is already used. Please use a different email.";
pub const REGISTRATION_SERVER_ERROR: &str = "Server error. Please try again later.";
pub const REGISTRATION_FAILED: &str =
    "Registration failed. Please check your details and try again.";
pub const INVALID_CODE: &str = "Invalid code. Please try again.";

const ALREADY_EXISTS: &str = "already exists";
const REGISTRATION_FIELDS: [&str; 4] = ["email", "password", "first_name", "last_name"];

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum FailureKind {
    /// No response at all.
    Network,
    InvalidCredentials,
    InactiveAccount,
    Forbidden,
    Validation,
    Conflict,
    Server,
    Generic,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ApiFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Fixed per-operation message; only the kind follows the fault.
    pub fn generic(fault: &Fault, message: impl Into<String>) -> Self {
        Self::new(fault.kind(), message)
    }
}

impl std::fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// What came back from a failed backend call.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum Fault {
    Unreachable,
    Response { status: u16, body: Value },
    /// 2xx with a body that did not decode.
    Malformed,
}

impl Fault {
    pub fn status(&self) -> Option<u16> {
        match self {
            Fault::Response { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&Value> {
        match self {
            Fault::Response { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(403)
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Fault::Unreachable => FailureKind::Network,
            Fault::Malformed => FailureKind::Generic,
            Fault::Response { status, .. } => match *status {
                401 => FailureKind::InvalidCredentials,
                403 => FailureKind::Forbidden,
                400 | 422 => FailureKind::Validation,
                409 => FailureKind::Conflict,
                s if s >= 500 => FailureKind::Server,
                _ => FailureKind::Generic,
            },
        }
    }

    /// String value of a top-level field of an object body.
    fn str_field(&self, name: &str) -> Option<&str> {
        self.body()?.get(name)?.as_str()
    }
}

/// Server field value as display text: first element of an array, else the value itself.
fn field_message(value: &Value) -> Option<String> {
    let value = match value {
        Value::Array(items) => items.first()?,
        other => other,
    };
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Token-issue failure.
pub fn classify_login(fault: &Fault) -> ApiFailure {
    if fault.str_field("detail") == Some(NO_ACTIVE_ACCOUNT) {
        return ApiFailure::new(FailureKind::InvalidCredentials, INVALID_CREDENTIALS);
    }
    if fault.str_field("error") == Some(ACCOUNT_NOT_ACTIVATED) {
        return ApiFailure::new(FailureKind::InactiveAccount, INACTIVE_ACCOUNT_PROMPT);
    }
    match fault.str_field("error") {
        Some(message) => ApiFailure::new(fault.kind(), message),
        None => ApiFailure::generic(fault, LOGIN_FAILED),
    }
}

/// Registration (step 1) failure. `backend` names the server in the
/// unreachable message.
pub fn classify_registration(fault: &Fault, backend: &str) -> ApiFailure {
    let (status, body) = match fault {
        Fault::Unreachable => {
            return ApiFailure::new(
                FailureKind::Network,
                format!("Cannot connect to server. Please make sure the backend is running on {backend}"),
            )
        }
        Fault::Malformed => return ApiFailure::new(FailureKind::Generic, REGISTRATION_FAILED),
        Fault::Response { status, body } => (*status, body),
    };

    let duplicate = match body {
        Value::String(s) => s.contains(ALREADY_EXISTS),
        Value::Object(fields) => {
            fields
                .get("error")
                .and_then(Value::as_str)
                .is_some_and(|e| e.contains(ALREADY_EXISTS))
                || fields
                    .get("email")
                    .and_then(field_message)
                    .is_some_and(|e| e.contains(ALREADY_EXISTS))
        }
        _ => false,
    };
    if duplicate {
        return ApiFailure::new(FailureKind::Conflict, EMAIL_IN_USE);
    }

    if let Value::Object(fields) = body {
        for name in REGISTRATION_FIELDS {
            if let Some(message) = fields.get(name).and_then(field_message) {
                return ApiFailure::new(FailureKind::Validation, message);
            }
        }
        if let Some(message) = fields.get("error").and_then(field_message) {
            return ApiFailure::new(fault.kind(), message);
        }
        if let Some(message) = fields.values().next().and_then(field_message) {
            return ApiFailure::new(FailureKind::Validation, message);
        }
    }

    if status == 500 {
        ApiFailure::new(FailureKind::Server, REGISTRATION_SERVER_ERROR)
    } else {
        ApiFailure::new(fault.kind(), REGISTRATION_FAILED)
    }
}

/// Registration (step 2) verification failure.
pub fn classify_verification(fault: &Fault) -> ApiFailure {
    match fault.str_field("error") {
        Some(message) => ApiFailure::new(fault.kind(), message),
        None => ApiFailure::generic(fault, INVALID_CODE),
    }
}
