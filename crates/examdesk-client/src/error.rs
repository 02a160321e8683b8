use examdesk_types::Fault;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("backend unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    #[error("backend rejected request with HTTP {status}")]
    Rejected { status: u16, body: Value },

    #[error("malformed response body: {0}")]
    Malformed(#[source] reqwest::Error),

    #[error("invalid backend url {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to build http client: {0}")]
    Setup(#[source] reqwest::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Wire-level view used by the classification functions.
    pub fn fault(&self) -> Fault {
        match self {
            ClientError::Unreachable(_) | ClientError::Setup(_) | ClientError::InvalidBaseUrl { .. } => {
                Fault::Unreachable
            }
            ClientError::Rejected { status, body } => Fault::Response {
                status: *status,
                body: body.clone(),
            },
            ClientError::Malformed(_) => Fault::Malformed,
        }
    }
}

impl From<&ClientError> for Fault {
    fn from(error: &ClientError) -> Self {
        error.fault()
    }
}
