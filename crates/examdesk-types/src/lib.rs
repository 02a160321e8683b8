#![allow(non_snake_case)]

pub mod directory;
pub mod exam;
pub mod failure;
pub mod listing;
pub mod login;
pub mod registration;
pub mod session;
pub mod user;

pub use directory::*;
pub use exam::*;
pub use failure::*;
pub use listing::*;
pub use login::*;
pub use registration::*;
pub use session::*;
pub use user::*;

use serde::{Deserialize, Serialize};

/// One-line banner shown inline by a view after an operation completes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Error(m) => m,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

impl From<ApiFailure> for Notice {
    fn from(failure: ApiFailure) -> Self {
        Notice::Error(failure.message)
    }
}
