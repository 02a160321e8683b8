use serde::{Deserialize, Serialize};

use crate::{ApiFailure, Notice};

pub const VERIFICATION_SUCCESS: &str = "Verification Successful! Redirecting to login...";
pub const CODE_LENGTH: usize = 6;

/// Body of `POST /api/users/register/`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct RegistrationDetails {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Form contents while the wizard is open. Never persisted.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct RegistrationDraft {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub code: String,
}

impl RegistrationDraft {
    pub fn details(&self) -> RegistrationDetails {
        RegistrationDetails {
            email: self.email.clone(),
            password: self.password.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum RegistrationStep {
    #[default]
    Details,
    Verification,
}

/// Two-step signup: details, then the emailed code.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegistrationWizard {
    pub step: RegistrationStep,
    pub draft: RegistrationDraft,
    pub notice: Option<Notice>,
    /// Set once verification succeeds; the view navigates to login on it.
    pub completed: bool,
}

impl RegistrationWizard {
    /// Result of submitting the details step. `Ok` carries the server's message.
    pub fn details_submitted(&mut self, result: Result<String, ApiFailure>) {
        match result {
            Ok(message) => {
                self.step = RegistrationStep::Verification;
                self.notice = Some(Notice::Success(message));
            }
            Err(failure) => self.notice = Some(failure.into()),
        }
    }

    pub fn verification_submitted(&mut self, result: Result<(), ApiFailure>) {
        match result {
            Ok(()) => {
                self.notice = Some(Notice::Success(VERIFICATION_SUCCESS.into()));
                self.draft = RegistrationDraft::default();
                self.completed = true;
            }
            Err(failure) => self.notice = Some(failure.into()),
        }
    }

    /// Back to the details step. Only the code is reset.
    pub fn back(&mut self) {
        self.step = RegistrationStep::Details;
        self.draft.code.clear();
        self.notice = None;
    }

    pub fn code_is_complete(&self) -> bool {
        self.draft.code.trim().chars().count() == CODE_LENGTH
    }
}
