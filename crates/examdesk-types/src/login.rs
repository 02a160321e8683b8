use serde::{Deserialize, Serialize};

use crate::Notice;

pub const NOT_ADMIN: &str = "You are not an admin. Only admin users can access the dashboard.";
pub const ADMIN_CONFIRMED: &str = "Login successful! Redirecting to admin dashboard...";
pub const PROBE_DEGRADED: &str = "Login successful! Redirecting...";
pub const PROBE_UNCONFIRMED: &str = "Could not confirm admin access. Please try again.";
pub const ACCOUNT_ACTIVATED: &str = "Account activated! You can now log in.";
pub const CODE_RESENT: &str = "Activation code resent to your email.";
pub const RESEND_FAILED: &str = "Failed to resend activation code.";

/// How the login flow treats an admin probe that fails for a reason other
/// than 403.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProbePolicy {
    /// Redirect anyway; the dashboard's own calls will surface the problem.
    #[default]
    Advisory,
    /// Revoke the tokens and stay on the login page.
    Enforced,
}

/// Terminal state of one login attempt.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum LoginOutcome {
    AdminConfirmed,
    /// Probe failed for a non-403 reason under [`ProbePolicy::Advisory`].
    Degraded,
    NotAdmin,
    /// Probe failed for a non-403 reason under [`ProbePolicy::Enforced`].
    Unconfirmed,
    InactiveAccount { email: String, message: String },
    Rejected { message: String },
}

impl LoginOutcome {
    pub fn redirects(&self) -> bool {
        matches!(self, LoginOutcome::AdminConfirmed | LoginOutcome::Degraded)
    }

    pub fn awaits_activation(&self) -> bool {
        matches!(self, LoginOutcome::InactiveAccount { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            LoginOutcome::AdminConfirmed => ADMIN_CONFIRMED,
            LoginOutcome::Degraded => PROBE_DEGRADED,
            LoginOutcome::NotAdmin => NOT_ADMIN,
            LoginOutcome::Unconfirmed => PROBE_UNCONFIRMED,
            LoginOutcome::InactiveAccount { message, .. } | LoginOutcome::Rejected { message } => {
                message
            }
        }
    }

    pub fn is_error(&self) -> bool {
        !self.redirects()
    }

    pub fn notice(&self) -> Notice {
        if self.is_error() {
            Notice::Error(self.message().to_string())
        } else {
            Notice::Success(self.message().to_string())
        }
    }
}

/// Which account, if any, the activation form is open for. Each login attempt
/// replaces it and a successful activation closes it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActivationPrompt {
    email: Option<String>,
}

impl ActivationPrompt {
    pub fn login_finished(&mut self, outcome: &LoginOutcome) {
        self.email = match outcome {
            LoginOutcome::InactiveAccount { email, .. } => Some(email.clone()),
            _ => None,
        };
    }

    pub fn activation_finished(&mut self, notice: &Notice) {
        if !notice.is_error() {
            self.email = None;
        }
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_confirmed_and_degraded_redirect() {
        assert!(LoginOutcome::AdminConfirmed.redirects());
        assert!(LoginOutcome::Degraded.redirects());
        assert!(!LoginOutcome::NotAdmin.redirects());
        assert!(!LoginOutcome::Unconfirmed.redirects());
        assert!(!LoginOutcome::Rejected { message: "x".into() }.redirects());
    }

    #[test]
    fn probe_policy_reads_lowercase() {
        let policy: ProbePolicy = serde_json::from_str("\"enforced\"").unwrap();
        assert_eq!(policy, ProbePolicy::Enforced);
        assert_eq!(ProbePolicy::default(), ProbePolicy::Advisory);
    }

    fn inactive(email: &str) -> LoginOutcome {
        LoginOutcome::InactiveAccount {
            email: email.into(),
            message: "activate".into(),
        }
    }

    #[test]
    fn prompt_reopens_for_next_inactive_account() {
        let mut prompt = ActivationPrompt::default();
        prompt.login_finished(&inactive("a@example.com"));
        assert_eq!(prompt.email(), Some("a@example.com"));

        prompt.activation_finished(&Notice::Success(ACCOUNT_ACTIVATED.into()));
        assert_eq!(prompt.email(), None);

        prompt.login_finished(&inactive("b@example.com"));
        assert_eq!(prompt.email(), Some("b@example.com"));
    }

    #[test]
    fn failed_activation_keeps_prompt_open() {
        let mut prompt = ActivationPrompt::default();
        prompt.login_finished(&inactive("a@example.com"));
        prompt.activation_finished(&Notice::Error("Invalid code. Please try again.".into()));
        assert_eq!(prompt.email(), Some("a@example.com"));

        prompt.login_finished(&LoginOutcome::Rejected {
            message: "Invalid credentials.".into(),
        });
        assert_eq!(prompt.email(), None);
    }
}
