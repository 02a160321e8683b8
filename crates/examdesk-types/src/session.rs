use serde::{Deserialize, Serialize};

pub const ACCESS_COOKIE: &str = "access_token";
pub const REFRESH_COOKIE: &str = "refresh_token";

/// Token pair issued by `POST /api/users/token/`.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionTokens {
    pub access: String,
    pub refresh: String,
}

// Keep tokens out of logs.
impl std::fmt::Debug for SessionTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokens").finish_non_exhaustive()
    }
}

/// Bearer credential for a single backend call.
#[derive(Clone, PartialEq)]
pub struct Credentials(pub String);

impl Credentials {
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credentials(..)")
    }
}

impl From<&SessionTokens> for Credentials {
    fn from(tokens: &SessionTokens) -> Self {
        Credentials(tokens.access.clone())
    }
}

/// Where a login flow persists the token pair. Both tokens are always written
/// or cleared together.
pub trait TokenStore {
    fn store(&mut self, tokens: &SessionTokens);
    fn clear(&mut self);
}

/// In-process store, used by tests and by callers that only need the result.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    pub tokens: Option<SessionTokens>,
    pub writes: usize,
    pub clears: usize,
}

impl TokenStore for MemoryTokenStore {
    fn store(&mut self, tokens: &SessionTokens) {
        self.tokens = Some(tokens.clone());
        self.writes += 1;
    }

    fn clear(&mut self) {
        self.tokens = None;
        self.clears += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_tokens() {
        let tokens = SessionTokens {
            access: "secret-access".into(),
            refresh: "secret-refresh".into(),
        };
        let rendered = format!("{tokens:?} {:?}", Credentials::from(&tokens));
        assert!(!rendered.contains("secret"));
    }
}
