use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Creator,
    #[default]
    Student,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Creator, Role::Student];

    /// Wire value, as the backend spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Creator => "CREATOR",
            Role::Student => "STUDENT",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Creator => "Creator",
            Role::Student => "Student",
        }
    }

    pub fn parse(value: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|r| r.as_str() == value)
    }
}

/// User record as returned by the admin users endpoint.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_tier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_joined: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
}

impl User {
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let trimmed = full.trim();
        if trimmed.is_empty() {
            self.email.clone()
        } else {
            trimmed.to_string()
        }
    }

    /// Avatar letter: first name initial, falling back to the email's.
    pub fn initial(&self) -> String {
        self.first_name
            .chars()
            .next()
            .or_else(|| self.email.chars().next())
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default()
    }
}

/// Partial update for `PATCH /api/admin/users/{id}/`. Unset fields are not sent.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
}

impl UserPatch {
    /// Fields of `edited` that differ from `original`.
    pub fn between(original: &User, edited: &User) -> Self {
        Self {
            first_name: (original.first_name != edited.first_name)
                .then(|| edited.first_name.clone()),
            last_name: (original.last_name != edited.last_name).then(|| edited.last_name.clone()),
            role: (original.role != edited.role).then_some(edited.role),
            is_active: (original.is_active != edited.is_active).then_some(edited.is_active),
            is_verified: (original.is_verified != edited.is_verified).then_some(edited.is_verified),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == UserPatch::default()
    }
}
