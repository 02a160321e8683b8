use serde::{Deserialize, Serialize};

use crate::{ApiFailure, Notice, User, UserPatch};

pub const USERS_FETCH_FAILED: &str = "Failed to fetch users.";
pub const USER_UPDATED: &str = "User updated successfully.";
pub const USER_UPDATE_FAILED: &str = "Failed to update user.";
pub const ACTIVATION_RESENT: &str = "Activation code resent!";

/// Result of a successful edit: the server's record and the re-fetched list.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EditOutcome {
    pub updated: User,
    /// `None` when the patch went through but the re-list failed.
    pub users: Option<Vec<User>>,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirectoryStats {
    pub total: usize,
    pub active: usize,
    pub verified: usize,
    pub pending: usize,
}

/// View state of the user management tab.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserDirectory {
    pub users: Vec<User>,
    pub loading: bool,
    pub error: Option<String>,
    /// Server copy of the record being edited.
    pub selected: Option<User>,
    /// Local edits to `selected`.
    pub draft: Option<User>,
    pub edit_notice: Option<Notice>,
}

impl UserDirectory {
    pub fn loaded(&mut self, result: Result<Vec<User>, ApiFailure>) {
        self.loading = false;
        match result {
            Ok(users) => {
                self.users = users;
                self.error = None;
            }
            Err(failure) => self.error = Some(failure.message),
        }
    }

    pub fn stats(&self) -> DirectoryStats {
        let verified = self.users.iter().filter(|u| u.is_verified).count();
        DirectoryStats {
            total: self.users.len(),
            active: self.users.iter().filter(|u| u.is_active).count(),
            verified,
            pending: self.users.len() - verified,
        }
    }

    /// Open the edit panel for `id`. Returns false when the id is not listed.
    pub fn select(&mut self, id: i64) -> bool {
        let Some(user) = self.users.iter().find(|u| u.id == id).cloned() else {
            return false;
        };
        self.draft = Some(user.clone());
        self.selected = Some(user);
        self.edit_notice = None;
        true
    }

    /// Changes to submit for the open record.
    pub fn pending_patch(&self) -> Option<(i64, UserPatch)> {
        let selected = self.selected.as_ref()?;
        let draft = self.draft.as_ref()?;
        Some((selected.id, UserPatch::between(selected, draft)))
    }

    pub fn edit_applied(&mut self, outcome: EditOutcome) {
        match outcome.users {
            Some(users) => self.users = users,
            None => {
                if let Some(slot) = self.users.iter_mut().find(|u| u.id == outcome.updated.id) {
                    *slot = outcome.updated.clone();
                }
            }
        }
        self.draft = Some(outcome.updated.clone());
        self.selected = Some(outcome.updated);
        self.edit_notice = Some(Notice::Success(USER_UPDATED.into()));
    }

    pub fn edit_failed(&mut self) {
        self.edit_notice = Some(Notice::Error(USER_UPDATE_FAILED.into()));
    }

    pub fn dismiss(&mut self) {
        self.selected = None;
        self.draft = None;
        self.edit_notice = None;
    }
}
