use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Exam {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ExamPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

pub const EXAMS_FETCH_FAILED: &str = "Failed to fetch exams.";
pub const EXAM_UPDATE_FAILED: &str = "Failed to update exam.";

/// Result of a successful toggle: the server's record and the re-fetched list.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExamToggle {
    pub updated: Exam,
    /// `None` when the patch went through but the re-list failed.
    pub exams: Option<Vec<Exam>>,
}

impl ExamToggle {
    /// Table contents after the toggle. Without a fresh list the changed row
    /// is replaced in `current`.
    pub fn merge_into(self, mut current: Vec<Exam>) -> Vec<Exam> {
        match self.exams {
            Some(exams) => exams,
            None => {
                if let Some(slot) = current.iter_mut().find(|e| e.id == self.updated.id) {
                    *slot = self.updated;
                }
                current
            }
        }
    }
}
