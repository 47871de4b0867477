//! JobApplication domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::ApplicationStatus;

/// A student's application to a job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: String,
    pub job_id: String,
    pub student_id: String,
    pub status: ApplicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobApplication {
    /// Whether the application has reached an end state.
    pub fn is_final(&self) -> bool {
        self.status.is_final()
    }
}

/// Insert payload for a new application. Status is always `applied`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewJobApplication {
    pub job_id: String,
    pub student_id: String,
    pub status: ApplicationStatus,
}

impl NewJobApplication {
    pub fn new(job_id: impl Into<String>, student_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            student_id: student_id.into(),
            status: ApplicationStatus::Applied,
        }
    }
}

/// Partial update applied by admin or company reviewers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ApplicationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
}

impl StatusUpdate {
    pub fn status(status: ApplicationStatus) -> Self {
        Self {
            status: Some(status),
            admin_notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.admin_notes = Some(notes.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.admin_notes.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_application_starts_applied() {
        let new = NewJobApplication::new("job-1", "stu-1");
        assert_eq!(new.status, ApplicationStatus::Applied);
    }

    #[test]
    fn test_status_update_serializes_only_set_fields() {
        let update = StatusUpdate::status(ApplicationStatus::Shortlisted);
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "shortlisted" }));

        assert!(StatusUpdate::default().is_empty());
        assert!(!StatusUpdate::default().with_notes("call back").is_empty());
    }
}
