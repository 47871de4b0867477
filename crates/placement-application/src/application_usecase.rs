//! Job application workflow use cases.
//!
//! Students apply; admins and companies review. Every rule checked here is
//! a UX mirror of the data service policy, which has the final word.

use std::sync::Arc;

use chrono::Utc;
use placement_core::application::{
    ApplicationStatus, JobApplication, JobApplicationRepository, NewJobApplication, StatusUpdate,
    check_transition,
};
use placement_core::identity::{AuthService, Role};
use placement_core::job::JobRepository;
use placement_core::{PortalError, Result};

use crate::authorization::require_any;

/// Coordinates applications between the session and the record store.
pub struct ApplicationUseCase {
    auth: Arc<dyn AuthService>,
    applications: Arc<dyn JobApplicationRepository>,
    jobs: Arc<dyn JobRepository>,
}

impl ApplicationUseCase {
    pub fn new(
        auth: Arc<dyn AuthService>,
        applications: Arc<dyn JobApplicationRepository>,
        jobs: Arc<dyn JobRepository>,
    ) -> Self {
        Self {
            auth,
            applications,
            jobs,
        }
    }

    /// Submits an application for the signed-in student.
    pub async fn apply(&self, job_id: &str) -> Result<JobApplication> {
        let session = require_any(self.auth.as_ref(), &[Role::Student]).await?;

        let job = self
            .jobs
            .find_by_id(job_id)
            .await?
            .ok_or_else(|| PortalError::not_found("job", job_id))?;
        if !job.accepts_applications(Utc::now()) {
            return Err(PortalError::validation(format!(
                "'{}' is not accepting applications",
                job.title
            )));
        }

        let existing = self.applications.list_by_student(&session.user_id).await?;
        if existing.iter().any(|a| a.job_id == job_id) {
            return Err(PortalError::validation(format!(
                "You have already applied to '{}'",
                job.title
            )));
        }

        let created = self
            .applications
            .insert(&NewJobApplication::new(job_id, session.user_id.as_str()))
            .await?;
        tracing::info!(
            application_id = %created.id,
            job_id,
            student_id = %session.user_id,
            "Application submitted"
        );
        Ok(created)
    }

    /// Applications of the signed-in student, newest first.
    pub async fn my_applications(&self) -> Result<Vec<JobApplication>> {
        let session = require_any(self.auth.as_ref(), &[Role::Student]).await?;
        let mut applications = self.applications.list_by_student(&session.user_id).await?;
        applications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(applications)
    }

    /// Applications to a posting, optionally narrowed to one status.
    pub async fn applications_for_job(
        &self,
        job_id: &str,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<JobApplication>> {
        require_any(self.auth.as_ref(), &[Role::Admin, Role::Company]).await?;
        let applications = self.applications.list_by_job(job_id).await?;
        Ok(match status {
            Some(status) => applications
                .into_iter()
                .filter(|a| a.status == status)
                .collect(),
            None => applications,
        })
    }

    /// Moves an application to `status`, optionally recording reviewer notes.
    ///
    /// Applications in a final status are not moved again.
    pub async fn update_status(
        &self,
        application_id: &str,
        status: ApplicationStatus,
        notes: Option<String>,
    ) -> Result<JobApplication> {
        let session = require_any(self.auth.as_ref(), &[Role::Admin, Role::Company]).await?;

        let current = self
            .applications
            .find_by_id(application_id)
            .await?
            .ok_or_else(|| PortalError::not_found("job_application", application_id))?;
        check_transition(current.status, status)?;

        let update = StatusUpdate {
            status: Some(status),
            admin_notes: notes,
        };
        let updated = self.applications.update(application_id, &update).await?;
        tracing::info!(
            application_id,
            from = %current.status,
            to = %updated.status,
            reviewer = %session.user_id,
            "Application status updated"
        );
        Ok(updated)
    }

    /// Records reviewer notes without changing the status.
    pub async fn add_notes(&self, application_id: &str, notes: &str) -> Result<JobApplication> {
        require_any(self.auth.as_ref(), &[Role::Admin, Role::Company]).await?;
        if notes.trim().is_empty() {
            return Err(PortalError::validation("Notes cannot be empty"));
        }
        self.applications
            .update(application_id, &StatusUpdate::default().with_notes(notes.trim()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use placement_core::identity::{Session, SessionState};
    use placement_core::job::{EligibilityCriteria, JobPosting, JobStatus};
    use placement_infrastructure::{InMemoryRecordStore, SessionStore};

    fn posting(id: &str, status: JobStatus, days_left: i64) -> JobPosting {
        JobPosting {
            id: id.to_string(),
            title: format!("Role {}", id),
            company_id: "co-1".to_string(),
            description: String::new(),
            location: None,
            package: Some("8 LPA".to_string()),
            eligibility: EligibilityCriteria::default(),
            deadline: Utc::now() + Duration::days(days_left),
            status,
            created_at: Utc::now(),
        }
    }

    async fn setup(role: Role) -> (ApplicationUseCase, Arc<InMemoryRecordStore>) {
        let store = Arc::new(InMemoryRecordStore::new());
        store.save(&posting("job-open", JobStatus::Active, 5)).await.unwrap();
        store.save(&posting("job-closed", JobStatus::Closed, 5)).await.unwrap();
        store.save(&posting("job-expired", JobStatus::Active, -1)).await.unwrap();

        let auth = Arc::new(SessionStore::with_state(SessionState::Authenticated(
            Session::new(format!("{}-1", role), role, "Tester"),
        )));
        let usecase = ApplicationUseCase::new(auth, store.clone(), store.clone());
        (usecase, store)
    }

    #[tokio::test]
    async fn test_student_applies_once() {
        let (usecase, _) = setup(Role::Student).await;

        let created = usecase.apply("job-open").await.unwrap();
        assert_eq!(created.status, ApplicationStatus::Applied);
        assert_eq!(created.student_id, "student-1");

        let err = usecase.apply("job-open").await.unwrap_err();
        assert!(matches!(err, PortalError::Validation(_)));
        assert_eq!(usecase.my_applications().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_cannot_apply_to_closed_or_expired() {
        let (usecase, _) = setup(Role::Student).await;
        assert!(usecase.apply("job-closed").await.is_err());
        assert!(usecase.apply("job-expired").await.is_err());
        assert!(usecase.apply("job-missing").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_admin_cannot_apply() {
        let (usecase, _) = setup(Role::Admin).await;
        let err = usecase.apply("job-open").await.unwrap_err();
        assert!(err.is_redirect_resolved());
    }

    #[tokio::test]
    async fn test_reviewer_moves_status_until_final() {
        let (usecase, store) = setup(Role::Company).await;
        let created = store
            .insert(&NewJobApplication::new("job-open", "stu-9"))
            .await
            .unwrap();

        let shortlisted = usecase
            .update_status(&created.id, ApplicationStatus::Shortlisted, None)
            .await
            .unwrap();
        assert_eq!(shortlisted.status, ApplicationStatus::Shortlisted);

        let placed = usecase
            .update_status(
                &created.id,
                ApplicationStatus::Ppo,
                Some("Converted from internship".to_string()),
            )
            .await
            .unwrap();
        assert!(placed.is_final());
        assert_eq!(placed.admin_notes.as_deref(), Some("Converted from internship"));

        let err = usecase
            .update_status(&created.id, ApplicationStatus::Rejected, None)
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn test_filter_by_status() {
        let (usecase, store) = setup(Role::Admin).await;
        let first = store
            .insert(&NewJobApplication::new("job-open", "stu-1"))
            .await
            .unwrap();
        store
            .insert(&NewJobApplication::new("job-open", "stu-2"))
            .await
            .unwrap();
        usecase
            .update_status(&first.id, ApplicationStatus::Rejected, None)
            .await
            .unwrap();

        let all = usecase.applications_for_job("job-open", None).await.unwrap();
        assert_eq!(all.len(), 2);
        let rejected = usecase
            .applications_for_job("job-open", Some(ApplicationStatus::Rejected))
            .await
            .unwrap();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].id, first.id);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_not_retried() {
        let (usecase, store) = setup(Role::Admin).await;
        let created = store
            .insert(&NewJobApplication::new("job-open", "stu-1"))
            .await
            .unwrap();

        store.set_offline(true);
        let err = usecase
            .update_status(&created.id, ApplicationStatus::Selected, None)
            .await
            .unwrap_err();
        assert!(err.is_upstream());

        store.set_offline(false);
        let unchanged = JobApplicationRepository::find_by_id(store.as_ref(), &created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged.status, ApplicationStatus::Applied);
    }

    #[tokio::test]
    async fn test_add_notes() {
        let (usecase, store) = setup(Role::Admin).await;
        let created = store
            .insert(&NewJobApplication::new("job-open", "stu-1"))
            .await
            .unwrap();

        assert!(usecase.add_notes(&created.id, "  ").await.is_err());
        let noted = usecase.add_notes(&created.id, "Strong DSA round").await.unwrap();
        assert_eq!(noted.admin_notes.as_deref(), Some("Strong DSA round"));
        assert_eq!(noted.status, ApplicationStatus::Applied);
    }
}
