//! In-process record store.
//!
//! Implements every data and storage collaborator trait against in-memory
//! maps. The hosted service's access policy is mirrored for an acting role so
//! denied mutations fail the same way they would remotely. Used by tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use placement_core::application::{
    JobApplication, JobApplicationRepository, NewJobApplication, StatusUpdate,
};
use placement_core::identity::Role;
use placement_core::job::{JobPosting, JobRepository, JobStatus};
use placement_core::profile::{CompanyProfile, ProfileRepository, StudentProfile};
use placement_core::storage::StorageService;
use placement_core::{PortalError, Result};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    applications: HashMap<String, JobApplication>,
    jobs: HashMap<String, JobPosting>,
    students: HashMap<String, StudentProfile>,
    companies: HashMap<String, CompanyProfile>,
    objects: HashMap<String, Vec<u8>>,
}

/// In-memory stand-in for the hosted data and storage service.
#[derive(Default)]
pub struct InMemoryRecordStore {
    tables: RwLock<Tables>,
    /// `None` acts with the service role and bypasses the policy.
    acting_role: Option<Role>,
    offline: AtomicBool,
}

impl InMemoryRecordStore {
    /// Creates a store that bypasses the access policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that applies the access policy for `role`.
    pub fn for_role(role: Role) -> Self {
        Self {
            acting_role: Some(role),
            ..Self::default()
        }
    }

    pub fn acting_role(&self) -> Option<Role> {
        self.acting_role
    }

    /// Simulates a network outage: every call fails with an upstream error.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Returns the bytes stored under `bucket/path`, if any.
    pub async fn object(&self, bucket: &str, path: &str) -> Option<Vec<u8>> {
        self.tables
            .read()
            .await
            .objects
            .get(&object_key(bucket, path))
            .cloned()
    }

    fn ensure_online(&self, service: &str) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(PortalError::upstream(service, "service unreachable"));
        }
        Ok(())
    }

    fn ensure_allowed(&self, allowed: impl Fn(Role) -> bool, action: &str) -> Result<()> {
        match self.acting_role {
            Some(role) if !allowed(role) => Err(PortalError::policy_denied(format!(
                "role '{}' may not {}",
                role, action
            ))),
            _ => Ok(()),
        }
    }
}

fn object_key(bucket: &str, path: &str) -> String {
    format!("{}/{}", bucket, path)
}

#[async_trait]
impl JobApplicationRepository for InMemoryRecordStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<JobApplication>> {
        self.ensure_online("data")?;
        Ok(self.tables.read().await.applications.get(id).cloned())
    }

    async fn list_by_student(&self, student_id: &str) -> Result<Vec<JobApplication>> {
        self.ensure_online("data")?;
        let tables = self.tables.read().await;
        let mut found: Vec<_> = tables
            .applications
            .values()
            .filter(|a| a.student_id == student_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(found)
    }

    async fn list_by_job(&self, job_id: &str) -> Result<Vec<JobApplication>> {
        self.ensure_online("data")?;
        let tables = self.tables.read().await;
        let mut found: Vec<_> = tables
            .applications
            .values()
            .filter(|a| a.job_id == job_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(found)
    }

    async fn insert(&self, application: &NewJobApplication) -> Result<JobApplication> {
        self.ensure_online("data")?;
        self.ensure_allowed(|r| r.can_create_application(), "create applications")?;

        let mut tables = self.tables.write().await;
        let duplicate = tables
            .applications
            .values()
            .any(|a| a.job_id == application.job_id && a.student_id == application.student_id);
        if duplicate {
            return Err(PortalError::validation(format!(
                "Student '{}' has already applied to job '{}'",
                application.student_id, application.job_id
            )));
        }

        let now = Utc::now();
        let record = JobApplication {
            id: Uuid::new_v4().to_string(),
            job_id: application.job_id.clone(),
            student_id: application.student_id.clone(),
            status: application.status,
            admin_notes: None,
            created_at: now,
            updated_at: now,
        };
        tables.applications.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn update(&self, id: &str, update: &StatusUpdate) -> Result<JobApplication> {
        self.ensure_online("data")?;
        self.ensure_allowed(|r| r.can_update_application_status(), "update applications")?;

        let mut tables = self.tables.write().await;
        let record = tables
            .applications
            .get_mut(id)
            .ok_or_else(|| PortalError::not_found("job_application", id))?;

        if let Some(status) = update.status {
            record.status = status;
        }
        if let Some(notes) = &update.admin_notes {
            record.admin_notes = Some(notes.clone());
        }
        record.updated_at = Utc::now();
        Ok(record.clone())
    }
}

#[async_trait]
impl JobRepository for InMemoryRecordStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<JobPosting>> {
        self.ensure_online("data")?;
        Ok(self.tables.read().await.jobs.get(id).cloned())
    }

    async fn list_by_status(&self, status: JobStatus) -> Result<Vec<JobPosting>> {
        self.ensure_online("data")?;
        let tables = self.tables.read().await;
        let mut found: Vec<_> = tables
            .jobs
            .values()
            .filter(|j| j.status == status)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.deadline.cmp(&b.deadline));
        Ok(found)
    }

    async fn list_by_company(&self, company_id: &str) -> Result<Vec<JobPosting>> {
        self.ensure_online("data")?;
        let tables = self.tables.read().await;
        let mut found: Vec<_> = tables
            .jobs
            .values()
            .filter(|j| j.company_id == company_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.deadline.cmp(&b.deadline));
        Ok(found)
    }

    async fn save(&self, posting: &JobPosting) -> Result<JobPosting> {
        self.ensure_online("data")?;
        self.ensure_allowed(|r| r.can_manage_postings(), "manage job postings")?;
        self.tables
            .write()
            .await
            .jobs
            .insert(posting.id.clone(), posting.clone());
        Ok(posting.clone())
    }

    async fn update_status(&self, id: &str, status: JobStatus) -> Result<JobPosting> {
        self.ensure_online("data")?;
        self.ensure_allowed(|r| r.can_manage_postings(), "manage job postings")?;
        let mut tables = self.tables.write().await;
        let posting = tables
            .jobs
            .get_mut(id)
            .ok_or_else(|| PortalError::not_found("job", id))?;
        posting.status = status;
        Ok(posting.clone())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryRecordStore {
    async fn find_student(&self, user_id: &str) -> Result<Option<StudentProfile>> {
        self.ensure_online("data")?;
        Ok(self.tables.read().await.students.get(user_id).cloned())
    }

    async fn save_student(&self, profile: &StudentProfile) -> Result<StudentProfile> {
        self.ensure_online("data")?;
        self.ensure_allowed(|r| matches!(r, Role::Student | Role::Admin), "edit student profiles")?;
        self.tables
            .write()
            .await
            .students
            .insert(profile.user_id.clone(), profile.clone());
        Ok(profile.clone())
    }

    async fn find_company(&self, id: &str) -> Result<Option<CompanyProfile>> {
        self.ensure_online("data")?;
        Ok(self.tables.read().await.companies.get(id).cloned())
    }

    async fn find_company_by_code(&self, company_code: &str) -> Result<Option<CompanyProfile>> {
        self.ensure_online("data")?;
        Ok(self
            .tables
            .read()
            .await
            .companies
            .values()
            .find(|c| c.company_code == company_code)
            .cloned())
    }

    async fn save_company(&self, profile: &CompanyProfile) -> Result<CompanyProfile> {
        self.ensure_online("data")?;
        self.ensure_allowed(|r| matches!(r, Role::Company | Role::Admin), "edit company profiles")?;
        self.tables
            .write()
            .await
            .companies
            .insert(profile.id.clone(), profile.clone());
        Ok(profile.clone())
    }
}

#[async_trait]
impl StorageService for InMemoryRecordStore {
    async fn store(&self, bytes: Vec<u8>, bucket: &str, path: &str) -> Result<String> {
        self.ensure_online("storage")?;
        let key = object_key(bucket, path);
        self.tables.write().await.objects.insert(key.clone(), bytes);
        Ok(format!("memory://{}", key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use placement_core::application::ApplicationStatus;
    use placement_core::job::EligibilityCriteria;

    fn posting(id: &str, company_id: &str, status: JobStatus) -> JobPosting {
        JobPosting {
            id: id.to_string(),
            title: "SDE Intern".to_string(),
            company_id: company_id.to_string(),
            description: String::new(),
            location: Some("Pune".to_string()),
            package: None,
            eligibility: EligibilityCriteria::default(),
            deadline: Utc::now() + Duration::days(7),
            status,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let store = InMemoryRecordStore::new();
        let created = store
            .insert(&NewJobApplication::new("job-1", "stu-1"))
            .await
            .unwrap();

        assert_eq!(created.status, ApplicationStatus::Applied);
        assert_eq!(store.list_by_student("stu-1").await.unwrap().len(), 1);
        assert_eq!(store.list_by_job("job-1").await.unwrap().len(), 1);
        assert!(store.list_by_job("job-2").await.unwrap().is_empty());

        let found = JobApplicationRepository::find_by_id(&store, &created.id)
            .await
            .unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn test_duplicate_application_rejected() {
        let store = InMemoryRecordStore::new();
        let new = NewJobApplication::new("job-1", "stu-1");
        store.insert(&new).await.unwrap();

        let err = store.insert(&new).await.unwrap_err();
        assert!(matches!(err, PortalError::Validation(_)));
    }

    #[tokio::test]
    async fn test_policy_mirror() {
        let student_store = InMemoryRecordStore::for_role(Role::Student);
        let created = student_store
            .insert(&NewJobApplication::new("job-1", "stu-1"))
            .await
            .unwrap();
        let err = student_store
            .update(&created.id, &StatusUpdate::status(ApplicationStatus::Selected))
            .await
            .unwrap_err();
        assert!(err.is_policy_denied());

        let admin_store = InMemoryRecordStore::for_role(Role::Admin);
        let err = admin_store
            .insert(&NewJobApplication::new("job-1", "stu-1"))
            .await
            .unwrap_err();
        assert!(err.is_policy_denied());
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = InMemoryRecordStore::for_role(Role::Company);
        let err = store
            .update("nope", &StatusUpdate::status(ApplicationStatus::Rejected))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_jobs_by_status_and_company() {
        let store = InMemoryRecordStore::for_role(Role::Company);
        store.save(&posting("job-1", "co-1", JobStatus::Active)).await.unwrap();
        store.save(&posting("job-2", "co-1", JobStatus::Draft)).await.unwrap();
        store.save(&posting("job-3", "co-2", JobStatus::Active)).await.unwrap();

        assert_eq!(store.list_by_status(JobStatus::Active).await.unwrap().len(), 2);
        assert_eq!(store.list_by_company("co-1").await.unwrap().len(), 2);

        let closed = store.update_status("job-1", JobStatus::Closed).await.unwrap();
        assert_eq!(closed.status, JobStatus::Closed);
        assert_eq!(store.list_by_status(JobStatus::Active).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_company_lookup_by_code() {
        let store = InMemoryRecordStore::new();
        store
            .save_company(&CompanyProfile {
                id: "co-1".to_string(),
                name: "Acme".to_string(),
                company_code: "ACME01".to_string(),
                logo_url: None,
                website: None,
            })
            .await
            .unwrap();

        let found = store.find_company_by_code("ACME01").await.unwrap();
        assert_eq!(found.map(|c| c.id), Some("co-1".to_string()));
        assert!(store.find_company_by_code("NOPE").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_storage_roundtrip_and_offline() {
        let store = InMemoryRecordStore::new();
        let url = store
            .store(b"%PDF".to_vec(), "resumes", "stu-1/a.pdf")
            .await
            .unwrap();
        assert_eq!(url, "memory://resumes/stu-1/a.pdf");
        assert_eq!(
            store.object("resumes", "stu-1/a.pdf").await,
            Some(b"%PDF".to_vec())
        );

        store.set_offline(true);
        let err = store
            .store(Vec::new(), "resumes", "stu-1/b.pdf")
            .await
            .unwrap_err();
        assert!(err.is_upstream());
    }
}
