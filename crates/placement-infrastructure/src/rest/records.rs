//! Repository implementations backed by the hosted REST API.

use async_trait::async_trait;
use placement_core::application::{
    JobApplication, JobApplicationRepository, NewJobApplication, StatusUpdate,
};
use placement_core::job::{JobPosting, JobRepository, JobStatus};
use placement_core::profile::{CompanyProfile, ProfileRepository, StudentProfile};
use placement_core::storage::StorageService;
use placement_core::{PortalError, Result};
use serde::Serialize;

use super::client::RestClient;

const APPLICATIONS: &str = "job_applications";
const JOBS: &str = "jobs";
const STUDENTS: &str = "students";
const COMPANIES: &str = "companies";

/// Gateway to the hosted record and object collections.
///
/// Row-level policy is enforced by the service; denials surface as
/// `PortalError::PolicyDenied` and are never retried.
#[derive(Clone)]
pub struct RestRecordGateway {
    client: RestClient,
}

impl RestRecordGateway {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RestClient {
        &self.client
    }
}

#[derive(Serialize)]
struct JobStatusPatch {
    status: JobStatus,
}

#[async_trait]
impl JobApplicationRepository for RestRecordGateway {
    async fn find_by_id(&self, id: &str) -> Result<Option<JobApplication>> {
        self.client.select_one(APPLICATIONS, &[("id", id)]).await
    }

    async fn list_by_student(&self, student_id: &str) -> Result<Vec<JobApplication>> {
        self.client
            .select(APPLICATIONS, &[("student_id", student_id)])
            .await
    }

    async fn list_by_job(&self, job_id: &str) -> Result<Vec<JobApplication>> {
        self.client.select(APPLICATIONS, &[("job_id", job_id)]).await
    }

    async fn insert(&self, application: &NewJobApplication) -> Result<JobApplication> {
        self.client.insert(APPLICATIONS, application).await
    }

    async fn update(&self, id: &str, update: &StatusUpdate) -> Result<JobApplication> {
        let rows: Vec<JobApplication> = self
            .client
            .update(APPLICATIONS, &[("id", id)], update)
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| PortalError::not_found("job_application", id))
    }
}

#[async_trait]
impl JobRepository for RestRecordGateway {
    async fn find_by_id(&self, id: &str) -> Result<Option<JobPosting>> {
        self.client.select_one(JOBS, &[("id", id)]).await
    }

    async fn list_by_status(&self, status: JobStatus) -> Result<Vec<JobPosting>> {
        self.client
            .select(JOBS, &[("status", status.as_str())])
            .await
    }

    async fn list_by_company(&self, company_id: &str) -> Result<Vec<JobPosting>> {
        self.client.select(JOBS, &[("company_id", company_id)]).await
    }

    async fn save(&self, posting: &JobPosting) -> Result<JobPosting> {
        self.client.upsert(JOBS, posting).await
    }

    async fn update_status(&self, id: &str, status: JobStatus) -> Result<JobPosting> {
        let rows: Vec<JobPosting> = self
            .client
            .update(JOBS, &[("id", id)], &JobStatusPatch { status })
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| PortalError::not_found("job", id))
    }
}

#[async_trait]
impl ProfileRepository for RestRecordGateway {
    async fn find_student(&self, user_id: &str) -> Result<Option<StudentProfile>> {
        self.client.select_one(STUDENTS, &[("user_id", user_id)]).await
    }

    async fn save_student(&self, profile: &StudentProfile) -> Result<StudentProfile> {
        self.client.upsert(STUDENTS, profile).await
    }

    async fn find_company(&self, id: &str) -> Result<Option<CompanyProfile>> {
        self.client.select_one(COMPANIES, &[("id", id)]).await
    }

    async fn find_company_by_code(&self, company_code: &str) -> Result<Option<CompanyProfile>> {
        self.client
            .select_one(COMPANIES, &[("company_code", company_code)])
            .await
    }

    async fn save_company(&self, profile: &CompanyProfile) -> Result<CompanyProfile> {
        self.client.upsert(COMPANIES, profile).await
    }
}

#[async_trait]
impl StorageService for RestRecordGateway {
    async fn store(&self, bytes: Vec<u8>, bucket: &str, path: &str) -> Result<String> {
        self.client.upload(bucket, path, bytes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use placement_core::config::ServiceConfig;

    #[test]
    fn test_gateway_builds_from_config() {
        let config = ServiceConfig {
            base_url: "https://abc.example.co".to_string(),
            api_key: "anon".to_string(),
            timeout_secs: 5,
        };
        let gateway = RestRecordGateway::new(RestClient::new(&config).unwrap());
        assert_eq!(gateway.client().base_url().as_str(), "https://abc.example.co/");
    }

    #[test]
    fn test_job_status_patch_body() {
        let body = serde_json::to_value(JobStatusPatch {
            status: JobStatus::Closed,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "status": "closed" }));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_upstream() {
        let config = ServiceConfig {
            // Port 9 (discard) on loopback: connection refused.
            base_url: "http://127.0.0.1:9".to_string(),
            api_key: "anon".to_string(),
            timeout_secs: 2,
        };
        let gateway = RestRecordGateway::new(RestClient::new(&config).unwrap());
        let err = gateway.list_by_student("stu-1").await.unwrap_err();
        assert!(err.is_upstream());
    }
}
