//! Job posting repository trait.

use async_trait::async_trait;

use crate::error::Result;

use super::model::{JobPosting, JobStatus};

/// Access to the `jobs` collection of the data collaborator.
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<JobPosting>>;

    /// Lists postings with the given publication status.
    async fn list_by_status(&self, status: JobStatus) -> Result<Vec<JobPosting>>;

    async fn list_by_company(&self, company_id: &str) -> Result<Vec<JobPosting>>;

    /// Inserts or replaces a posting.
    async fn save(&self, posting: &JobPosting) -> Result<JobPosting>;

    async fn update_status(&self, id: &str, status: JobStatus) -> Result<JobPosting>;
}
