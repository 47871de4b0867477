//! Job application repository trait.
//!
//! Defines the interface to the `job_applications` collection of the data
//! collaborator.

use async_trait::async_trait;

use crate::error::Result;

use super::model::{JobApplication, NewJobApplication, StatusUpdate};

/// An abstract repository for job applications.
///
/// # Implementation Notes
///
/// Implementations must return `PortalError::PolicyDenied` when the access
/// policy rejects a mutation and `PortalError::Upstream` for transport or
/// service failures. Callers never retry.
#[async_trait]
pub trait JobApplicationRepository: Send + Sync {
    /// Finds an application by its ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(JobApplication))`: Application found
    /// - `Ok(None)`: Application not found
    /// - `Err(_)`: Error occurred during retrieval
    async fn find_by_id(&self, id: &str) -> Result<Option<JobApplication>>;

    /// Lists applications submitted by a student.
    async fn list_by_student(&self, student_id: &str) -> Result<Vec<JobApplication>>;

    /// Lists applications to a job posting.
    async fn list_by_job(&self, job_id: &str) -> Result<Vec<JobApplication>>;

    /// Inserts a new application and returns the stored record.
    async fn insert(&self, application: &NewJobApplication) -> Result<JobApplication>;

    /// Applies a partial update and returns the stored record.
    ///
    /// # Returns
    ///
    /// - `Ok(JobApplication)`: Updated record
    /// - `Err(PortalError::NotFound)`: No application with that ID
    /// - `Err(_)`: Policy denial or upstream failure
    async fn update(&self, id: &str, update: &StatusUpdate) -> Result<JobApplication>;
}
