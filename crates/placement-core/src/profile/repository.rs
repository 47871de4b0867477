//! Profile repository trait.

use async_trait::async_trait;

use crate::error::Result;

use super::model::{CompanyProfile, StudentProfile};

/// Access to the `students` and `companies` collections.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_student(&self, user_id: &str) -> Result<Option<StudentProfile>>;

    /// Inserts or replaces a student profile.
    async fn save_student(&self, profile: &StudentProfile) -> Result<StudentProfile>;

    async fn find_company(&self, id: &str) -> Result<Option<CompanyProfile>>;

    /// Looks up a company by the code handed out for company sign-in.
    async fn find_company_by_code(&self, company_code: &str) -> Result<Option<CompanyProfile>>;

    /// Inserts or replaces a company profile.
    async fn save_company(&self, profile: &CompanyProfile) -> Result<CompanyProfile>;
}
