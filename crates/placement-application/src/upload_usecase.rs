//! Resume and company logo uploads.

use std::path::Path;
use std::sync::Arc;

use placement_core::config::StorageConfig;
use placement_core::identity::{AuthService, Role};
use placement_core::profile::{CompanyProfile, ProfileRepository, StudentProfile};
use placement_core::storage::{StorageService, upload_path};
use placement_core::{PortalError, Result};

use crate::authorization::require_any;

const RESUME_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];
const LOGO_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "svg", "webp"];

/// Uploads documents and records their public URL on the owner's profile.
pub struct DocumentUploadUseCase {
    auth: Arc<dyn AuthService>,
    storage: Arc<dyn StorageService>,
    profiles: Arc<dyn ProfileRepository>,
    buckets: StorageConfig,
}

impl DocumentUploadUseCase {
    pub fn new(
        auth: Arc<dyn AuthService>,
        storage: Arc<dyn StorageService>,
        profiles: Arc<dyn ProfileRepository>,
        buckets: StorageConfig,
    ) -> Self {
        Self {
            auth,
            storage,
            profiles,
            buckets,
        }
    }

    /// Uploads the signed-in student's resume and links it to their profile.
    pub async fn upload_resume(&self, file_name: &str, bytes: Vec<u8>) -> Result<StudentProfile> {
        let session = require_any(self.auth.as_ref(), &[Role::Student]).await?;
        validate_file(file_name, &bytes, RESUME_EXTENSIONS)?;

        let mut profile = self
            .profiles
            .find_student(&session.user_id)
            .await?
            .ok_or_else(|| PortalError::not_found("student_profile", session.user_id.as_str()))?;

        let path = upload_path(&session.user_id, file_name);
        let url = self
            .storage
            .store(bytes, &self.buckets.resume_bucket, &path)
            .await?;
        tracing::info!(student_id = %session.user_id, %path, "Resume uploaded");

        profile.resume_url = Some(url);
        self.profiles.save_student(&profile).await
    }

    /// Uploads the signed-in company's logo.
    ///
    /// The company is resolved from the session's company code.
    pub async fn upload_company_logo(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<CompanyProfile> {
        let session = require_any(self.auth.as_ref(), &[Role::Company]).await?;
        validate_file(file_name, &bytes, LOGO_EXTENSIONS)?;

        let code = session
            .company_code
            .as_deref()
            .ok_or_else(|| PortalError::validation("Company session has no company code"))?;
        let mut company = self
            .profiles
            .find_company_by_code(code)
            .await?
            .ok_or_else(|| PortalError::not_found("company", code))?;

        let path = upload_path(&company.id, file_name);
        let url = self
            .storage
            .store(bytes, &self.buckets.logo_bucket, &path)
            .await?;
        tracing::info!(company_id = %company.id, %path, "Company logo uploaded");

        company.logo_url = Some(url);
        self.profiles.save_company(&company).await
    }
}

fn validate_file(file_name: &str, bytes: &[u8], allowed: &[&str]) -> Result<()> {
    if bytes.is_empty() {
        return Err(PortalError::validation(format!("'{}' is empty", file_name)));
    }
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();
    if !allowed.contains(&extension.as_str()) {
        return Err(PortalError::validation(format!(
            "Unsupported file type for '{}' (expected one of: {})",
            file_name,
            allowed.join(", ")
        )));
    }
    Ok(())
}
