//! Storage collaborator interface.
//!
//! Uploads land in a named bucket under a caller-chosen path; the service
//! answers with a public URL.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;

/// Object storage of the hosted service.
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Stores `bytes` at `bucket/path` and returns its public URL.
    ///
    /// Fails with `PortalError::Upstream` when the upload does not complete.
    async fn store(&self, bytes: Vec<u8>, bucket: &str, path: &str) -> Result<String>;
}

/// Builds a collision-free object path: `{identifier}/{uuid}.{ext}`.
///
/// The extension of `file_name` is kept (lowercased) so the storage service
/// can infer a content type. Path separators in `identifier` are replaced,
/// and an empty or dot-only identifier becomes underscores so the owner is
/// always a single ordinary segment.
pub fn upload_path(identifier: &str, file_name: &str) -> String {
    let mut owner = identifier.trim().replace(['/', '\\'], "_");
    if owner.chars().all(|c| c == '.') {
        owner = "_".repeat(owner.len().max(1));
    }
    let token = Uuid::new_v4();
    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension {
        Some(ext) if !ext.is_empty() => format!("{}/{}.{}", owner, token, ext),
        _ => format!("{}/{}", owner, token),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_path_keeps_extension() {
        let path = upload_path("stu-1", "My Resume.PDF");
        assert!(path.starts_with("stu-1/"));
        assert!(path.ends_with(".pdf"));
    }

    #[test]
    fn test_upload_path_without_extension() {
        let path = upload_path("stu-1", "resume");
        let token = path.strip_prefix("stu-1/").unwrap();
        assert!(Uuid::parse_str(token).is_ok());
    }

    #[test]
    fn test_upload_paths_do_not_collide() {
        let first = upload_path("stu-1", "resume.pdf");
        let second = upload_path("stu-1", "resume.pdf");
        assert_ne!(first, second);
    }

    #[test]
    fn test_empty_or_dot_identifier_stays_one_segment() {
        for identifier in ["", "   ", ".", ".."] {
            let path = upload_path(identifier, "x.pdf");
            let (owner, file) = path.split_once('/').unwrap();
            assert!(!owner.is_empty(), "identifier {:?}", identifier);
            assert!(owner.chars().all(|c| c == '_'), "identifier {:?}", identifier);
            assert!(file.ends_with(".pdf"));
        }
        assert!(upload_path("..", "x.pdf").starts_with("__/"));
    }

    #[test]
    fn test_identifier_cannot_add_segments() {
        let path = upload_path("../etc", "x.png");
        assert!(path.starts_with(".._etc/"));
    }
}
