//! Domain layer of the placement portal.
//!
//! Role-based access control for the student, admin, and company areas, and
//! the job application status workflow. The hosted data, storage, and auth
//! services are reached only through the traits defined here.

pub mod access;
pub mod application;
pub mod config;
pub mod error;
pub mod identity;
pub mod job;
pub mod notification;
pub mod profile;
pub mod storage;

// Re-export common error type
pub use error::{PortalError, Result};
