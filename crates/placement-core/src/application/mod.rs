//! Job application domain module.
//!
//! # Module Structure
//!
//! - `status`: the closed status vocabulary (labels, badges, finality)
//! - `model`: `JobApplication` records and their inputs
//! - `workflow`: transition rules mirrored from the data service policy
//! - `repository`: persistence trait for the data collaborator
//!
//! # Usage
//!
//! ```ignore
//! use placement_core::application::{ApplicationStatus, JobApplication};
//! use placement_core::application::JobApplicationRepository;
//! ```

mod model;
pub mod repository;
mod status;
mod workflow;

// Re-export public API
pub use model::{JobApplication, NewJobApplication, StatusUpdate};
pub use repository::JobApplicationRepository;
pub use status::{ApplicationStatus, BadgeClass, all_statuses};
pub use workflow::{can_transition, check_transition};
