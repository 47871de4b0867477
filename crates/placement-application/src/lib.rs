//! Application layer of the placement portal.
//!
//! Use cases that combine the session, the access guard, and the record and
//! storage collaborators:
//!
//! - [`NavigationService`]: render, wait, or redirect for a requested path
//! - [`ApplicationUseCase`]: applying to postings and moving applications
//!   through the status workflow
//! - [`DocumentUploadUseCase`]: resume and company logo uploads

pub mod application_usecase;
pub mod authorization;
pub mod feedback;
pub mod navigation;
pub mod upload_usecase;

pub use application_usecase::ApplicationUseCase;
pub use authorization::require_any;
pub use feedback::{StatusView, notification_for};
pub use navigation::NavigationService;
pub use upload_usecase::DocumentUploadUseCase;
