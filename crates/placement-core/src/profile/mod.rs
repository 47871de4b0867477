//! Profile domain module.
//!
//! Student and company profiles edited through the role dashboards.

mod model;
pub mod repository;

pub use model::{CompanyProfile, StudentProfile};
pub use repository::ProfileRepository;
