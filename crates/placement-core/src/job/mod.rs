//! Job posting domain module.
//!
//! Postings carry their eligibility thresholds as data only; matching
//! students against them is not part of this crate.

mod model;
pub mod repository;

pub use model::{EligibilityCriteria, JobPosting, JobStatus};
pub use repository::JobRepository;
