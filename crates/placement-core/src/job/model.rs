//! JobPosting domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoStaticStr};

/// Publication state of a posting.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum JobStatus {
    Active,
    Closed,
    #[default]
    Draft,
}

impl JobStatus {
    /// The wire value used in record filters.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Eligibility thresholds published with a posting.
///
/// Marks are percentages; CGPA is on a 10-point scale. Empty lists mean no
/// restriction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_tenth_marks: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_twelfth_marks: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_diploma_marks: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_graduation_cgpa: Option<f32>,
    pub allowed_courses: Vec<String>,
    pub allowed_passing_years: Vec<u16>,
}

/// A job or internship opening published by a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub company_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Compensation as published, e.g. "12 LPA".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    #[serde(default)]
    pub eligibility: EligibilityCriteria,
    pub deadline: DateTime<Utc>,
    #[serde(default)]
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
}

impl JobPosting {
    /// True while the posting is active and its deadline has not passed.
    pub fn accepts_applications(&self, now: DateTime<Utc>) -> bool {
        self.status == JobStatus::Active && now <= self.deadline
    }
}
