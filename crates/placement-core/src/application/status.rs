//! Application status vocabulary.
//!
//! Labels, badges, and finality are exhaustive matches over
//! [`ApplicationStatus`], so adding a status fails to compile until each
//! mapping handles it. Wire names come from the strum derives.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::error::{PortalError, Result};

/// Where a job application stands.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ApplicationStatus {
    Applied,
    UnderReview,
    Shortlisted,
    Rejected,
    Selected,
    Internship,
    Ppo,
    Placement,
}

const ALL_STATUSES: [ApplicationStatus; 8] = [
    ApplicationStatus::Applied,
    ApplicationStatus::UnderReview,
    ApplicationStatus::Shortlisted,
    ApplicationStatus::Rejected,
    ApplicationStatus::Selected,
    ApplicationStatus::Internship,
    ApplicationStatus::Ppo,
    ApplicationStatus::Placement,
];

/// All statuses in canonical order, for filter and selection controls.
pub fn all_statuses() -> &'static [ApplicationStatus] {
    &ALL_STATUSES
}

/// Display style category for a status badge.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BadgeClass {
    Positive,
    Negative,
    Informational,
    Highlight,
    Neutral,
}

impl BadgeClass {
    /// The style token used by views.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

impl ApplicationStatus {
    /// Parses a wire value, rejecting anything outside the closed set.
    pub fn parse(value: &str) -> Result<Self> {
        value.trim().parse().map_err(|_| {
            PortalError::validation(format!("Unknown application status: '{}'", value))
        })
    }

    /// The wire value (`"under_review"`, `"ppo"`, ...).
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    pub fn badge_class(&self) -> BadgeClass {
        match self {
            ApplicationStatus::Selected | ApplicationStatus::Placement => BadgeClass::Positive,
            ApplicationStatus::Rejected => BadgeClass::Negative,
            ApplicationStatus::Shortlisted | ApplicationStatus::UnderReview => {
                BadgeClass::Informational
            }
            ApplicationStatus::Internship | ApplicationStatus::Ppo => BadgeClass::Highlight,
            ApplicationStatus::Applied => BadgeClass::Neutral,
        }
    }

    /// Human-readable label. `ppo` keeps its acronym casing.
    pub fn display_label(&self) -> String {
        match self {
            ApplicationStatus::Ppo => "PPO".to_string(),
            ApplicationStatus::Applied
            | ApplicationStatus::UnderReview
            | ApplicationStatus::Shortlisted
            | ApplicationStatus::Rejected
            | ApplicationStatus::Selected
            | ApplicationStatus::Internship
            | ApplicationStatus::Placement => humanize(self.as_str()),
        }
    }

    /// True once the application has reached an end state.
    pub fn is_final(&self) -> bool {
        match self {
            ApplicationStatus::Selected
            | ApplicationStatus::Internship
            | ApplicationStatus::Ppo
            | ApplicationStatus::Placement => true,
            ApplicationStatus::Applied
            | ApplicationStatus::UnderReview
            | ApplicationStatus::Shortlisted
            | ApplicationStatus::Rejected => false,
        }
    }
}

/// Capitalizes the first letter and turns separators into spaces.
fn humanize(raw: &str) -> String {
    let spaced = raw.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
