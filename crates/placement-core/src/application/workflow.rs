//! Status transition rules.
//!
//! These mirror the data service policy so views can disable controls up
//! front; the service remains the enforcer.

use crate::error::{PortalError, Result};

use super::status::ApplicationStatus;

/// Whether a status change from `from` to `to` should be offered.
pub fn can_transition(from: ApplicationStatus, to: ApplicationStatus) -> bool {
    !from.is_final() && from != to
}

/// Like [`can_transition`], but explains the refusal.
pub fn check_transition(from: ApplicationStatus, to: ApplicationStatus) -> Result<()> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(PortalError::InvalidTransition {
            from: from.as_str().to_string(),
            to: to.as_str().to_string(),
        })
    }
}
