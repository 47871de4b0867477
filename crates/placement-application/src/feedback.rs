//! User feedback for use case outcomes.

use placement_core::application::{ApplicationStatus, BadgeClass};
use placement_core::notification::Notification;
use placement_core::{PortalError, Result};
use serde::Serialize;

/// Turns a use case result into the notification a view should show.
///
/// Access errors yield `None`: navigation handles them by redirecting.
pub fn notification_for<T>(result: &Result<T>, success: impl Into<String>) -> Option<Notification> {
    match result {
        Ok(_) => Some(Notification::success(success)),
        Err(err) => {
            if err.is_upstream() {
                tracing::warn!("[Feedback] Upstream failure surfaced to user: {}", err);
            }
            PortalError::into_notification(err.clone())
        }
    }
}

/// Display derivation of a status, as rendered in badges and filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusView {
    pub status: ApplicationStatus,
    pub label: String,
    pub badge: BadgeClass,
    pub is_final: bool,
}

impl StatusView {
    pub fn of(status: ApplicationStatus) -> Self {
        Self {
            status,
            label: status.display_label(),
            badge: status.badge_class(),
            is_final: status.is_final(),
        }
    }

    /// One view per status, in canonical order.
    pub fn all() -> Vec<Self> {
        placement_core::application::all_statuses()
            .iter()
            .copied()
            .map(Self::of)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use placement_core::notification::NotificationLevel;

    #[test]
    fn test_success_notification() {
        let result: Result<()> = Ok(());
        let notification = notification_for(&result, "Application submitted").unwrap();
        assert_eq!(notification.level, NotificationLevel::Success);
    }

    #[test]
    fn test_upstream_failure_notification() {
        let result: Result<()> = Err(PortalError::upstream("storage", "timed out"));
        let notification = notification_for(&result, "Uploaded").unwrap();
        assert!(notification.is_failure());
    }

    #[test]
    fn test_redirect_errors_are_silent() {
        let result: Result<()> = Err(PortalError::Unauthenticated {
            required: placement_core::identity::Role::Student,
        });
        assert!(notification_for(&result, "Uploaded").is_none());
    }

    #[test]
    fn test_status_views() {
        let views = StatusView::all();
        assert_eq!(views.len(), 8);
        assert_eq!(views[1].label, "Under review");
        assert_eq!(views[6].label, "PPO");
        assert_eq!(views[6].badge, BadgeClass::Highlight);
        assert!(views[6].is_final);
        assert!(!views[0].is_final);
    }
}
