//! Error types for the placement portal.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identity::Role;
use crate::notification::Notification;

/// A shared error type for the entire portal.
///
/// The first four variants form the access taxonomy: they are resolved by
/// navigation (waiting or redirecting) and are never shown to the user.
/// Everything else surfaces as a transient [`Notification`].
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PortalError {
    /// The session has not been resolved yet.
    #[error("Session is still loading")]
    SessionUnresolved,

    /// No authenticated session exists. `required` picks the login page.
    #[error("Not authenticated: {required} sign-in required")]
    Unauthenticated { required: Role },

    /// The session role does not match the role a view requires.
    #[error("Role mismatch: session is {actual}, view requires {required}")]
    RoleMismatch { actual: Role, required: Role },

    /// Network or hosted-service failure.
    #[error("Upstream failure from {service}: {message}")]
    Upstream { service: String, message: String },

    /// The data service's access policy rejected the operation.
    #[error("Permission denied: {0}")]
    PolicyDenied(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Input failed validation (unknown status, duplicate application, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// A status change was requested that the workflow does not allow.
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PortalError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an Upstream error for the named collaborator
    pub fn upstream(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Creates a PolicyDenied error
    pub fn policy_denied(message: impl Into<String>) -> Self {
        Self::PolicyDenied(message.into())
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an upstream (network/service) failure
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }

    /// Check if the access policy rejected the operation
    pub fn is_policy_denied(&self) -> bool {
        matches!(self, Self::PolicyDenied(_))
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns true for errors that navigation handles by waiting or
    /// redirecting. These never become user-visible notifications.
    pub fn is_redirect_resolved(&self) -> bool {
        matches!(
            self,
            Self::SessionUnresolved | Self::Unauthenticated { .. } | Self::RoleMismatch { .. }
        )
    }

    /// Converts the error into a transient notification for the calling view.
    ///
    /// Returns `None` for errors resolved by navigation.
    pub fn into_notification(self) -> Option<Notification> {
        if self.is_redirect_resolved() {
            return None;
        }
        let notification = match &self {
            Self::Validation(message) => Notification::warning(message.clone()),
            Self::InvalidTransition { .. } => Notification::warning(self.to_string()),
            _ => Notification::error(self.to_string()),
        };
        Some(notification)
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for PortalError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for PortalError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for PortalError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, PortalError>`.
pub type Result<T> = std::result::Result<T, PortalError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::NotificationLevel;

    #[test]
    fn test_access_errors_are_not_notified() {
        assert!(PortalError::SessionUnresolved.into_notification().is_none());
        let unauthenticated = PortalError::Unauthenticated {
            required: Role::Company,
        };
        assert!(unauthenticated.into_notification().is_none());
        let mismatch = PortalError::RoleMismatch {
            actual: Role::Student,
            required: Role::Admin,
        };
        assert!(mismatch.is_redirect_resolved());
        assert!(mismatch.into_notification().is_none());
    }

    #[test]
    fn test_upstream_becomes_error_notification() {
        let err = PortalError::upstream("storage", "connection reset");
        assert!(err.is_upstream());

        let notification = err.into_notification().unwrap();
        assert_eq!(notification.level, NotificationLevel::Error);
        assert!(notification.message.contains("connection reset"));
    }

    #[test]
    fn test_validation_becomes_warning() {
        let notification = PortalError::validation("already applied")
            .into_notification()
            .unwrap();
        assert_eq!(notification.level, NotificationLevel::Warning);
        assert_eq!(notification.message, "already applied");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: PortalError = io.into();
        assert!(matches!(err, PortalError::Io { .. }));
    }
}
