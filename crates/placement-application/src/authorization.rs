//! Session checks shared by the use cases.

use placement_core::identity::{AuthService, Role, Session, SessionState};
use placement_core::{PortalError, Result};

/// Returns the current session if its role is one of `allowed`.
///
/// Fails with an access-taxonomy error (`SessionUnresolved`,
/// `Unauthenticated`, `RoleMismatch`) that navigation resolves by redirecting.
pub async fn require_any(auth: &dyn AuthService, allowed: &[Role]) -> Result<Session> {
    let Some(&primary) = allowed.first() else {
        return Err(PortalError::internal("require_any called without roles"));
    };

    match auth.state().await {
        SessionState::Loading => Err(PortalError::SessionUnresolved),
        SessionState::Unauthenticated => {
            Err(PortalError::Unauthenticated { required: primary })
        }
        SessionState::Authenticated(session) if allowed.contains(&session.role) => Ok(session),
        SessionState::Authenticated(session) => Err(PortalError::RoleMismatch {
            actual: session.role,
            required: primary,
        }),
    }
}
