//! Identity context: the single owner of the current session state.

use crate::error::{PortalError, Result};

use super::model::{Role, Session, SessionState};

/// Holds the current session state and its lifecycle.
///
/// Starts in [`SessionState::Loading`]. The authentication flow moves it to a
/// resolved state; every other consumer only reads it. Tests construct
/// arbitrary states with [`IdentityContext::with_state`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityContext {
    state: SessionState,
}

impl IdentityContext {
    /// Creates a context that has not resolved its session yet.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: SessionState) -> Self {
        Self { state }
    }

    pub fn authenticated(session: Session) -> Self {
        Self::with_state(SessionState::Authenticated(session))
    }

    pub fn unauthenticated() -> Self {
        Self::with_state(SessionState::Unauthenticated)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    pub fn user(&self) -> Option<&Session> {
        self.state.session()
    }

    /// Records the outcome of the initial session fetch.
    pub fn resolve(&mut self, session: Option<Session>) {
        self.state = match session {
            Some(session) => {
                tracing::debug!(user_id = %session.user_id, role = %session.role, "Session resolved");
                SessionState::Authenticated(session)
            }
            None => {
                tracing::debug!("Session resolved without a user");
                SessionState::Unauthenticated
            }
        };
    }

    /// Replaces any current state with a freshly authenticated session.
    pub fn sign_in(&mut self, session: Session) {
        tracing::info!(user_id = %session.user_id, role = %session.role, "Signed in");
        self.state = SessionState::Authenticated(session);
    }

    /// Refreshes the display attributes of the current session.
    ///
    /// The user and role must be unchanged; a role change requires a new
    /// sign-in.
    pub fn refresh(&mut self, refreshed: Session) -> Result<()> {
        let current = match &self.state {
            SessionState::Loading => return Err(PortalError::SessionUnresolved),
            SessionState::Unauthenticated => {
                return Err(PortalError::Unauthenticated {
                    required: refreshed.role,
                });
            }
            SessionState::Authenticated(session) => session,
        };

        if current.user_id != refreshed.user_id {
            return Err(PortalError::validation(format!(
                "Refresh for user '{}' does not match session user '{}'",
                refreshed.user_id, current.user_id
            )));
        }
        if current.role != refreshed.role {
            return Err(PortalError::RoleMismatch {
                actual: refreshed.role,
                required: current.role,
            });
        }

        self.state = SessionState::Authenticated(refreshed);
        Ok(())
    }

    /// Destroys the current session.
    pub fn logout(&mut self) {
        if let Some(session) = self.user() {
            tracing::info!(user_id = %session.user_id, "Logged out");
        }
        self.state = SessionState::Unauthenticated;
    }

    /// Returns the session if it carries the required role.
    ///
    /// The error is one of the access taxonomy variants, so callers can hand
    /// it to navigation instead of showing it.
    pub fn require_role(&self, required: Role) -> Result<&Session> {
        match &self.state {
            SessionState::Loading => Err(PortalError::SessionUnresolved),
            SessionState::Unauthenticated => Err(PortalError::Unauthenticated { required }),
            SessionState::Authenticated(session) if session.role == required => Ok(session),
            SessionState::Authenticated(session) => Err(PortalError::RoleMismatch {
                actual: session.role,
                required,
            }),
        }
    }
}
