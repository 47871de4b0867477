//! Process-wide session holder.
//!
//! Owns the single [`IdentityContext`] and exposes it read-only through
//! [`AuthService`]. Only the sign-in flow (the methods on this type) writes.

use async_trait::async_trait;
use placement_core::identity::{AuthService, IdentityContext, Role, Session, SessionState};
use placement_core::{PortalError, Result};
use tokio::sync::RwLock;

/// Holds the current session behind an async lock.
#[derive(Default)]
pub struct SessionStore {
    context: RwLock<IdentityContext>,
}

impl SessionStore {
    /// Creates a store whose session has not resolved yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already in `state`.
    pub fn with_state(state: SessionState) -> Self {
        Self {
            context: RwLock::new(IdentityContext::with_state(state)),
        }
    }

    /// Records the result of the initial session fetch.
    pub async fn resolve(&self, session: Option<Session>) {
        self.context.write().await.resolve(session);
    }

    pub async fn sign_in(&self, session: Session) {
        self.context.write().await.sign_in(session);
    }

    /// Signs in from raw auth claims, rejecting unknown role claims.
    ///
    /// A rejected claim leaves the store unauthenticated rather than loading.
    pub async fn sign_in_with_claims(
        &self,
        user_id: &str,
        role_claim: &str,
        display_name: &str,
        company_code: Option<&str>,
    ) -> Result<Session> {
        let role = match Role::parse(role_claim) {
            Ok(role) => role,
            Err(err) => {
                tracing::warn!(user_id, role_claim, "Rejected session with unknown role claim");
                self.context.write().await.resolve(None);
                return Err(err);
            }
        };

        if role == Role::Company && company_code.is_none() {
            self.context.write().await.resolve(None);
            return Err(PortalError::validation("Company sessions require a company code"));
        }

        let mut session = Session::new(user_id, role, display_name);
        session.company_code = company_code.map(str::to_string);
        self.sign_in(session.clone()).await;
        Ok(session)
    }

    pub async fn refresh(&self, session: Session) -> Result<()> {
        self.context.write().await.refresh(session)
    }

    /// Returns a copy of the identity context for pure decisions.
    pub async fn snapshot(&self) -> IdentityContext {
        self.context.read().await.clone()
    }
}

#[async_trait]
impl AuthService for SessionStore {
    async fn current_session(&self) -> Option<Session> {
        self.context.read().await.user().cloned()
    }

    async fn is_loading(&self) -> bool {
        self.context.read().await.is_loading()
    }

    async fn state(&self) -> SessionState {
        self.context.read().await.state().clone()
    }

    async fn logout(&self) -> Result<()> {
        self.context.write().await.logout();
        Ok(())
    }
}
