//! Auth collaborator interface.

use async_trait::async_trait;

use crate::error::Result;

use super::model::{Session, SessionState};

/// Read-only view of the hosted auth service.
///
/// Consumers only read these signals. The sign-in flow that creates a
/// session lives in the implementation, not behind this trait.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Returns the current session, if one is resolved.
    async fn current_session(&self) -> Option<Session>;

    /// Returns true while the session fetch is still in flight.
    async fn is_loading(&self) -> bool;

    /// Returns the full resolution state.
    async fn state(&self) -> SessionState;

    /// Ends the current session.
    async fn logout(&self) -> Result<()>;
}
