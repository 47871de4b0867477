//! Navigation use case: decides what a path request should do.

use std::sync::Arc;

use placement_core::access::{AccessGuard, GuardAction, RoutePaths, RouteTable, decide_for_role};
use placement_core::identity::{AuthService, SessionState};
use placement_core::{PortalError, Result};

/// Resolves a request path to render, wait, or redirect.
pub struct NavigationService {
    auth: Arc<dyn AuthService>,
    guard: AccessGuard,
    routes: RouteTable,
}

impl NavigationService {
    pub fn new(auth: Arc<dyn AuthService>, paths: RoutePaths) -> Self {
        let routes = RouteTable::from_paths(&paths);
        Self {
            auth,
            guard: AccessGuard::new(paths),
            routes,
        }
    }

    /// Replaces the default route table.
    pub fn with_routes(mut self, routes: RouteTable) -> Self {
        self.routes = routes;
        self
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Decides what to do with a request for `path`.
    ///
    /// Public paths always render. Protected paths go through the guard.
    pub async fn check(&self, path: &str) -> GuardAction {
        let Some(required) = self.routes.required_role(path) else {
            return GuardAction::Render;
        };

        let state = self.auth.state().await;
        let action = self.guard.decide(&state, required);
        match &action {
            GuardAction::Wait => {
                tracing::debug!("[Navigation] {} waiting for session", path);
            }
            GuardAction::Render => {
                tracing::debug!("[Navigation] {} rendered for {}", path, required);
            }
            GuardAction::RedirectTo(target) => {
                tracing::info!(
                    "[Navigation] {} requires {}, redirecting to {}",
                    path,
                    required,
                    target
                );
            }
        }
        action
    }

    /// Where to send the visitor after sign-in or from `/`.
    pub async fn landing_path(&self) -> GuardAction {
        let paths = self.guard.paths();
        match self.auth.state().await {
            SessionState::Loading => GuardAction::Wait,
            SessionState::Unauthenticated => GuardAction::RedirectTo(paths.login.clone()),
            SessionState::Authenticated(session) => {
                GuardAction::RedirectTo(paths.dashboard_for(session.role).to_string())
            }
        }
    }

    /// Maps an access-taxonomy error from a use case to a navigation action.
    ///
    /// Returns `None` for errors that should be shown as notifications.
    pub fn action_for_error(&self, err: &PortalError) -> Option<GuardAction> {
        let paths = self.guard.paths();
        match err {
            PortalError::SessionUnresolved => Some(GuardAction::Wait),
            PortalError::Unauthenticated { required } => {
                Some(GuardAction::RedirectTo(paths.login_for(*required).to_string()))
            }
            PortalError::RoleMismatch { actual, required } => {
                Some(decide_for_role(paths, *actual, *required))
            }
            _ => None,
        }
    }

    /// Ends the session and returns where to go next.
    pub async fn logout(&self) -> Result<GuardAction> {
        self.auth.logout().await?;
        Ok(GuardAction::RedirectTo(self.guard.paths().login.clone()))
    }
}
