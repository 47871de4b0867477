//! Access guard for protected views.
//!
//! The decision is a pure function of the resolved session state and the
//! role the view requires. It never suspends and never performs navigation
//! itself; callers act on the returned [`GuardAction`].

use serde::{Deserialize, Serialize};

use crate::identity::{Role, SessionState};

use super::routes::RoutePaths;

/// What a protected view should do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "path", rename_all = "snake_case")]
pub enum GuardAction {
    /// Session still loading: show a neutral waiting indicator.
    Wait,
    /// Render the protected view.
    Render,
    /// Navigate away to the given path.
    RedirectTo(String),
}

impl GuardAction {
    pub fn is_redirect(&self) -> bool {
        matches!(self, GuardAction::RedirectTo(_))
    }

    pub fn redirect_path(&self) -> Option<&str> {
        match self {
            GuardAction::RedirectTo(path) => Some(path),
            _ => None,
        }
    }
}

/// Decides between waiting, rendering, and redirecting.
pub fn decide(paths: &RoutePaths, state: &SessionState, required: Role) -> GuardAction {
    match state {
        SessionState::Loading => GuardAction::Wait,
        SessionState::Unauthenticated => {
            GuardAction::RedirectTo(paths.login_for(required).to_string())
        }
        SessionState::Authenticated(session) => decide_for_role(paths, session.role, required),
    }
}

/// Decision for an authenticated session of `session_role`.
pub fn decide_for_role(paths: &RoutePaths, session_role: Role, required: Role) -> GuardAction {
    let destination = match (session_role, required) {
        (Role::Student, Role::Student)
        | (Role::Admin, Role::Admin)
        | (Role::Company, Role::Company) => return GuardAction::Render,
        (Role::Student, Role::Admin) => &paths.student_dashboard,
        (Role::Admin, Role::Student) => &paths.admin_dashboard,
        (Role::Company, Role::Student) | (Role::Company, Role::Admin) => &paths.company_dashboard,
        (Role::Student, Role::Company) | (Role::Admin, Role::Company) => &paths.company_login,
    };

    GuardAction::RedirectTo(destination.clone())
}

/// Guard bound to a set of destination paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessGuard {
    paths: RoutePaths,
}

impl AccessGuard {
    pub fn new(paths: RoutePaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &RoutePaths {
        &self.paths
    }

    pub fn decide(&self, state: &SessionState, required: Role) -> GuardAction {
        decide(&self.paths, state, required)
    }
}
