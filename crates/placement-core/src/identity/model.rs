//! Session domain model.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::error::{PortalError, Result};

/// A portal role. Determines route access and which record mutations the
/// data service permits.
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
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Student,
    Admin,
    Company,
}

impl Role {
    /// All roles, in declaration order.
    pub const ALL: [Role; 3] = [Role::Student, Role::Admin, Role::Company];

    /// Parses a role claim, rejecting anything outside the closed set.
    pub fn parse(value: &str) -> Result<Self> {
        value
            .trim()
            .parse()
            .map_err(|_| PortalError::validation(format!("Unknown role: '{}'", value)))
    }

    /// Returns the wire name of the role (`"student"`, `"admin"`, `"company"`).
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Whether this role may create job applications.
    ///
    /// Mirrors the data service policy for UX; the service is the enforcer.
    pub fn can_create_application(&self) -> bool {
        matches!(self, Role::Student)
    }

    /// Whether this role may move an application through the status workflow.
    pub fn can_update_application_status(&self) -> bool {
        matches!(self, Role::Admin | Role::Company)
    }

    /// Whether this role may create and edit job postings.
    pub fn can_manage_postings(&self) -> bool {
        matches!(self, Role::Admin | Role::Company)
    }
}

/// An authenticated identity plus its role claim.
///
/// The role never changes for the lifetime of a session; only the display
/// attributes may be refreshed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub role: Role,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_code: Option<String>,
}

impl Session {
    pub fn new(user_id: impl Into<String>, role: Role, display_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            display_name: display_name.into(),
            company_code: None,
        }
    }

    /// Sets the company code carried by company sessions.
    pub fn with_company_code(mut self, company_code: impl Into<String>) -> Self {
        self.company_code = Some(company_code.into());
        self
    }
}

/// Resolution state of the current session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "session")]
pub enum SessionState {
    /// The auth collaborator has not answered yet.
    #[default]
    Loading,
    /// Resolved with no session.
    Unauthenticated,
    /// Resolved with a session.
    Authenticated(Session),
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.session().map(|session| session.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("student").unwrap(), Role::Student);
        assert_eq!(Role::parse(" admin ").unwrap(), Role::Admin);
        assert_eq!(Role::parse("company").unwrap(), Role::Company);
        assert!(Role::parse("recruiter").is_err());
        assert!(Role::parse("").is_err());
    }

    #[test]
    fn test_role_wire_names() {
        for role in Role::iter() {
            assert_eq!(Role::parse(role.as_str()).unwrap(), role);
            assert_eq!(role.to_string(), role.as_str());
        }
        assert_eq!(serde_json::to_string(&Role::Company).unwrap(), "\"company\"");
    }

    #[test]
    fn test_role_permissions() {
        assert!(Role::Student.can_create_application());
        assert!(!Role::Student.can_update_application_status());
        assert!(!Role::Admin.can_create_application());
        assert!(Role::Admin.can_update_application_status());
        assert!(Role::Company.can_update_application_status());
        assert!(!Role::Student.can_manage_postings());
    }

    #[test]
    fn test_session_state_accessors() {
        let state = SessionState::default();
        assert!(state.is_loading());
        assert!(state.session().is_none());

        let session = Session::new("u-1", Role::Company, "Acme").with_company_code("ACME01");
        let state = SessionState::Authenticated(session);
        assert!(state.is_authenticated());
        assert_eq!(state.role(), Some(Role::Company));
        assert_eq!(
            state.session().and_then(|s| s.company_code.as_deref()),
            Some("ACME01")
        );
    }
}
