//! Route destinations and the path-to-role table.

use serde::{Deserialize, Serialize};

use crate::identity::Role;

/// Destination paths used by redirects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutePaths {
    pub login: String,
    pub company_login: String,
    pub student_dashboard: String,
    pub admin_dashboard: String,
    pub company_dashboard: String,
}

impl Default for RoutePaths {
    fn default() -> Self {
        Self {
            login: "/login".to_string(),
            company_login: "/company/login".to_string(),
            student_dashboard: "/student/dashboard".to_string(),
            admin_dashboard: "/admin/dashboard".to_string(),
            company_dashboard: "/company/dashboard".to_string(),
        }
    }
}

impl RoutePaths {
    /// Dashboard a session of `role` lands on.
    pub fn dashboard_for(&self, role: Role) -> &str {
        match role {
            Role::Student => &self.student_dashboard,
            Role::Admin => &self.admin_dashboard,
            Role::Company => &self.company_dashboard,
        }
    }

    /// Entry point for an unauthenticated visitor to a view requiring `role`.
    pub fn login_for(&self, role: Role) -> &str {
        match role {
            Role::Company => &self.company_login,
            Role::Student | Role::Admin => &self.login,
        }
    }
}

/// One entry of the route table. `required_role: None` marks a public path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRule {
    pub prefix: String,
    pub required_role: Option<Role>,
}

impl RouteRule {
    pub fn protected(prefix: impl Into<String>, role: Role) -> Self {
        Self {
            prefix: prefix.into(),
            required_role: Some(role),
        }
    }

    pub fn public(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            required_role: None,
        }
    }

    /// Matches whole path segments only, so `/admin` does not cover `/administrator`.
    fn matches(&self, path: &str) -> bool {
        let prefix = self.prefix.trim_end_matches('/');
        if prefix.is_empty() {
            return path.starts_with('/');
        }
        match path.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
            None => false,
        }
    }
}

/// Maps request paths to the role their view requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
}

impl RouteTable {
    pub fn new(rules: Vec<RouteRule>) -> Self {
        Self { rules }
    }

    /// Builds the standard portal table: role areas are protected, the login
    /// pages are public.
    pub fn from_paths(paths: &RoutePaths) -> Self {
        Self::new(vec![
            RouteRule::public("/"),
            RouteRule::public(paths.login.clone()),
            RouteRule::public(paths.company_login.clone()),
            RouteRule::protected("/student", Role::Student),
            RouteRule::protected("/admin", Role::Admin),
            RouteRule::protected("/company", Role::Company),
        ])
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    /// Returns the role required for `path`, or `None` for public paths.
    ///
    /// The longest matching prefix wins. Unknown paths are public.
    pub fn required_role(&self, path: &str) -> Option<Role> {
        self.rules
            .iter()
            .filter(|rule| rule.matches(path))
            .max_by_key(|rule| rule.prefix.trim_end_matches('/').len())
            .and_then(|rule| rule.required_role)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::from_paths(&RoutePaths::default())
    }
}
