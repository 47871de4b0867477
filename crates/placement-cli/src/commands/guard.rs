use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use placement_application::NavigationService;
use placement_core::access::{AccessGuard, GuardAction, RoutePaths};
use placement_core::identity::{Role, Session, SessionState};
use placement_infrastructure::SessionStore;

/// Prints the guard decision for a view requiring `required`.
pub fn decide(
    paths: &RoutePaths,
    required: &str,
    role: Option<&str>,
    loading: bool,
    json: bool,
) -> Result<()> {
    let required = Role::parse(required)?;
    let state = session_state(role, loading)?;
    let action = AccessGuard::new(paths.clone()).decide(&state, required);
    print_action(&action, json)
}

/// Prints what a request for `path` resolves to.
pub async fn route(
    paths: &RoutePaths,
    path: &str,
    role: Option<&str>,
    loading: bool,
    json: bool,
) -> Result<()> {
    let state = session_state(role, loading)?;
    let navigation =
        NavigationService::new(Arc::new(SessionStore::with_state(state)), paths.clone());

    if !json {
        match navigation.routes().required_role(path) {
            Some(required) => println!("{} requires {}", path.bold(), required.as_str().bold()),
            None => println!("{} is public", path.bold()),
        }
    }
    let action = navigation.check(path).await;
    print_action(&action, json)
}

fn session_state(role: Option<&str>, loading: bool) -> Result<SessionState> {
    if loading {
        return Ok(SessionState::Loading);
    }
    let Some(role) = role else {
        return Ok(SessionState::Unauthenticated);
    };

    let role = Role::parse(role)?;
    let mut session = Session::new("cli-user", role, "CLI user");
    if role == Role::Company {
        session = session.with_company_code("CLI");
    }
    Ok(SessionState::Authenticated(session))
}

fn print_action(action: &GuardAction, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(action)?);
        return Ok(());
    }

    match action {
        GuardAction::Wait => println!("{}", "wait".yellow()),
        GuardAction::Render => println!("{}", "render".green()),
        GuardAction::RedirectTo(path) => println!("{} {}", "redirect".cyan(), path),
    }
    Ok(())
}
