//! Access control module.
//!
//! - `routes`: configurable destination paths and the route-to-role table
//! - `guard`: the pure render/redirect decision for protected views

mod guard;
mod routes;

pub use guard::{AccessGuard, GuardAction, decide, decide_for_role};
pub use routes::{RoutePaths, RouteRule, RouteTable};
