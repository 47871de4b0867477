//! Identity domain module.
//!
//! This module contains the session model, the identity context that owns
//! the current session state, and the auth collaborator interface.
//!
//! # Module Structure
//!
//! - `model`: `Role`, `Session`, `SessionState`
//! - `context`: `IdentityContext`, the single owner of session state
//! - `service`: `AuthService` trait for the hosted auth collaborator
//!
//! # Usage
//!
//! ```ignore
//! use placement_core::identity::{IdentityContext, Role, Session};
//! ```

mod context;
mod model;
pub mod service;

// Re-export public API
pub use context::IdentityContext;
pub use model::{Role, Session, SessionState};
pub use service::AuthService;
