//! Infrastructure layer of the placement portal.
//!
//! Adapters for the collaborator traits defined in `placement-core`: the
//! hosted REST gateway, an in-memory store, the session holder, and the
//! configuration file service.

pub mod config_service;
pub mod memory_store;
pub mod paths;
pub mod rest;
pub mod session_store;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::memory_store::InMemoryRecordStore;
pub use crate::paths::PortalPaths;
pub use crate::rest::{RestClient, RestRecordGateway};
pub use crate::session_store::SessionStore;
