//! File-backed persistence helpers.

pub mod atomic_toml;

pub use atomic_toml::AtomicTomlFile;
