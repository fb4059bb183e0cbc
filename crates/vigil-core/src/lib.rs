//! # vigil-core
//!
//! Shared foundation for the Vigil session-lifecycle workspace.
//!
//! ## Modules
//!
//! - `error` — unified `AppError` type used across all crates
//! - `config` — TOML/env configuration schemas
//! - `events` — session domain events and the broadcast bus
//! - `traits` — pluggable storage and clock abstractions

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
