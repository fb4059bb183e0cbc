//! # vigil-session
//!
//! Session persistence and lifecycle management for the Vigil client
//! shell.
//!
//! ## Modules
//!
//! - `keys` — fixed storage keys shared with the login flow
//! - `user` — the persisted user record
//! - `store` — pluggable key-value backends (in-memory, file)
//! - `vault` — the session vault: save, clear, authenticate, logout
//! - `guard` — route gating against the public-route allow-list
//! - `watchdog` — scheduled auto-logout at token expiry

pub mod guard;
pub mod keys;
pub mod store;
pub mod user;
pub mod vault;
pub mod watchdog;

pub use guard::{RouteDecision, RouteGuard};
pub use store::{FileStore, MemoryStore};
pub use user::{RoleRecord, UserRecord};
pub use vault::SessionVault;
pub use watchdog::{LogoutTimer, LogoutWatchdog};
