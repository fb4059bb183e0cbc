//! # vigil-token
//!
//! Structure-only JWT payload inspection for the Vigil session layer.
//!
//! This crate decodes token payloads to drive client-side UI state. It
//! performs **no signature verification**: the backend remains the sole
//! authority on whether a token is actually valid. Nothing here may be
//! used for an authorization decision.
//!
//! ## Modules
//!
//! - `claims` — decoded payload wrapper with numeric claim accessors
//! - `decoder` — token-string to payload decoding
//! - `expiry` — expiry instant derivation and expiry checks

pub mod claims;
pub mod decoder;
pub mod expiry;

pub use claims::Claims;
pub use expiry::{is_expired, is_expired_at, FALLBACK_LIFETIME_SECS};
