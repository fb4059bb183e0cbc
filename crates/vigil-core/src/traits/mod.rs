//! Pluggable abstractions shared across the workspace.

pub mod clock;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use store::KeyValueStore;
