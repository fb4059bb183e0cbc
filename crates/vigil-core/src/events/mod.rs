//! Domain events published over the in-process event bus.

pub mod session;

pub use session::{SessionEvent, SessionEvents};
