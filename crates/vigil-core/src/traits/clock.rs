//! Clock abstraction so expiry logic can be tested against fixed times.

use chrono::Utc;

/// Source of the current time in epoch seconds.
pub trait Clock: Send + Sync + std::fmt::Debug + 'static {
    /// Current time as seconds since the Unix epoch.
    fn now_epoch_seconds(&self) -> i64;
}

/// Wall-clock implementation backed by `chrono`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_seconds(&self) -> i64 {
        Utc::now().timestamp()
    }
}
