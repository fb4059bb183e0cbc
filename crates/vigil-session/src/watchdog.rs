//! Scheduled auto-logout at token expiry.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use vigil_core::events::SessionEvent;
use vigil_token::Claims;

use crate::vault::SessionVault;

/// Reason string recorded when the watchdog ends a session.
const EXPIRY_REASON: &str = "session expired";

/// Arms a one-shot logout timer for the current session.
///
/// Callers must cancel the previously returned [`LogoutTimer`] before
/// scheduling again (on navigation, typically); the watchdog does not
/// track outstanding timers itself.
#[derive(Clone)]
pub struct LogoutWatchdog {
    vault: Arc<SessionVault>,
}

impl std::fmt::Debug for LogoutWatchdog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogoutWatchdog").finish()
    }
}

impl LogoutWatchdog {
    /// Create a watchdog over the given vault.
    pub fn new(vault: Arc<SessionVault>) -> Self {
        Self { vault }
    }

    /// Schedule auto-logout for the stored token.
    ///
    /// Returns `None` without arming a timer when there is no token or
    /// no derivable expiry (such sessions never expire client-side).
    /// A token already past its expiry is logged out immediately, also
    /// returning `None`.
    pub async fn schedule(&self) -> Option<LogoutTimer> {
        let token = self.vault.token().await?;

        let Some(expiry) = Claims::decode(&token).and_then(|c| c.expiry_epoch_seconds()) else {
            debug!("Token has no derivable expiry; no timer armed");
            return None;
        };

        let now = self.vault.clock().now_epoch_seconds();
        if now >= expiry {
            info!(expiry, now, "Stored token already expired; logging out");
            self.expire_now().await;
            return None;
        }

        let delay = Duration::from_secs((expiry - now) as u64);
        debug!(delay_secs = delay.as_secs(), "Arming auto-logout timer");

        let watchdog = self.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            info!("Auto-logout timer fired");
            watchdog.expire_now().await;
        });

        Some(LogoutTimer { handle })
    }

    /// Expire the current session: publish the expiry event, then clear
    /// and redirect.
    async fn expire_now(&self) {
        let user_id = self.vault.user_id().await;
        self.vault
            .events()
            .publish(SessionEvent::Expired { user_id });
        self.vault.logout(EXPIRY_REASON).await;
    }
}

/// Handle for a pending auto-logout timer.
///
/// Dropping the handle does **not** cancel the timer; cancellation is
/// explicit so a handle can be stashed and forgotten without
/// disarming the logout.
#[derive(Debug)]
pub struct LogoutTimer {
    handle: JoinHandle<()>,
}

impl LogoutTimer {
    /// Cancel the pending logout.
    pub fn cancel(self) {
        self.handle.abort();
    }

    /// Whether the timer has already fired (or been cancelled).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    use vigil_core::config::session::SessionConfig;
    use vigil_core::events::SessionEvents;
    use vigil_core::traits::Clock;

    use crate::store::MemoryStore;
    use crate::user::UserRecord;

    #[derive(Debug)]
    struct FixedClock(i64);

    impl Clock for FixedClock {
        fn now_epoch_seconds(&self) -> i64 {
            self.0
        }
    }

    fn make_token(payload: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD
            .encode(serde_json::to_vec(&serde_json::json!({"alg": "HS256"})).unwrap());
        let body = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&payload).unwrap());
        format!("{header}.{body}.sig")
    }

    fn make_user(id: &str) -> UserRecord {
        UserRecord {
            id: id.to_string(),
            name: None,
            email: None,
            role: None,
        }
    }

    async fn make_vault(now: i64) -> Arc<SessionVault> {
        Arc::new(SessionVault::new(
            Arc::new(MemoryStore::new()),
            Arc::new(FixedClock(now)),
            SessionEvents::new(),
            &SessionConfig::default(),
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn timer_fires_at_expiry_and_clears_session() {
        let vault = make_vault(1000).await;
        let token = make_token(serde_json::json!({"exp": 1001}));
        vault.save(&make_user("u-1"), &token).await;
        let mut rx = vault.events().subscribe();

        let watchdog = LogoutWatchdog::new(vault.clone());
        let timer = watchdog.schedule().await.expect("timer should be armed");
        assert!(!timer.is_finished());

        // One simulated second later the timer has fired.
        tokio::time::sleep(Duration::from_secs(2)).await;

        assert!(timer.is_finished());
        assert!(!vault.is_authenticated().await);
        match rx.recv().await.unwrap() {
            SessionEvent::Expired { user_id } => {
                assert_eq!(user_id, Some("u-1".to_string()));
            }
            other => panic!("unexpected event: {other:?}"),
        }
        match rx.recv().await.unwrap() {
            SessionEvent::LoggedOut { reason, .. } => assert_eq!(reason, EXPIRY_REASON),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timer_never_fires() {
        let vault = make_vault(1000).await;
        let token = make_token(serde_json::json!({"exp": 1005}));
        vault.save(&make_user("u-1"), &token).await;

        let watchdog = LogoutWatchdog::new(vault.clone());
        let timer = watchdog.schedule().await.unwrap();
        timer.cancel();

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(vault.is_authenticated().await);
    }

    #[tokio::test(start_paused = true)]
    async fn already_expired_token_logs_out_immediately() {
        let vault = make_vault(5000).await;
        let token = make_token(serde_json::json!({"exp": 2000}));
        vault.save(&make_user("u-1"), &token).await;

        let watchdog = LogoutWatchdog::new(vault.clone());
        let timer = watchdog.schedule().await;

        assert!(timer.is_none());
        assert!(!vault.is_authenticated().await);
        assert_eq!(vault.token().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn no_token_means_no_timer() {
        let vault = make_vault(1000).await;
        let watchdog = LogoutWatchdog::new(vault.clone());
        assert!(watchdog.schedule().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn token_without_expiry_means_no_timer() {
        let vault = make_vault(1000).await;
        let token = make_token(serde_json::json!({"sub": "u-1"}));
        vault.save(&make_user("u-1"), &token).await;

        let watchdog = LogoutWatchdog::new(vault.clone());
        assert!(watchdog.schedule().await.is_none());
        // The session itself is untouched.
        assert!(vault.is_authenticated().await);
    }

    #[tokio::test(start_paused = true)]
    async fn rescheduling_after_cancel_arms_a_fresh_timer() {
        let vault = make_vault(1000).await;
        let token = make_token(serde_json::json!({"exp": 1003}));
        vault.save(&make_user("u-1"), &token).await;

        let watchdog = LogoutWatchdog::new(vault.clone());
        let first = watchdog.schedule().await.unwrap();
        first.cancel();
        let second = watchdog.schedule().await.unwrap();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(second.is_finished());
        assert!(!vault.is_authenticated().await);
    }
}
