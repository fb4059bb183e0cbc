//! The session vault: one slot of authenticated state over a
//! pluggable store.
//!
//! Failure policy, kept deliberately asymmetric to match the external
//! login flow this layer serves:
//!
//! - **writes are best-effort** — a storage failure during `save` or
//!   `clear` is logged and swallowed, never propagated;
//! - **reads fail closed** — a storage failure or corrupt value reads
//!   as "no session", so the shell falls back to the login route.

use std::sync::Arc;

use tracing::{debug, info, warn};

use vigil_core::config::session::SessionConfig;
use vigil_core::events::{SessionEvent, SessionEvents};
use vigil_core::traits::{Clock, KeyValueStore};

use vigil_token::{is_expired_at, Claims};

use crate::keys;
use crate::user::UserRecord;

/// Holds the current session and answers whether it is still valid.
///
/// The vault has exactly one session slot. Saving while a session is
/// already present overwrites it without any guard; that is how the
/// login flow has always behaved.
#[derive(Clone)]
pub struct SessionVault {
    /// Session persistence backend.
    store: Arc<dyn KeyValueStore>,
    /// Time source for expiry checks.
    clock: Arc<dyn Clock>,
    /// Event bus the shell subscribes to.
    events: SessionEvents,
    /// Route published with logout events.
    login_route: String,
}

impl std::fmt::Debug for SessionVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionVault")
            .field("login_route", &self.login_route)
            .finish()
    }
}

impl SessionVault {
    /// Create a vault over the given store and clock.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        events: SessionEvents,
        config: &SessionConfig,
    ) -> Self {
        Self {
            store,
            clock,
            events,
            login_route: config.login_route.clone(),
        }
    }

    /// The vault's time source.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// The vault's event bus.
    pub fn events(&self) -> &SessionEvents {
        &self.events
    }

    /// Persist a session: user record, token, user ID, and the
    /// precomputed expiry instant when one can be derived.
    ///
    /// Best-effort: individual write failures are logged and the rest
    /// of the keys are still attempted, so a flaky store degrades to a
    /// partial session rather than a crash.
    pub async fn save(&self, user: &UserRecord, token: &str) {
        let user_json = match serde_json::to_string(user) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to serialize user record; session not saved");
                return;
            }
        };

        self.set_best_effort(keys::ACCESS_TOKEN, token).await;
        self.set_best_effort(keys::USER_DATA, &user_json).await;
        self.set_best_effort(keys::USER_ID, &user.id).await;

        if let Some(expiry) = Claims::decode(token).and_then(|c| c.expiry_epoch_seconds()) {
            self.set_best_effort(keys::TOKEN_EXPIRY, &expiry.to_string())
                .await;
        }

        info!(user_id = %user.id, "Session saved");
        self.events.publish(SessionEvent::SignedIn {
            user_id: user.id.clone(),
        });
    }

    /// Remove every session key. Idempotent and best-effort.
    pub async fn clear(&self) {
        for key in keys::SESSION_KEYS {
            if let Err(e) = self.store.remove(key).await {
                warn!(key, error = %e, "Failed to remove session key");
            }
        }
        debug!("Session cleared");
    }

    /// Clear the session and tell the shell to navigate to the login
    /// route.
    pub async fn logout(&self, reason: &str) {
        let user_id = self.user_id().await;
        self.clear().await;

        info!(user_id = ?user_id, reason, "Logged out");
        self.events.publish(SessionEvent::LoggedOut {
            reason: reason.to_string(),
            redirect_to: self.login_route.clone(),
        });
    }

    /// The stored access token, if any.
    pub async fn token(&self) -> Option<String> {
        self.get_fail_closed(keys::ACCESS_TOKEN).await
    }

    /// The stored user ID, if any.
    pub async fn user_id(&self) -> Option<String> {
        self.get_fail_closed(keys::USER_ID).await
    }

    /// The stored user record. A corrupt record reads as absent.
    pub async fn user(&self) -> Option<UserRecord> {
        let json = self.get_fail_closed(keys::USER_DATA).await?;
        match serde_json::from_str(&json) {
            Ok(user) => Some(user),
            Err(e) => {
                debug!(error = %e, "Stored user record is not parseable");
                None
            }
        }
    }

    /// Whether a currently valid session is present.
    ///
    /// Requires a stored token, a parseable user record, and a token
    /// that is not expired at the vault clock's current time. Note the
    /// expiry check inherits the fail-open rule for tokens without
    /// derivable expiry (see [`vigil_token::is_expired_at`]); the user
    /// record requirement is what keeps a garbage token from counting
    /// as a session on its own.
    pub async fn is_authenticated(&self) -> bool {
        let Some(token) = self.token().await else {
            return false;
        };
        if self.user().await.is_none() {
            return false;
        }
        !is_expired_at(&token, self.clock.now_epoch_seconds())
    }

    async fn set_best_effort(&self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value).await {
            warn!(key, error = %e, "Failed to persist session key");
        }
    }

    async fn get_fail_closed(&self, key: &str) -> Option<String> {
        match self.store.get(key).await {
            Ok(value) => value,
            Err(e) => {
                debug!(key, error = %e, "Storage read failed; treating as absent");
                None
            }
        }
    }
}
