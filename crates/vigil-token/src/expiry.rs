//! Expiry checks over raw token strings.

use vigil_core::traits::Clock;

use crate::claims::Claims;

/// Lifetime applied to tokens that carry `iat` but no `exp`: 72 hours.
pub const FALLBACK_LIFETIME_SECS: i64 = 259_200;

/// Whether the token is expired at the given instant.
///
/// A token whose expiry cannot be computed (undecodable payload, or a
/// payload with neither numeric `exp` nor numeric `iat`) is reported as
/// **not expired**. This fail-open rule matches the server contract
/// that tokens without expiry claims are non-expiring; the stored user
/// record is still required separately for an authenticated session.
pub fn is_expired_at(token: &str, now_epoch_seconds: i64) -> bool {
    Claims::decode(token)
        .and_then(|claims| claims.expiry_epoch_seconds())
        .map_or(false, |expiry| now_epoch_seconds >= expiry)
}

/// Whether the token is expired right now, per the given clock.
pub fn is_expired(token: &str, clock: &dyn Clock) -> bool {
    is_expired_at(token, clock.now_epoch_seconds())
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    fn make_token(payload: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD
            .encode(serde_json::to_vec(&serde_json::json!({"alg": "HS256"})).unwrap());
        let body = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&payload).unwrap());
        format!("{header}.{body}.sig")
    }

    #[test]
    fn past_exp_is_expired() {
        let token = make_token(serde_json::json!({"exp": 1000}));
        assert!(is_expired_at(&token, 1001));
    }

    #[test]
    fn future_exp_is_not_expired() {
        let token = make_token(serde_json::json!({"exp": 1000}));
        assert!(!is_expired_at(&token, 999));
    }

    #[test]
    fn expiry_boundary_is_inclusive() {
        // now >= exp counts as expired.
        let token = make_token(serde_json::json!({"iat": 1000, "exp": 2000}));
        assert!(!is_expired_at(&token, 1999));
        assert!(is_expired_at(&token, 2000));
        assert!(is_expired_at(&token, 2001));
    }

    #[test]
    fn iat_only_token_expires_after_fallback_lifetime() {
        let token = make_token(serde_json::json!({"iat": 1000}));
        assert!(!is_expired_at(&token, 1000 + FALLBACK_LIFETIME_SECS - 1));
        assert!(is_expired_at(&token, 1000 + FALLBACK_LIFETIME_SECS));
    }

    #[test]
    fn fail_open_for_undecodable_token() {
        // Not valid JWT structure: decode yields nothing, so the token
        // is reported as not expired. This is deliberate fail-open
        // behavior; authentication still requires a stored user record.
        assert!(!is_expired_at("not-a-jwt", i64::MAX));
    }

    #[test]
    fn fail_open_without_numeric_claims() {
        let token = make_token(serde_json::json!({"sub": "user-1"}));
        assert!(!is_expired_at(&token, i64::MAX));
    }

    #[test]
    fn system_clock_checks_against_wall_time() {
        use vigil_core::traits::SystemClock;
        // An exp far in the future is not expired against the real clock.
        let token = make_token(serde_json::json!({"exp": 4_102_444_800i64}));
        assert!(!is_expired(&token, &SystemClock));
    }
}
