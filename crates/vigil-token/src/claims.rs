//! Decoded token payload with claim accessors.

use crate::decoder::decode_payload;
use crate::expiry::FALLBACK_LIFETIME_SECS;

/// A decoded, unverified JWT claims payload.
///
/// Only the `exp` and `iat` claims are consumed; everything else rides
/// along in the raw payload. Claims are untrusted input and every
/// accessor is total over malformed data.
#[derive(Debug, Clone, PartialEq)]
pub struct Claims {
    payload: serde_json::Value,
}

impl Claims {
    /// Decode a token string into claims.
    ///
    /// Returns `None` for anything that is not a three-segment token
    /// with a base64url JSON payload. No signature check is performed.
    pub fn decode(token: &str) -> Option<Self> {
        decode_payload(token).map(|payload| Self { payload })
    }

    /// The expiration claim in epoch seconds, if present and numeric.
    pub fn exp(&self) -> Option<i64> {
        self.numeric_claim("exp")
    }

    /// The issued-at claim in epoch seconds, if present and numeric.
    pub fn iat(&self) -> Option<i64> {
        self.numeric_claim("iat")
    }

    /// The derived expiry instant in epoch seconds.
    ///
    /// `exp` wins when numeric; otherwise a token with a numeric `iat`
    /// expires [`FALLBACK_LIFETIME_SECS`] after issue. A payload with
    /// neither yields `None`, which callers treat as non-expiring.
    pub fn expiry_epoch_seconds(&self) -> Option<i64> {
        self.exp()
            .or_else(|| self.iat().map(|iat| iat + FALLBACK_LIFETIME_SECS))
    }

    /// Seconds until expiry at the given instant (0 if already expired).
    pub fn remaining_seconds_at(&self, now_epoch_seconds: i64) -> Option<u64> {
        self.expiry_epoch_seconds().map(|exp| {
            let remaining = exp - now_epoch_seconds;
            if remaining > 0 { remaining as u64 } else { 0 }
        })
    }

    /// Raw access to the decoded payload.
    pub fn payload(&self) -> &serde_json::Value {
        &self.payload
    }

    /// Reads a claim as an integer, accepting integral JSON numbers and
    /// truncating floating-point ones. Non-numeric values read as absent.
    fn numeric_claim(&self, name: &str) -> Option<i64> {
        let value = self.payload.get(name)?;
        value
            .as_i64()
            .or_else(|| value.as_f64().map(|f| f as i64))
    }
}
