//! Token-string to payload decoding.
//!
//! Decoding is a parsing operation, not a verification operation: the
//! signature segment is never checked. Malformed input of any shape
//! (wrong segment count, invalid base64url, invalid JSON) decodes to
//! `None` rather than an error, because a corrupt stored token and an
//! absent one are handled identically upstream.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use tracing::debug;

/// Decode the payload segment of a JWT-shaped token into JSON.
///
/// Returns `None` unless the token has exactly three dot-separated
/// segments and the middle segment is base64url-encoded JSON.
pub fn decode_payload(token: &str) -> Option<serde_json::Value> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        debug!(segments = segments.len(), "Token does not have JWT structure");
        return None;
    }

    // Tolerate both padded and unpadded encodings.
    let raw = segments[1].trim_end_matches('=');

    let bytes = match URL_SAFE_NO_PAD.decode(raw) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(error = %e, "Token payload is not valid base64url");
            return None;
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(error = %e, "Token payload is not valid JSON");
            None
        }
    }
}
