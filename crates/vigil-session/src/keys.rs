//! Fixed storage keys.
//!
//! These names are shared with the login flow that deposits the session
//! into the vault and must not change independently of it.

/// The raw access token string.
pub const ACCESS_TOKEN: &str = "accessToken";

/// The JSON-serialized user record.
pub const USER_DATA: &str = "userData";

/// The user ID, duplicated out of the record for cheap lookups.
pub const USER_ID: &str = "userId";

/// Precomputed expiry instant, string-encoded epoch seconds. Written
/// opportunistically; the token remains the source of truth.
pub const TOKEN_EXPIRY: &str = "tokenExpiry";

/// Every key the vault owns, in clearing order.
pub const SESSION_KEYS: [&str; 4] = [ACCESS_TOKEN, USER_DATA, USER_ID, TOKEN_EXPIRY];
