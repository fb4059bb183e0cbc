//! Session lifecycle configuration.

use serde::{Deserialize, Serialize};

/// Session lifecycle configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Fallback token lifetime in hours, applied when a token carries an
    /// `iat` claim but no `exp` claim.
    #[serde(default = "default_fallback_lifetime")]
    pub fallback_lifetime_hours: u64,
    /// Route the shell is sent to after logout.
    #[serde(default = "default_login_route")]
    pub login_route: String,
    /// Routes reachable without an authenticated session.
    #[serde(default = "default_public_routes")]
    pub public_routes: Vec<String>,
    /// Whether the auto-logout watchdog is armed on startup.
    #[serde(default = "default_true")]
    pub watchdog_enabled: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fallback_lifetime_hours: default_fallback_lifetime(),
            login_route: default_login_route(),
            public_routes: default_public_routes(),
            watchdog_enabled: true,
        }
    }
}

fn default_fallback_lifetime() -> u64 {
    72
}

fn default_login_route() -> String {
    "/login".to_string()
}

fn default_public_routes() -> Vec<String> {
    vec![
        "/login".to_string(),
        "/auth/login".to_string(),
        "/register".to_string(),
        "/auth/register".to_string(),
    ]
}

fn default_true() -> bool {
    true
}
