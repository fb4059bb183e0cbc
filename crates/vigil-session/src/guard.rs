//! Route gating against the public-route allow-list.

use vigil_core::config::session::SessionConfig;

/// Outcome of a route check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the requested route.
    Allow,
    /// Send the shell to the login route instead.
    RedirectToLogin {
        /// Where to go.
        to: String,
    },
}

/// Decides whether a navigation may proceed without a session.
///
/// Pure policy object: the caller supplies the authentication state,
/// typically from `SessionVault::is_authenticated`.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    public_routes: Vec<String>,
    login_route: String,
}

impl RouteGuard {
    /// Build a guard from session configuration.
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            public_routes: config.public_routes.clone(),
            login_route: config.login_route.clone(),
        }
    }

    /// Whether the path is on the public (login/register) allow-list.
    /// Matching is exact; `/login/extra` is not an auth route.
    pub fn is_auth_route(&self, path: &str) -> bool {
        self.public_routes.iter().any(|route| route == path)
    }

    /// Decide a navigation.
    pub fn decide(&self, path: &str, authenticated: bool) -> RouteDecision {
        if authenticated || self.is_auth_route(path) {
            RouteDecision::Allow
        } else {
            RouteDecision::RedirectToLogin {
                to: self.login_route.clone(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_guard() -> RouteGuard {
        RouteGuard::new(&SessionConfig::default())
    }

    #[test]
    fn default_allow_list_matches() {
        let guard = make_guard();
        assert!(guard.is_auth_route("/login"));
        assert!(guard.is_auth_route("/auth/login"));
        assert!(guard.is_auth_route("/register"));
        assert!(guard.is_auth_route("/auth/register"));
    }

    #[test]
    fn matching_is_exact() {
        let guard = make_guard();
        assert!(!guard.is_auth_route("/login/extra"));
        assert!(!guard.is_auth_route("/LOGIN"));
        assert!(!guard.is_auth_route("/dashboard"));
    }

    #[test]
    fn unauthenticated_protected_route_redirects() {
        let guard = make_guard();
        assert_eq!(
            guard.decide("/projects", false),
            RouteDecision::RedirectToLogin {
                to: "/login".to_string()
            }
        );
    }

    #[test]
    fn authenticated_navigation_is_allowed() {
        let guard = make_guard();
        assert_eq!(guard.decide("/projects", true), RouteDecision::Allow);
    }

    #[test]
    fn auth_routes_are_allowed_without_a_session() {
        let guard = make_guard();
        assert_eq!(guard.decide("/login", false), RouteDecision::Allow);
    }
}
