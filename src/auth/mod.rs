//! Route authorization gate.
//!
//! Authorization here is a pure routing decision: given a request path and
//! whether the requester holds a session, pick one of allow, redirect home,
//! or deny. Session validation itself lives behind [`Authenticator`];
//! credential checking and token lifecycles are external collaborators.

use tracing::debug;

/// Outcome of gating one request. `Deny` is not an error; the hosting
/// framework turns it into a silent redirect to the login page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    RedirectHome,
    Deny,
}

/// Minimal session capability the gate relies on. `R` is whatever the
/// hosting framework calls a request.
pub trait Authenticator<R> {
    fn is_authenticated(&self, request: &R) -> bool;
}

/// Whether a path falls under the gate at all: `/`, `/:id`, `/api/*`,
/// `/login`, and `/register`. Everything else bypasses the gate.
pub fn is_guarded_path(path: &str) -> bool {
    if path == "/" || path == "/api" || path.starts_with("/api/") {
        return true;
    }
    // A single non-empty segment covers /:id as well as /login and /register.
    match path.strip_prefix('/') {
        Some(rest) => !rest.is_empty() && !rest.contains('/'),
        None => false,
    }
}

fn is_auth_page(path: &str) -> bool {
    path == "/login" || path == "/register"
}

/// Decide what to do with a request, rules evaluated in order:
/// 1. authenticated on a login/register page → redirect home;
/// 2. login/register page in any auth state → allow;
/// 3. anything else → allow when authenticated, deny otherwise.
pub fn decide(path: &str, authenticated: bool) -> RouteDecision {
    let decision = if is_auth_page(path) {
        if authenticated {
            RouteDecision::RedirectHome
        } else {
            RouteDecision::Allow
        }
    } else if authenticated {
        RouteDecision::Allow
    } else {
        RouteDecision::Deny
    };
    debug!(path, authenticated, ?decision, "route gated");
    decision
}

/// Gate a request through an [`Authenticator`].
pub fn gate<R>(auth: &impl Authenticator<R>, request: &R, path: &str) -> RouteDecision {
    decide(path, auth.is_authenticated(request))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticated_users_are_bounced_off_auth_pages() {
        assert_eq!(decide("/login", true), RouteDecision::RedirectHome);
        assert_eq!(decide("/register", true), RouteDecision::RedirectHome);
    }

    #[test]
    fn auth_pages_are_open_to_anonymous_users() {
        assert_eq!(decide("/login", false), RouteDecision::Allow);
        assert_eq!(decide("/register", false), RouteDecision::Allow);
    }

    #[test]
    fn everything_else_requires_a_session() {
        assert_eq!(decide("/", true), RouteDecision::Allow);
        assert_eq!(decide("/", false), RouteDecision::Deny);
        assert_eq!(decide("/abc123", true), RouteDecision::Allow);
        assert_eq!(decide("/abc123", false), RouteDecision::Deny);
        assert_eq!(decide("/api/files/upload", false), RouteDecision::Deny);
    }

    #[test]
    fn matcher_covers_the_gated_routes_only() {
        for path in ["/", "/abc123", "/login", "/register", "/api", "/api/chat"] {
            assert!(is_guarded_path(path), "{path} should be guarded");
        }
        for path in ["/chat/abc/extra", "/static/app.css/x", "", "login"] {
            assert!(!is_guarded_path(path), "{path} should not be guarded");
        }
    }

    #[test]
    fn gate_consults_the_authenticator() {
        struct HeaderAuth;
        impl Authenticator<Vec<(String, String)>> for HeaderAuth {
            fn is_authenticated(&self, request: &Vec<(String, String)>) -> bool {
                request.iter().any(|(name, _)| name == "cookie")
            }
        }

        let with_session = vec![("cookie".to_string(), "session=abc".to_string())];
        let without: Vec<(String, String)> = Vec::new();

        assert_eq!(gate(&HeaderAuth, &with_session, "/"), RouteDecision::Allow);
        assert_eq!(gate(&HeaderAuth, &without, "/"), RouteDecision::Deny);
        assert_eq!(
            gate(&HeaderAuth, &with_session, "/login"),
            RouteDecision::RedirectHome
        );
    }
}
