//! Route guard: translate session status into view-routing decisions.
//! Pure with respect to session state; no network calls, no stored state.

use crate::session::SessionState;

pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Outcome of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session restoration has not settled: render a neutral placeholder,
    /// never route content (avoids leaking protected UI or bouncing through
    /// the login view before restore completes).
    Placeholder,
    Render(String),
    Redirect(String),
}

/// Top-level views behind the guard, mirroring the application router.
const PROTECTED_PREFIXES: &[&str] = &[
    "/dashboard",
    "/tenders",
    "/crm",
    "/reports",
    "/chat",
    "/documents",
    "/notifications",
    "/support",
    "/subscription",
    "/analytics",
    "/admin",
];

/// A path this router knows how to render for an authenticated session.
/// `/tenders/{id}` is the only parameterized route.
pub fn is_protected_path(path: &str) -> bool {
    if PROTECTED_PREFIXES.contains(&path) {
        return true;
    }
    match path.strip_prefix("/tenders/") {
        Some(rest) => !rest.is_empty() && !rest.contains('/'),
        None => false,
    }
}

pub fn decide_route(state: SessionState, path: &str) -> RouteDecision {
    match state {
        SessionState::Loading => RouteDecision::Placeholder,
        SessionState::Anonymous => {
            if path == LOGIN_PATH {
                RouteDecision::Render(LOGIN_PATH.to_string())
            } else {
                RouteDecision::Redirect(LOGIN_PATH.to_string())
            }
        }
        SessionState::Authenticated => {
            if is_protected_path(path) {
                RouteDecision::Render(path.to_string())
            } else {
                // Covers /login, the bare root, and any unknown path: the
                // router's catch-all lands on the dashboard.
                RouteDecision::Redirect(DASHBOARD_PATH.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_renders_placeholder_everywhere() {
        for p in ["/login", "/dashboard", "/tenders", "/nope"] {
            assert_eq!(decide_route(SessionState::Loading, p), RouteDecision::Placeholder);
        }
    }

    #[test]
    fn anonymous_is_redirected_to_login() {
        for p in ["/dashboard", "/tenders", "/tenders/t-42", "/admin", "/"] {
            assert_eq!(
                decide_route(SessionState::Anonymous, p),
                RouteDecision::Redirect(LOGIN_PATH.into()),
                "path {}",
                p
            );
        }
        assert_eq!(
            decide_route(SessionState::Anonymous, LOGIN_PATH),
            RouteDecision::Render(LOGIN_PATH.into())
        );
    }

    #[test]
    fn authenticated_renders_protected_paths() {
        for p in ["/dashboard", "/tenders", "/tenders/t-42", "/crm", "/support"] {
            assert_eq!(
                decide_route(SessionState::Authenticated, p),
                RouteDecision::Render(p.into()),
                "path {}",
                p
            );
        }
    }

    #[test]
    fn authenticated_login_and_root_land_on_dashboard() {
        assert_eq!(
            decide_route(SessionState::Authenticated, LOGIN_PATH),
            RouteDecision::Redirect(DASHBOARD_PATH.into())
        );
        assert_eq!(
            decide_route(SessionState::Authenticated, "/"),
            RouteDecision::Redirect(DASHBOARD_PATH.into())
        );
        assert_eq!(
            decide_route(SessionState::Authenticated, "/unknown"),
            RouteDecision::Redirect(DASHBOARD_PATH.into())
        );
    }

    #[test]
    fn tender_detail_path_shape() {
        assert!(is_protected_path("/tenders/abc"));
        assert!(!is_protected_path("/tenders/"));
        assert!(!is_protected_path("/tenders/abc/def"));
    }
}
