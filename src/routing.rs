//! Role-gated route guarding. Pure: the caller passes the current user and
//! gets back a decision, so the same rules serve any UI shell.

use crate::models::{Role, User};

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    /// Redirect to the given path instead of rendering.
    Redirect(&'static str),
}

/// Login page for the portal an unauthenticated visitor was trying to
/// reach, inferred from the path prefix.
fn login_path_for(attempted_path: &str) -> &'static str {
    if attempted_path.starts_with("/admin") {
        "/admin/login"
    } else if attempted_path.starts_with("/distributor") {
        "/distributor/login"
    } else {
        "/login"
    }
}

/// Checks whether `user` may enter a route restricted to `allowed` roles.
/// An empty `allowed` slice means any authenticated user. A signed-in user
/// of the wrong role is sent to their own portal home rather than a login
/// page.
pub fn guard_route(user: Option<&User>, allowed: &[Role], attempted_path: &str) -> RouteDecision {
    let Some(user) = user else {
        return RouteDecision::Redirect(login_path_for(attempted_path));
    };
    if allowed.is_empty() || allowed.contains(&user.role) {
        RouteDecision::Allow
    } else {
        RouteDecision::Redirect(user.role.home_path())
    }
}
