//! Presence-only cookie gate for page routes.
//!
//! The guard never looks the user up; a forged but well-formed cookie gets
//! through here and is rejected by the API handlers instead.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::auth::read_session_token;
use crate::config;

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const LANDING_PATH: &str = "/home";

/// Pages only anonymous visitors should see
const ANONYMOUS_ONLY: &[&str] = &[LOGIN_PATH, REGISTER_PATH];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Pass,
    Redirect(&'static str),
}

pub fn guard_decision(path: &str, has_session: bool) -> GuardDecision {
    let path = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };
    let anonymous_only = ANONYMOUS_ONLY.contains(&path);

    match (has_session, anonymous_only) {
        (false, false) => GuardDecision::Redirect(LOGIN_PATH),
        (true, true) => GuardDecision::Redirect(LANDING_PATH),
        _ => GuardDecision::Pass,
    }
}

pub async fn route_guard(request: Request, next: Next) -> Response {
    let has_session = read_session_token(request.headers(), &config::config().security).is_some();

    match guard_decision(request.uri().path(), has_session) {
        GuardDecision::Pass => next.run(request).await,
        GuardDecision::Redirect(to) => {
            tracing::debug!("Route guard redirecting {} -> {}", request.uri().path(), to);
            Redirect::temporary(to).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_visitors_go_to_login() {
        for path in ["/", "/home", "/notes", "/notes/abc"] {
            assert_eq!(guard_decision(path, false), GuardDecision::Redirect(LOGIN_PATH), "{}", path);
        }
        assert_eq!(guard_decision("/login", false), GuardDecision::Pass);
        assert_eq!(guard_decision("/register", false), GuardDecision::Pass);
    }

    #[test]
    fn signed_in_visitors_skip_entry_pages() {
        assert_eq!(guard_decision("/login", true), GuardDecision::Redirect(LANDING_PATH));
        assert_eq!(guard_decision("/register/", true), GuardDecision::Redirect(LANDING_PATH));
        assert_eq!(guard_decision("/notes", true), GuardDecision::Pass);
        assert_eq!(guard_decision("/", true), GuardDecision::Pass);
    }
}
