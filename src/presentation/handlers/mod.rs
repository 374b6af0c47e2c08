use tower_cookies::Cookies;

use crate::infrastructure::session::Identity;
use crate::presentation::AppState;

pub(crate) mod auth;
pub(crate) mod home;

pub(crate) const SESSION_COOKIE: &str = "session_token";

/// Resolves the request's identity from the session cookie. The cookie is
/// the only identity source the server trusts.
pub(crate) fn current_identity(state: &AppState, cookies: &Cookies) -> Option<Identity> {
    cookies
        .get(SESSION_COOKIE)
        .and_then(|cookie| state.sessions.lookup(cookie.value()))
}
