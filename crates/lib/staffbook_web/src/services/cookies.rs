//! Cookie service — build the fixed-policy `__session` cookie.
//!
//! Attributes are policy, not caller options: `Path=/`, `HttpOnly`,
//! `SameSite=Lax`, and `Secure` in production deployments.

use axum_extra::extract::cookie::{Cookie, SameSite};
use staffbook_core::session::SESSION_COOKIE;
use time::Duration;

/// Build the session cookie carrying a sealed bag.
///
/// No max-age: the cookie lives for the browser session.
pub fn session_cookie(sealed: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, sealed))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}

/// Build an expired cookie that clears the session.
pub fn clear_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, String::new()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_has_fixed_policy() {
        let cookie = session_cookie("sealed-bag".into(), false);
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "sealed-bag");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), None);
    }

    #[test]
    fn secure_flag_follows_environment() {
        assert_eq!(session_cookie("v".into(), true).secure(), Some(true));
        assert_eq!(clear_session_cookie(true).secure(), Some(true));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let cookie = clear_session_cookie(false);
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }
}
