//! Session glue between the cookie jar and the sealing codec.

use axum_extra::extract::CookieJar;
use staffbook_core::session::{SESSION_COOKIE, Session, SessionCodec};

use crate::error::{AppError, AppResult};
use crate::services::cookies;

/// Decode the session bag from the request's cookie jar.
///
/// Fail-soft: anything unreadable is the empty session.
pub fn session_from_jar(codec: &SessionCodec, jar: &CookieJar) -> Session {
    codec.decode(jar.get(SESSION_COOKIE).map(|cookie| cookie.value()))
}

/// Seal `session` and return a jar setting the `__session` cookie.
pub fn commit_session(
    codec: &SessionCodec,
    jar: CookieJar,
    session: &Session,
    secure: bool,
) -> AppResult<CookieJar> {
    let sealed = codec
        .encode(session)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(jar.add(cookies::session_cookie(sealed, secure)))
}

/// Return a jar clearing the session cookie.
pub fn destroy_session(jar: CookieJar, secure: bool) -> CookieJar {
    jar.add(cookies::clear_session_cookie(secure))
}
