//! Sign-in and sign-up handlers.

use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use staffbook_core::auth::{AuthError, password, queries};
use staffbook_core::models::auth::NewLogin;
use staffbook_core::profile::queries::find_profile_by_login_id;
use staffbook_core::session::Session;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::services::session::{commit_session, destroy_session};
use crate::views;

/// Minimum accepted password length.
const MIN_PASSWORD_LEN: usize = 8;

/// Credentials submitted by the sign-in and sign-up forms.
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub email: String,
    pub password: String,
}

/// `GET /login`
pub async fn login_form() -> Html<String> {
    Html(views::login_page(None))
}

/// `POST /login` — verify credentials, start a session, route onwards.
///
/// A login without a profile lands on the registration form; everyone
/// else goes home. Wrong email and wrong password get the same answer.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> AppResult<Response> {
    let Some(record) = queries::find_login_by_email(&state.pool, &form.email).await? else {
        return Ok(invalid_credentials());
    };
    if !password::verify_password(&form.password, &record.pw_hash)? {
        return Ok(invalid_credentials());
    }

    let mut session = Session::new();
    session.set_user_id(record.login_id);
    let jar = commit_session(&state.codec, jar, &session, state.config.secure_cookies)?;

    let target = if find_profile_by_login_id(&state.pool, record.login_id)
        .await?
        .is_some()
    {
        "/"
    } else {
        "/user/new"
    };

    tracing::info!(login_id = record.login_id, "signed in");
    Ok((jar, Redirect::to(target)).into_response())
}

fn invalid_credentials() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Html(views::login_page(Some("Invalid email or password."))),
    )
        .into_response()
}

/// `GET /register`
pub async fn register_form() -> Html<String> {
    Html(views::register_page(None))
}

/// `POST /register` — create a login record and start a session.
///
/// The new login has no profile yet, so the next stop is always the
/// registration form.
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> AppResult<Response> {
    if form.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(
            "Password must be at least 8 characters".into(),
        ));
    }

    let pw_hash = password::hash_password(&form.password)?;
    let record = match queries::insert_login(&state.pool, &NewLogin::new(&form.email, &pw_hash)).await
    {
        Ok(record) => record,
        Err(AuthError::DuplicateEmail) => {
            return Ok((
                StatusCode::CONFLICT,
                Html(views::register_page(Some(
                    "That email is already registered.",
                ))),
            )
                .into_response());
        }
        Err(e) => return Err(e.into()),
    };

    let mut session = Session::new();
    session.set_user_id(record.login_id);
    let jar = commit_session(&state.codec, jar, &session, state.config.secure_cookies)?;

    tracing::info!(login_id = record.login_id, "account created");
    Ok((jar, Redirect::to("/user/new")).into_response())
}

/// `POST /logout` — destroy the session.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    (
        destroy_session(jar, state.config.secure_cookies),
        Redirect::to("/login"),
    )
}
