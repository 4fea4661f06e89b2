//! Employee-profile registration handlers (`/user/new`).

use axum::Form;
use axum::extract::State;
use axum::response::{Html, Redirect};
use axum_extra::extract::CookieJar;
use chrono::NaiveDate;
use serde::Deserialize;
use staffbook_core::models::profile::{Gender, NewProfile, Position};
use staffbook_core::profile::queries::insert_profile;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::gate;
use crate::services::session::session_from_jar;
use crate::views;

/// Fields submitted by the registration form.
///
/// There is no identity field here: the profile is attributed to the
/// session identity, never to a value carried in the body.
#[derive(Debug, Deserialize)]
pub struct RegistrationForm {
    pub first: String,
    pub last: String,
    pub first_kana: String,
    pub last_kana: String,
    pub birth: String,
    pub phonenumber: String,
    #[serde(default)]
    pub address: Option<String>,
    pub gender: String,
    pub position: String,
    pub upper_department: String,
    pub lower_department: String,
    pub career_start_date: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// `GET /user/new` — render the form when the gate lets the request
/// through, otherwise redirect per the gate's decision.
pub async fn form(State(state): State<AppState>, jar: CookieJar) -> AppResult<Html<String>> {
    let session = session_from_jar(&state.codec, &jar);
    let loader = gate::registration_loader(&state.pool, &session).await?;
    Ok(Html(views::registration_page(loader.login_id)))
}

/// `POST /user/new` — validate and persist the profile, then go home.
pub async fn submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegistrationForm>,
) -> AppResult<Redirect> {
    let session = session_from_jar(&state.codec, &jar);
    let login_id = gate::registration_identity(&state.pool, &session).await?;

    let profile = build_profile(login_id, form)?;
    insert_profile(&state.pool, &profile).await?;

    tracing::info!(login_id, "profile registered");
    Ok(Redirect::to("/"))
}

/// Validate submitted fields into a `NewProfile`.
///
/// Categorical fields map through the declared enumerations; an unknown
/// value is a validation failure, never a default. Free-text fields pass
/// through verbatim, departments included.
fn build_profile(login_id: i64, form: RegistrationForm) -> AppResult<NewProfile> {
    let gender = Gender::from_form_value(&form.gender)
        .ok_or_else(|| AppError::Validation(format!("unknown gender value: {:?}", form.gender)))?;
    let position = Position::from_form_value(&form.position).ok_or_else(|| {
        AppError::Validation(format!("unknown position value: {:?}", form.position))
    })?;
    let birth = parse_date("birth", &form.birth)?;
    let career_start_date = parse_date("career_start_date", &form.career_start_date)?;

    Ok(NewProfile {
        login_id,
        first_name: form.first,
        last_name: form.last,
        first_name_kana: form.first_kana,
        last_name_kana: form.last_kana,
        birth,
        phone_number: form.phonenumber,
        address: form.address,
        gender,
        position,
        upper_department: form.upper_department,
        lower_department: form.lower_department,
        career_start_date,
        notes: form.notes,
    })
}

fn parse_date(field: &str, value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("{field} must be a YYYY-MM-DD date")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> RegistrationForm {
        RegistrationForm {
            first: "Jiyeon".into(),
            last: "Park".into(),
            first_kana: "ジヨン".into(),
            last_kana: "パク".into(),
            birth: "1992-04-01".into(),
            phonenumber: "08012345678".into(),
            address: None,
            gender: "female".into(),
            position: "manager".into(),
            upper_department: "ICT본부".into(),
            lower_department: "제2그룹".into(),
            career_start_date: "2015-04-01".into(),
            notes: Some("transferred in 2020".into()),
        }
    }

    #[test]
    fn valid_form_maps_categorical_codes() {
        let profile = build_profile(42, valid_form()).expect("profile");
        assert_eq!(profile.login_id, 42);
        assert_eq!(profile.gender.code(), 2);
        assert_eq!(profile.position.code(), 30);
        assert_eq!(profile.upper_department, "ICT본부");
        assert_eq!(profile.lower_department, "제2그룹");
    }

    #[test]
    fn unknown_gender_is_rejected() {
        let mut form = valid_form();
        form.gender = "unspecified".into();
        assert!(matches!(
            build_profile(42, form),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn unknown_position_is_rejected() {
        let mut form = valid_form();
        form.position = "ceo".into();
        assert!(matches!(
            build_profile(42, form),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn unparseable_date_is_rejected() {
        let mut form = valid_form();
        form.birth = "01/04/1992".into();
        assert!(matches!(
            build_profile(42, form),
            Err(AppError::Validation(_))
        ));
    }
}
