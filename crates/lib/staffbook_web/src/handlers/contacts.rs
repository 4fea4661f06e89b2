//! Contact list handlers — the application home view.

use axum::extract::{Query, State};
use axum::response::{Html, Redirect};
use serde::Deserialize;
use staffbook_core::contacts;

use crate::AppState;
use crate::error::AppResult;
use crate::views;

/// Query string for the sidebar search box.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Free-text filter against contact names.
    pub q: Option<String>,
}

/// `GET /` — contact list, filtered by `?q=`.
pub async fn home(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Html<String>> {
    let contacts = contacts::list_contacts(&state.pool, params.q.as_deref()).await?;
    Ok(Html(views::home_page(&contacts, params.q.as_deref())))
}

/// `POST /contacts` — create a blank contact, as the sidebar "New"
/// button does, then return to the list.
pub async fn create(State(state): State<AppState>) -> AppResult<Redirect> {
    let contact = contacts::create_empty_contact(&state.pool).await?;
    tracing::debug!(id = contact.id, "contact created");
    Ok(Redirect::to("/"))
}
