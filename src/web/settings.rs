use askama::Template;
use axum::{
    extract::State,
    response::{Html, Redirect},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::current_user_id;
use super::flash;
use super::templates::SettingsTemplate;
use super::validation::name_is_valid;
use super::{AppState, PageError};

#[derive(Deserialize)]
pub struct SettingsForm {
    pub name: String,
}

/// GET /settings
pub async fn settings_form(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Html<String>, PageError> {
    let user_id = current_user_id(&session)
        .await
        .ok_or_else(|| anyhow::anyhow!("Settings page reached without a session user"))?;

    let user = state
        .store
        .get_user(user_id)
        .await?
        .ok_or(PageError::NotFound)?;

    let page = SettingsTemplate {
        flash: flash::take(&session).await,
        name: user.name,
    };
    Ok(Html(page.render()?))
}

/// POST /settings
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    session: Session,
    axum::Form(form): axum::Form<SettingsForm>,
) -> Result<Redirect, PageError> {
    let user_id = current_user_id(&session)
        .await
        .ok_or_else(|| anyhow::anyhow!("Settings update reached without a session user"))?;

    if !name_is_valid(&form.name) {
        flash::set(&session, flash::INVALID_INPUT).await;
        return Ok(Redirect::to("/settings"));
    }

    state.store.update_user_name(user_id, &form.name).await?;

    flash::set(&session, flash::SETTINGS_UPDATED).await;
    Ok(Redirect::to("/"))
}
