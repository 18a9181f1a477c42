use askama::Template;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::flash;
use super::templates::LoginTemplate;
use super::{AppState, PageError};

const USER_ID_KEY: &str = "user_id";

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Session user id, or None for anonymous requests.
pub async fn current_user_id(session: &Session) -> Option<i32> {
    session.get::<i32>(USER_ID_KEY).await.unwrap_or_default()
}

/// Middleware guarding mutating pages: anonymous requests are
/// redirected to the login form without reaching the handler.
pub async fn require_login(session: Session, request: Request, next: Next) -> Response {
    if current_user_id(&session).await.is_some() {
        next.run(request).await
    } else {
        Redirect::to("/login").into_response()
    }
}

/// GET /login
pub async fn login_form(session: Session) -> Result<Html<String>, PageError> {
    let page = LoginTemplate {
        flash: flash::take(&session).await,
    };
    Ok(Html(page.render()?))
}

/// POST /login
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    axum::Form(form): axum::Form<LoginForm>,
) -> Result<Redirect, PageError> {
    if form.username.is_empty() || form.password.is_empty() {
        flash::set(&session, flash::INVALID_INPUT).await;
        return Ok(Redirect::to("/login"));
    }

    let is_valid = state
        .store
        .verify_user_password(&form.username, &form.password)
        .await?;

    if !is_valid {
        flash::set(&session, flash::LOGIN_FAILURE).await;
        return Ok(Redirect::to("/login"));
    }

    let user = state
        .store
        .get_user_by_username(&form.username)
        .await?
        .ok_or_else(|| anyhow::anyhow!("User vanished after verification: {}", form.username))?;

    session.insert(USER_ID_KEY, user.id).await?;
    tracing::info!("User logged in: {}", form.username);

    flash::set(&session, flash::LOGIN_SUCCESS).await;
    Ok(Redirect::to("/"))
}

/// GET /logout
pub async fn logout(session: Session) -> Result<Redirect, PageError> {
    let _ = session.remove::<i32>(USER_ID_KEY).await?;

    flash::set(&session, flash::GOODBYE).await;
    Ok(Redirect::to("/"))
}
