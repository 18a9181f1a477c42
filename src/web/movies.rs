use askama::Template;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::current_user_id;
use super::flash;
use super::templates::{EditTemplate, IndexTemplate};
use super::validation::{parse_movie_id, title_is_valid, year_is_valid};
use super::{AppState, PageError};

#[derive(Deserialize)]
pub struct MovieForm {
    pub title: String,
    pub year: String,
}

/// GET /
pub async fn index(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Html<String>, PageError> {
    let movies = state.store.list_movies().await?;
    let user_name = state
        .store
        .first_user()
        .await?
        .map_or_else(|| "Cinelog".to_string(), |u| u.name);

    let page = IndexTemplate {
        user_name,
        logged_in: current_user_id(&session).await.is_some(),
        flash: flash::take(&session).await,
        movies,
    };
    Ok(Html(page.render()?))
}

/// POST /
///
/// Anonymous submissions bounce back to the catalog without touching
/// the store.
pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    session: Session,
    axum::Form(form): axum::Form<MovieForm>,
) -> Result<Redirect, PageError> {
    if current_user_id(&session).await.is_none() {
        return Ok(Redirect::to("/"));
    }

    if !title_is_valid(&form.title) || !year_is_valid(&form.year) {
        flash::set(&session, flash::INVALID_INPUT).await;
        return Ok(Redirect::to("/"));
    }

    state.store.add_movie(&form.title, &form.year).await?;

    flash::set(&session, flash::ITEM_CREATED).await;
    Ok(Redirect::to("/"))
}

/// GET /movie/edit/{id}
pub async fn edit_movie(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Html<String>, PageError> {
    let id = parse_movie_id(&id)?;
    let movie = state
        .store
        .get_movie(id)
        .await?
        .ok_or(PageError::NotFound)?;

    let page = EditTemplate {
        flash: flash::take(&session).await,
        movie,
    };
    Ok(Html(page.render()?))
}

/// POST /movie/edit/{id}
pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
    axum::Form(form): axum::Form<MovieForm>,
) -> Result<Redirect, PageError> {
    let id = parse_movie_id(&id)?;
    if state.store.get_movie(id).await?.is_none() {
        return Err(PageError::NotFound);
    }

    if !title_is_valid(&form.title) || !year_is_valid(&form.year) {
        flash::set(&session, flash::INVALID_INPUT).await;
        return Ok(Redirect::to(&format!("/movie/edit/{id}")));
    }

    if !state
        .store
        .update_movie(id, &form.title, &form.year)
        .await?
    {
        return Err(PageError::NotFound);
    }

    flash::set(&session, flash::ITEM_UPDATED).await;
    Ok(Redirect::to("/"))
}

/// POST /movie/delete/{id}
pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Redirect, PageError> {
    let id = parse_movie_id(&id)?;
    if !state.store.remove_movie(id).await? {
        return Err(PageError::NotFound);
    }

    flash::set(&session, flash::ITEM_DELETED).await;
    Ok(Redirect::to("/"))
}
