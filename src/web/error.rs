use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use super::templates::NotFoundTemplate;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("page not found")]
    NotFound,

    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => {
                let page = NotFoundTemplate { flash: None }
                    .render()
                    .unwrap_or_else(|_| "404 - Page Not Found".to_string());
                (StatusCode::NOT_FOUND, Html(page)).into_response()
            }
            err => {
                tracing::error!("Internal error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred",
                )
                    .into_response()
            }
        }
    }
}

/// Fallback handler for unmatched routes.
pub async fn not_found() -> PageError {
    PageError::NotFound
}
