use axum::{
    Router,
    middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::Config;
use crate::db::Store;

pub mod auth;
mod error;
pub mod flash;
mod movies;
mod settings;
mod templates;
mod validation;

pub use error::PageError;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,

    pub store: Store,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Arc<Self>> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Arc::new(Self { config, store }))
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(state.config.server.secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(i64::from(
            state.config.server.session_ttl_minutes,
        ))));

    let protected = Router::new()
        .route(
            "/movie/edit/{id}",
            get(movies::edit_movie).post(movies::update_movie),
        )
        .route("/movie/delete/{id}", post(movies::delete_movie))
        .route("/logout", get(auth::logout))
        .route(
            "/settings",
            get(settings::settings_form).post(settings::update_settings),
        )
        .route_layer(middleware::from_fn(auth::require_login));

    Router::new()
        .route("/", get(movies::index).post(movies::create_movie))
        .route("/login", get(auth::login_form).post(auth::login))
        .merge(protected)
        .fallback(error::not_found)
        .layer(session_layer)
        .with_state(state)
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
}
