use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use cinelog::config::Config;
use cinelog::db::Store;
use cinelog::web::{self, AppState};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "password";

async fn spawn_app() -> (Router, Store) {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();

    let store = Store::new(&config.general.database_path)
        .await
        .expect("Failed to create store");
    store
        .upsert_admin(ADMIN_USERNAME, ADMIN_PASSWORD, &config.security)
        .await
        .expect("Failed to provision admin");

    let state = Arc::new(AppState {
        config,
        store: store.clone(),
    });
    (web::router(state), store)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn session_cookie(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("Expected a session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("Expected a redirect location")
        .to_str()
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Log in with the seeded admin credentials and return the session cookie.
async fn login(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(post_form(
            "/login",
            &format!("username={ADMIN_USERNAME}&password={ADMIN_PASSWORD}"),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    session_cookie(&response)
}

#[tokio::test]
async fn test_index_renders_without_auth() {
    let (app, _store) = spawn_app().await;

    let response = app.clone().oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Watchlist"));
    assert!(body.contains("0 Titles"));
}

#[tokio::test]
async fn test_unauthenticated_create_redirects_without_mutation() {
    let (app, store) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(post_form("/", "title=Leon&year=1994", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert_eq!(store.movie_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_protected_routes_redirect_to_login() {
    let (app, store) = spawn_app().await;
    let movie = store.add_movie("Leon", "1994").await.unwrap();

    for request in [
        get(&format!("/movie/edit/{}", movie.id)),
        post_form(
            &format!("/movie/edit/{}", movie.id),
            "title=Leon&year=1995",
            None,
        ),
        post_form(&format!("/movie/delete/{}", movie.id), "", None),
        get("/settings"),
        get("/logout"),
    ] {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
    }

    assert_eq!(store.movie_count().await.unwrap(), 1);
    let unchanged = store.get_movie(movie.id).await.unwrap().unwrap();
    assert_eq!(unchanged.year, "1994");
}

#[tokio::test]
async fn test_login_success_flashes_and_authenticates() {
    let (app, _store) = spawn_app().await;

    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(get_with_cookie("/", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Login success."));
    assert!(body.contains("/logout"));

    // The flash is single-use; a second render must not repeat it.
    let response = app
        .clone()
        .oneshot(get_with_cookie("/", &cookie))
        .await
        .unwrap();
    let body = body_string(response).await;
    assert!(!body.contains("Login success."));
}

#[tokio::test]
async fn test_login_with_wrong_password_rejected() {
    let (app, _store) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(post_form(
            "/login",
            &format!("username={ADMIN_USERNAME}&password=wrong"),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let cookie = session_cookie(&response);
    let response = app
        .clone()
        .oneshot(get_with_cookie("/login", &cookie))
        .await
        .unwrap();
    let body = body_string(response).await;
    assert!(body.contains("Invalid username or password."));
}

#[tokio::test]
async fn test_login_with_empty_fields_rejected() {
    let (app, _store) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(post_form("/login", "username=&password=", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let cookie = session_cookie(&response);
    let response = app
        .clone()
        .oneshot(get_with_cookie("/login", &cookie))
        .await
        .unwrap();
    let body = body_string(response).await;
    assert!(body.contains("Invalid input !"));
}

#[tokio::test]
async fn test_create_movie_while_authenticated() {
    let (app, store) = spawn_app().await;
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(post_form(
            "/",
            "title=Am%C3%A9lie&year=2001",
            Some(&cookie),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert_eq!(store.movie_count().await.unwrap(), 1);

    let movies = store.list_movies().await.unwrap();
    assert_eq!(movies[0].title, "Amélie");
    assert_eq!(movies[0].year, "2001");

    let response = app
        .clone()
        .oneshot(get_with_cookie("/", &cookie))
        .await
        .unwrap();
    let body = body_string(response).await;
    assert!(body.contains("Item created !"));
    assert!(body.contains("Amélie"));
    assert!(body.contains("1 Titles"));
}

#[tokio::test]
async fn test_create_movie_with_invalid_input() {
    let (app, store) = spawn_app().await;
    let cookie = login(&app).await;

    let long_title = "X".repeat(61);
    for body in [
        format!("title={long_title}&year=2001"),
        "title=&year=2001".to_string(),
        "title=Leon&year=199".to_string(),
        "title=Leon&year=".to_string(),
    ] {
        let response = app
            .clone()
            .oneshot(post_form("/", &body, Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
        assert_eq!(store.movie_count().await.unwrap(), 0);
    }

    let response = app
        .clone()
        .oneshot(get_with_cookie("/", &cookie))
        .await
        .unwrap();
    let body = body_string(response).await;
    assert!(body.contains("Invalid input !"));
}

#[tokio::test]
async fn test_edit_movie_flow() {
    let (app, store) = spawn_app().await;
    let cookie = login(&app).await;
    let movie = store.add_movie("Leon", "1993").await.unwrap();

    let response = app
        .clone()
        .oneshot(get_with_cookie(
            &format!("/movie/edit/{}", movie.id),
            &cookie,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Edit item"));
    assert!(body.contains("Leon"));
    assert!(body.contains("1993"));

    let response = app
        .clone()
        .oneshot(post_form(
            &format!("/movie/edit/{}", movie.id),
            "title=Leon&year=1994",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let updated = store.get_movie(movie.id).await.unwrap().unwrap();
    assert_eq!(updated.year, "1994");
}

#[tokio::test]
async fn test_edit_movie_invalid_input_redirects_back() {
    let (app, store) = spawn_app().await;
    let cookie = login(&app).await;
    let movie = store.add_movie("Leon", "1994").await.unwrap();

    let response = app
        .clone()
        .oneshot(post_form(
            &format!("/movie/edit/{}", movie.id),
            "title=&year=1994",
            Some(&cookie),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/movie/edit/{}", movie.id));

    let unchanged = store.get_movie(movie.id).await.unwrap().unwrap();
    assert_eq!(unchanged.title, "Leon");
}

#[tokio::test]
async fn test_edit_missing_movie_returns_404() {
    let (app, store) = spawn_app().await;
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(get_with_cookie("/movie/edit/999", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_string(response).await;
    assert!(body.contains("404"));

    let response = app
        .clone()
        .oneshot(post_form(
            "/movie/edit/999",
            "title=Leon&year=1994",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(store.movie_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_movie() {
    let (app, store) = spawn_app().await;
    let cookie = login(&app).await;
    let movie = store.add_movie("Leon", "1994").await.unwrap();

    let response = app
        .clone()
        .oneshot(post_form(
            &format!("/movie/delete/{}", movie.id),
            "",
            Some(&cookie),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert_eq!(store.movie_count().await.unwrap(), 0);

    let response = app
        .clone()
        .oneshot(get_with_cookie("/", &cookie))
        .await
        .unwrap();
    let body = body_string(response).await;
    assert!(body.contains("Item deleted !"));
}

#[tokio::test]
async fn test_delete_missing_movie_returns_404() {
    let (app, store) = spawn_app().await;
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(post_form("/movie/delete/999", "", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(store.movie_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_not_reachable_via_get() {
    let (app, store) = spawn_app().await;
    let cookie = login(&app).await;
    let movie = store.add_movie("Leon", "1994").await.unwrap();

    let response = app
        .clone()
        .oneshot(get_with_cookie(
            &format!("/movie/delete/{}", movie.id),
            &cookie,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(store.movie_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_logout_invalidates_session() {
    let (app, store) = spawn_app().await;
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(get_with_cookie("/logout", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let response = app
        .clone()
        .oneshot(get_with_cookie("/", &cookie))
        .await
        .unwrap();
    let body = body_string(response).await;
    assert!(body.contains("Goodbye."));

    // The old cookie no longer authorizes mutations.
    let response = app
        .clone()
        .oneshot(post_form("/", "title=Leon&year=1994", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert_eq!(store.movie_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_settings_updates_display_name() {
    let (app, store) = spawn_app().await;
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(get_with_cookie("/settings", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Settings"));

    let response = app
        .clone()
        .oneshot(post_form("/settings", "name=Grace", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let user = store.first_user().await.unwrap().unwrap();
    assert_eq!(user.name, "Grace");

    let response = app
        .clone()
        .oneshot(get_with_cookie("/", &cookie))
        .await
        .unwrap();
    let body = body_string(response).await;
    assert!(body.contains("Settings updated."));
    assert!(body.contains("Grace&#x27;s Watchlist") || body.contains("Grace's Watchlist"));
}

#[tokio::test]
async fn test_settings_rejects_invalid_name() {
    let (app, store) = spawn_app().await;
    let cookie = login(&app).await;

    let long_name = "x".repeat(21);
    for body in [format!("name={long_name}"), "name=".to_string()] {
        let response = app
            .clone()
            .oneshot(post_form("/settings", &body, Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/settings");
    }

    let user = store.first_user().await.unwrap().unwrap();
    assert_eq!(user.name, "Admin");
}

#[tokio::test]
async fn test_non_numeric_movie_id_is_not_found() {
    let (app, _store) = spawn_app().await;
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(get_with_cookie("/movie/edit/abc", &cookie))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route_renders_404_page() {
    let (app, _store) = spawn_app().await;

    let response = app.clone().oneshot(get("/nope")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_string(response).await;
    assert!(body.contains("404 - Page Not Found"));
}
