use askama::Template;

use crate::entities::movies;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub user_name: String,
    pub logged_in: bool,
    pub flash: Option<String>,
    pub movies: Vec<movies::Model>,
}

#[derive(Template)]
#[template(path = "edit.html")]
pub struct EditTemplate {
    pub flash: Option<String>,
    pub movie: movies::Model,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub flash: Option<String>,
}

#[derive(Template)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub flash: Option<String>,
    pub name: String,
}

#[derive(Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate {
    pub flash: Option<String>,
}
