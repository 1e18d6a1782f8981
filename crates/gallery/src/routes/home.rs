//! Home and about page handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::filters;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate;

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "about.html")]
pub struct AboutTemplate;

/// Display the home page.
pub async fn home() -> impl IntoResponse {
    HomeTemplate
}

/// Display the about page.
pub async fn about() -> impl IntoResponse {
    AboutTemplate
}
