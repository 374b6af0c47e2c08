use axum::{Router, routing::get};
use tower_cookies::CookieManagerLayer;

use super::AppState;
use super::handlers::auth::{login_page, login_submit, logout, register_page, register_submit};
use super::handlers::home::{create_post, home_page};

pub(crate) fn routes(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/", get(home_page).post(create_post))
        .route("/login", get(login_page).post(login_submit))
        .route("/register", get(register_page).post(register_submit))
        .route("/logout", get(logout))
        .layer(CookieManagerLayer::new())
        .with_state(state)
}

async fn health_handler() -> &'static str {
    "ok"
}
