use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_cookies::{Cookie, Cookies, cookie::SameSite};
use tracing::{error, info};

use crate::domain::error::DomainError;
use crate::domain::user::{LoginRequest, RegisterRequest};
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};
use crate::presentation::handlers::{SESSION_COOKIE, current_identity};
use crate::presentation::views::{Banner, LoginView, RegisterView, render_login, render_register};

#[derive(Debug, Deserialize)]
pub(crate) struct LoginForm {
    #[serde(default)]
    pub(crate) username: String,
    #[serde(default)]
    pub(crate) password: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RegisterForm {
    #[serde(default)]
    pub(crate) username: String,
    #[serde(default)]
    pub(crate) password: String,
    #[serde(default)]
    pub(crate) confirm_password: String,
}

pub(crate) async fn login_page(
    State(state): State<AppState>,
    cookies: Cookies,
) -> AppResult<Response> {
    if current_identity(&state, &cookies).is_some() {
        return Ok(Redirect::to("/").into_response());
    }
    Ok(Html(render_login(&LoginView::default())).into_response())
}

pub(crate) async fn login_submit(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    if current_identity(&state, &cookies).is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    let req = LoginRequest {
        username: form.username,
        password: form.password,
    };

    match state.auth_service.login(req).await {
        Ok(result) => {
            cookies.add(session_cookie(result.session_token));
            info!(user_id = result.user.id, "login succeeded");
            Ok(Redirect::to("/").into_response())
        }
        // one message for unknown user, wrong password, and blank fields
        Err(DomainError::InvalidCredentials) => Ok(Html(render_login(&LoginView {
            error: Some(DomainError::InvalidCredentials.to_string()),
        }))
        .into_response()),
        Err(err) => Err(AppError::Domain(err)),
    }
}

pub(crate) async fn register_page(
    State(state): State<AppState>,
    cookies: Cookies,
) -> AppResult<Response> {
    if current_identity(&state, &cookies).is_some() {
        return Ok(Redirect::to("/").into_response());
    }
    Ok(Html(render_register(&RegisterView::default())).into_response())
}

/// Successful registration shows a banner and does NOT log the user in.
/// On failure the submitted username is preserved, the passwords never are.
pub(crate) async fn register_submit(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    if current_identity(&state, &cookies).is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    let submitted_username = form.username.clone();
    let req = RegisterRequest {
        username: form.username,
        password: form.password,
        confirm_password: form.confirm_password,
    };

    let view = match state.auth_service.register(req).await {
        Ok(user) => {
            info!(user_id = user.id, "user registered");
            RegisterView {
                banner: Some(Banner::Success(
                    "Account created successfully! You can now login.".to_string(),
                )),
                username: submitted_username,
            }
        }
        Err(DomainError::StoreUnavailable(reason)) => {
            error!(%reason, "user insert failed");
            RegisterView {
                banner: Some(Banner::Error(
                    "Registration failed. Please try again.".to_string(),
                )),
                username: submitted_username,
            }
        }
        Err(err) => RegisterView {
            banner: Some(Banner::Error(err.to_string())),
            username: submitted_username,
        },
    };

    Ok(Html(render_register(&view)).into_response())
}

pub(crate) async fn logout(State(state): State<AppState>, cookies: Cookies) -> Redirect {
    if let Some(cookie) = cookies.get(SESSION_COOKIE) {
        state.sessions.end(cookie.value());
    }
    let mut removal = Cookie::new(SESSION_COOKIE, "");
    removal.set_path("/");
    cookies.remove(removal);
    Redirect::to("/")
}

fn session_cookie(token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}
