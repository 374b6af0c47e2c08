use axum::{Form, extract::State, response::Html};
use serde::Deserialize;
use tower_cookies::Cookies;
use tracing::{error, info};

use crate::domain::error::DomainError;
use crate::domain::post::CreatePostRequest;
use crate::infrastructure::session::Identity;
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::handlers::current_identity;
use crate::presentation::views::{Banner, HomeView, render_home};

#[derive(Debug, Deserialize)]
pub(crate) struct PostForm {
    #[serde(default)]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) content: String,
}

pub(crate) async fn home_page(
    State(state): State<AppState>,
    cookies: Cookies,
) -> AppResult<Html<String>> {
    let user = current_identity(&state, &cookies);
    render_listing(&state, user, None).await
}

/// Post creation never redirects: the listing is re-rendered with a
/// per-response banner for the just-completed action.
pub(crate) async fn create_post(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<PostForm>,
) -> AppResult<Html<String>> {
    let user = current_identity(&state, &cookies);

    let banner = match &user {
        None => Banner::Error(DomainError::AuthRequired.to_string()),
        Some(identity) => {
            let req = CreatePostRequest {
                title: form.title,
                content: form.content,
            };
            match state.post_service.create_post(identity.user_id, req).await {
                Ok(post) => {
                    info!(post_id = post.id, author_id = post.author_id, "post created");
                    Banner::Success("Post created successfully!".to_string())
                }
                Err(DomainError::StoreUnavailable(reason)) => {
                    error!(%reason, "post insert failed");
                    Banner::Error("Failed to create post".to_string())
                }
                Err(err) => Banner::Error(err.to_string()),
            }
        }
    };

    render_listing(&state, user, Some(banner)).await
}

async fn render_listing(
    state: &AppState,
    user: Option<Identity>,
    banner: Option<Banner>,
) -> AppResult<Html<String>> {
    let posts = state.post_service.list_posts().await?;
    Ok(Html(render_home(&HomeView {
        user,
        banner,
        posts,
    })))
}
