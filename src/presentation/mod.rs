use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;

use crate::application::auth_service::AuthService;
use crate::application::post_service::PostService;
use crate::data::repositories::sqlite::post_repository::SqlitePostRepository;
use crate::data::repositories::sqlite::user_repository::SqliteUserRepository;
use crate::infrastructure::session::SessionManager;

pub(crate) mod app_error;
pub(crate) mod handlers;
pub(crate) mod http_handlers;
pub(crate) mod middleware;
pub(crate) mod views;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) auth_service: Arc<AuthService<SqliteUserRepository>>,
    pub(crate) post_service: Arc<PostService<SqlitePostRepository>>,
    pub(crate) sessions: Arc<SessionManager>,
}

impl AppState {
    pub(crate) fn new(pool: SqlitePool, session_ttl: Duration) -> Self {
        let sessions = Arc::new(SessionManager::new(session_ttl));
        let auth_service = Arc::new(AuthService::new(
            SqliteUserRepository::new(pool.clone()),
            sessions.clone(),
        ));
        let post_service = Arc::new(PostService::new(SqlitePostRepository::new(pool)));

        Self {
            auth_service,
            post_service,
            sessions,
        }
    }
}
