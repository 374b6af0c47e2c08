use anyhow::Result;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use tokio::net::TcpListener;
use tracing::info;

use crate::infrastructure::settings::Settings;
use crate::presentation::middleware::trace::apply_trace;
use crate::presentation::{AppState, http_handlers};

pub(crate) async fn run_http(settings: &Settings, state: AppState) -> Result<()> {
    let app = build_router(state);
    let app = apply_trace(app);
    let app = app.layer(DefaultBodyLimit::max(settings.http_request_body_limit_bytes));

    let listener = TcpListener::bind(&settings.http_addr).await?;

    info!("HTTP server listening on {}", settings.http_addr);
    axum::serve(listener, app).await?;
    Ok(())
}

pub(crate) fn build_router(state: AppState) -> Router {
    http_handlers::routes(state)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{
        Request, StatusCode,
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
    };
    use sqlx::sqlite::SqlitePoolOptions;
    use tower::ServiceExt;

    use super::build_router;
    use crate::infrastructure::database::run_migrations;
    use crate::presentation::AppState;

    async fn test_router() -> Router {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite must connect");
        run_migrations(&pool).await.expect("migrations must apply");
        build_router(AppState::new(pool, Duration::from_secs(3600)))
    }

    fn form_post(uri: &str, body: &str, session: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = session {
            builder = builder.header(COOKIE, cookie.to_string());
        }
        builder
            .body(Body::from(body.to_string()))
            .expect("request must build")
    }

    fn get(uri: &str, session: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = session {
            builder = builder.header(COOKIE, cookie.to_string());
        }
        builder.body(Body::empty()).expect("request must build")
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body must be readable");
        String::from_utf8(bytes.to_vec()).expect("body must be utf-8")
    }

    /// Returns the `session_token=...` pair from a Set-Cookie header.
    fn session_cookie(response: &axum::response::Response) -> String {
        let raw = response
            .headers()
            .get(SET_COOKIE)
            .expect("response must set a cookie")
            .to_str()
            .expect("cookie must be ascii");
        let pair = raw.split(';').next().expect("cookie must have a value");
        assert!(pair.starts_with("session_token="));
        pair.to_string()
    }

    async fn register(router: &Router, username: &str, password: &str) -> String {
        let response = router
            .clone()
            .oneshot(form_post(
                "/register",
                &format!("username={username}&password={password}&confirm_password={password}"),
                None,
            ))
            .await
            .expect("request must succeed");
        assert_eq!(response.status(), StatusCode::OK);
        body_text(response).await
    }

    async fn login(router: &Router, username: &str, password: &str) -> String {
        let response = router
            .clone()
            .oneshot(form_post(
                "/login",
                &format!("username={username}&password={password}"),
                None,
            ))
            .await
            .expect("request must succeed");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/");
        session_cookie(&response)
    }

    #[tokio::test]
    async fn healthz_is_up() {
        let router = test_router().await;
        let response = router.oneshot(get("/healthz", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "ok");
    }

    #[tokio::test]
    async fn full_register_login_post_logout_flow() {
        let router = test_router().await;

        let page = register(&router, "alice", "secret1").await;
        assert!(page.contains("Account created successfully! You can now login."));

        let session = login(&router, "alice", "secret1").await;

        // logged-in home page greets the user
        let home = body_text(
            router
                .clone()
                .oneshot(get("/", Some(&session)))
                .await
                .unwrap(),
        )
        .await;
        assert!(home.contains("Welcome, alice!"));

        // create a post
        let response = router
            .clone()
            .oneshot(form_post("/", "title=Hello&content=World", Some(&session)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let page = body_text(response).await;
        assert!(page.contains("Post created successfully!"));
        assert!(page.contains("Hello"));
        assert!(page.contains("by alice"));
        assert!(page.contains("All Posts (1)"));

        // logout destroys the session
        let response = router
            .clone()
            .oneshot(get("/logout", Some(&session)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        // the old token no longer authorizes posting, nothing is inserted
        let response = router
            .clone()
            .oneshot(form_post("/", "title=Again&content=Nope", Some(&session)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let page = body_text(response).await;
        assert!(page.contains("You must be logged in to create posts"));
        assert!(page.contains("All Posts (1)"));
    }

    #[tokio::test]
    async fn posts_are_listed_newest_first() {
        let router = test_router().await;
        register(&router, "alice", "secret1").await;
        let session = login(&router, "alice", "secret1").await;

        for body in ["title=P1&content=one", "title=P2&content=two", "title=P3&content=three"] {
            let response = router
                .clone()
                .oneshot(form_post("/", body, Some(&session)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let home = body_text(router.clone().oneshot(get("/", None)).await.unwrap()).await;
        let p1 = home.find("P1").expect("P1 must be listed");
        let p2 = home.find("P2").expect("P2 must be listed");
        let p3 = home.find("P3").expect("P3 must be listed");
        assert!(p3 < p2 && p2 < p1, "expected newest-first order");
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let router = test_router().await;
        register(&router, "alice", "secret1").await;

        let page = register(&router, "alice", "other-password").await;
        assert!(page.contains("Username already exists"));

        // only one account can log in with the original password
        login(&router, "alice", "secret1").await;
    }

    #[tokio::test]
    async fn registration_validation_messages_in_order() {
        let router = test_router().await;

        let page = register(&router, "alice", "").await;
        assert!(page.contains("All fields are required"));

        let response = router
            .clone()
            .oneshot(form_post(
                "/register",
                "username=alice&password=secret1&confirm_password=different",
                None,
            ))
            .await
            .unwrap();
        assert!(body_text(response).await.contains("Passwords do not match"));

        let page = register(&router, "alice", "short").await;
        assert!(page.contains("Password must be at least 6 characters"));

        // failed attempts preserve the username field
        assert!(page.contains("value=\"alice\""));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_read_the_same() {
        let router = test_router().await;
        register(&router, "alice", "secret1").await;

        let unknown = router
            .clone()
            .oneshot(form_post("/login", "username=nobody&password=secret1", None))
            .await
            .unwrap();
        assert_eq!(unknown.status(), StatusCode::OK);
        let unknown = body_text(unknown).await;

        let wrong = router
            .clone()
            .oneshot(form_post("/login", "username=alice&password=wrong66", None))
            .await
            .unwrap();
        assert_eq!(wrong.status(), StatusCode::OK);
        let wrong = body_text(wrong).await;

        assert!(unknown.contains("Invalid username or password"));
        assert_eq!(unknown, wrong);
    }

    #[tokio::test]
    async fn unauthenticated_post_inserts_nothing() {
        let router = test_router().await;

        let response = router
            .clone()
            .oneshot(form_post("/", "title=Sneaky&content=Nope", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let page = body_text(response).await;
        assert!(page.contains("You must be logged in to create posts"));
        assert!(page.contains("All Posts (0)"));
    }

    #[tokio::test]
    async fn whitespace_only_title_is_rejected() {
        let router = test_router().await;
        register(&router, "alice", "secret1").await;
        let session = login(&router, "alice", "secret1").await;

        // '+' decodes to a space in form bodies
        let response = router
            .clone()
            .oneshot(form_post("/", "title=++&content=body", Some(&session)))
            .await
            .unwrap();
        let page = body_text(response).await;
        assert!(page.contains("Title and content are required"));
        assert!(page.contains("All Posts (0)"));
    }

    #[tokio::test]
    async fn authenticated_users_are_redirected_off_auth_pages() {
        let router = test_router().await;
        register(&router, "alice", "secret1").await;
        let session = login(&router, "alice", "secret1").await;

        for uri in ["/login", "/register"] {
            let response = router
                .clone()
                .oneshot(get(uri, Some(&session)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            assert_eq!(response.headers().get(LOCATION).unwrap(), "/");
        }
    }

    #[tokio::test]
    async fn posted_markup_is_escaped() {
        let router = test_router().await;
        register(&router, "alice", "secret1").await;
        let session = login(&router, "alice", "secret1").await;

        let response = router
            .clone()
            .oneshot(form_post(
                "/",
                "title=%3Cscript%3Ealert(1)%3C%2Fscript%3E&content=line1%0Aline2",
                Some(&session),
            ))
            .await
            .unwrap();
        let page = body_text(response).await;
        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(page.contains("line1<br>\nline2"));
    }
}
