//! Auth Router

use axum::{middleware, routing::get, Router};
use std::sync::Arc;

use kernel::render::Renderer;

use crate::application::config::AuthConfig;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_auth;

/// Create the Auth router with PostgreSQL repository
///
/// The session middleware is not applied here; the application layers
/// it over the whole route tree so every crate sees the same session.
pub fn auth_router(
    repo: PgAuthRepository,
    config: Arc<AuthConfig>,
    renderer: Arc<dyn Renderer>,
) -> Router {
    auth_router_generic(repo, config, renderer)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(
    repo: R,
    config: Arc<AuthConfig>,
    renderer: Arc<dyn Renderer>,
) -> Router
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config,
        renderer,
    };

    let protected = Router::new()
        .route("/logout", get(handlers::sign_out))
        .route_layer(middleware::from_fn(require_auth));

    Router::new()
        .route(
            "/signup",
            get(handlers::signup_page::<R>).post(handlers::sign_up::<R>),
        )
        .route(
            "/login",
            get(handlers::login_page::<R>).post(handlers::sign_in::<R>),
        )
        .merge(protected)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::session_token::{issue_session_token, parse_session_token};
    use crate::domain::entity::session::SessionData;
    use crate::presentation::middleware::{attach_session, SessionMiddlewareState};
    use crate::test_support::{registered_user, InMemoryAuthRepo, StubRenderer};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use tower::ServiceExt;

    const PASSWORD: &str = "correct-horse-battery";

    fn test_stack(repo: &InMemoryAuthRepo) -> (Router, Arc<AuthConfig>) {
        let config = Arc::new(AuthConfig::development());
        let session_state = SessionMiddlewareState {
            repo: Arc::new(repo.clone()),
            config: config.clone(),
        };
        let app = auth_router_generic(repo.clone(), config.clone(), Arc::new(StubRenderer)).layer(
            middleware::from_fn_with_state(session_state, attach_session::<InMemoryAuthRepo>),
        );
        (app, config)
    }

    fn form_post(path: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, format!("session={cookie}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_request(path: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, format!("session={cookie}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .expect("redirect should carry a Location header")
            .to_str()
            .unwrap()
    }

    fn issued_token(response: &Response) -> String {
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("response should carry a session cookie")
            .to_str()
            .unwrap();
        cookie
            .split(';')
            .next()
            .and_then(|pair| pair.strip_prefix("session="))
            .expect("cookie should be the session token")
            .to_string()
    }

    #[tokio::test]
    async fn test_signup_creates_account_and_starts_a_session() {
        let repo = InMemoryAuthRepo::new();
        let (app, config) = test_stack(&repo);

        let response = app
            .oneshot(form_post(
                "/signup",
                &format!("username=YelpFan&password={PASSWORD}"),
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/listings");
        assert_eq!(repo.user_count(), 1);

        // The only session left is the rotated one, bound to the new
        // user and greeting them
        let sessions = repo.sessions();
        assert_eq!(sessions.len(), 1);
        assert!(sessions[0].user_id.is_some());
        assert_eq!(sessions[0].data.flash.success, vec!["Welcome!"]);

        // And the cookie points at exactly that session
        let token = issued_token(&response);
        let session_id = parse_session_token(&config, &token).unwrap();
        assert_eq!(session_id, sessions[0].session_id);
    }

    #[tokio::test]
    async fn test_signup_with_taken_name_flashes_back_to_the_form() {
        let repo = InMemoryAuthRepo::new();
        registered_user(&repo, "yelpfan", PASSWORD);
        let (app, _) = test_stack(&repo);

        let response = app
            .oneshot(form_post(
                "/signup",
                &format!("username=YelpFan&password={PASSWORD}"),
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/signup");
        assert_eq!(repo.user_count(), 1);

        // The message waits on the visitor's anonymous session
        let sessions = repo.sessions();
        assert_eq!(sessions.len(), 1);
        assert!(sessions[0].user_id.is_none());
        assert_eq!(
            sessions[0].data.flash.error,
            vec!["Username is already taken"]
        );
    }

    #[tokio::test]
    async fn test_login_returns_to_the_stashed_target() {
        let repo = InMemoryAuthRepo::new();
        let user = registered_user(&repo, "alice", PASSWORD);
        let (app, config) = test_stack(&repo);

        let data = SessionData {
            return_to: Some("/listings/xyz".to_string()),
            ..Default::default()
        };
        let anonymous = repo.seed_session(None, data);
        let token = issue_session_token(&config, anonymous.session_id);

        let response = app
            .oneshot(form_post(
                "/login",
                &format!("username=alice&password={PASSWORD}"),
                Some(&token),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/listings/xyz");

        // The anonymous session is retired in favour of a fresh one
        assert!(repo.session(anonymous.session_id).is_none());
        let sessions = repo.sessions();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].user_id, Some(user.user_id));
        assert_eq!(sessions[0].data.flash.success, vec!["Welcome back!"]);

        let new_token = issued_token(&response);
        let session_id = parse_session_token(&config, &new_token).unwrap();
        assert_eq!(session_id, sessions[0].session_id);
    }

    #[tokio::test]
    async fn test_failed_login_keeps_the_visitor_session() {
        let repo = InMemoryAuthRepo::new();
        registered_user(&repo, "alice", PASSWORD);
        let (app, config) = test_stack(&repo);

        let anonymous = repo.seed_anonymous_session();
        let token = issue_session_token(&config, anonymous.session_id);

        let response = app
            .oneshot(form_post(
                "/login",
                "username=alice&password=not-her-password",
                Some(&token),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
        // No rotation on failure
        assert!(response.headers().get(header::SET_COOKIE).is_none());

        let stored = repo.session(anonymous.session_id).unwrap();
        assert!(stored.user_id.is_none());
        assert_eq!(
            stored.data.flash.error,
            vec!["Invalid username or password"]
        );
    }

    #[tokio::test]
    async fn test_login_page_shows_the_flash_once() {
        let repo = InMemoryAuthRepo::new();
        let (app, config) = test_stack(&repo);

        let mut data = SessionData::default();
        data.flash.push_error("Invalid username or password");
        let session = repo.seed_session(None, data);
        let token = issue_session_token(&config, session.session_id);

        let response = app
            .oneshot(get_request("/login", Some(&token)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("users/login"));
        assert!(body.contains("Invalid username or password"));

        // Drained: a reload would render a clean page
        let stored = repo.session(session.session_id).unwrap();
        assert!(stored.data.flash.is_empty());
    }

    #[tokio::test]
    async fn test_logout_drops_the_claim_but_keeps_the_session() {
        let repo = InMemoryAuthRepo::new();
        let user = registered_user(&repo, "alice", PASSWORD);
        let (app, config) = test_stack(&repo);

        let session = repo.seed_session(Some(user.user_id), SessionData::default());
        let token = issue_session_token(&config, session.session_id);

        let response = app
            .oneshot(get_request("/logout", Some(&token)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/listings");

        let stored = repo.session(session.session_id).unwrap();
        assert!(stored.user_id.is_none());
        assert_eq!(stored.data.flash.success, vec!["You are logged out!"]);
    }

    #[tokio::test]
    async fn test_logout_requires_a_logged_in_user() {
        let repo = InMemoryAuthRepo::new();
        let (app, config) = test_stack(&repo);

        let session = repo.seed_anonymous_session();
        let token = issue_session_token(&config, session.session_id);

        let response = app
            .oneshot(get_request("/logout", Some(&token)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
        let stored = repo.session(session.session_id).unwrap();
        assert_eq!(stored.data.flash.error, vec!["You must be logged in!"]);
    }
}
