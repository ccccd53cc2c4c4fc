//! Session Middleware
//!
//! `attach_session` runs on every request: it restores the session from
//! the cookie token, exposes it through [`SessionCtx`] and [`AuthState`]
//! extensions, and persists changes after the handler. `require_auth`
//! guards protected routes, stashing the attempted URL so the login
//! flow can send the user back where they were headed.

use axum::body::Body;
use axum::extract::{OriginalUri, State};
use axum::http::{header, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::restore_session::{RestoreSessionUseCase, RestoredSession};
use crate::application::session_token::issue_session_token;
use crate::domain::auth_state::AuthState;
use crate::domain::entity::session::Session;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::presentation::context::{SessionCtx, SessionOutcome};

/// Flash shown when an anonymous user hits a protected route
pub const LOGIN_REQUIRED_MESSAGE: &str = "You must be logged in!";

/// Session middleware state
#[derive(Clone)]
pub struct SessionMiddlewareState<R>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// Middleware that attaches a session to every request
pub async fn attach_session<R>(
    State(state): State<SessionMiddlewareState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let token =
        platform::cookie::extract_cookie(req.headers(), &state.config.session_cookie_name);

    let use_case = RestoreSessionUseCase::new(state.repo.clone(), state.config.clone());
    let restored = match use_case.execute(token.as_deref()).await {
        Ok(restored) => restored,
        Err(error) => {
            // Not even an anonymous session could be created; without a
            // session the rest of the pipeline cannot run.
            tracing::error!(error = %error, "Failed to establish a session");
            return error.into_response();
        }
    };

    let RestoredSession {
        session,
        auth,
        is_new,
    } = restored;

    // Issue the cookie up front; it is only attached if the handler
    // does not replace the session with its own.
    let new_cookie = is_new.then(|| {
        let token = issue_session_token(&state.config, session.session_id);
        platform::cookie::set_cookie_header(&state.config.cookie_config(), &token)
    });

    let ctx = SessionCtx::new(session);
    req.extensions_mut().insert(ctx.clone());
    req.extensions_mut().insert(auth);

    let mut response = next.run(req).await;

    match ctx.outcome() {
        SessionOutcome::Discarded => {
            // Login/signup rotated the session and set its own cookie
            return response;
        }
        SessionOutcome::Dirty(session) => {
            if let Err(error) = state.repo.save_session(&session).await {
                tracing::error!(
                    error = %error,
                    session_id = %session.session_id,
                    "Failed to persist session"
                );
            }
        }
        SessionOutcome::Clean(session) => {
            touch_if_idle(&state, &session).await;
        }
    }

    if let Some(cookie) = new_cookie {
        response.headers_mut().append(header::SET_COOKIE, cookie);
    }

    response
}

/// Middleware that requires an authenticated user
///
/// Must run inside `attach_session` so the stashed redirect target and
/// the flash survive into the next request.
pub async fn require_auth(req: Request<Body>, next: Next) -> Result<Response, Response> {
    let authenticated = req
        .extensions()
        .get::<AuthState>()
        .is_some_and(AuthState::is_authenticated);

    if authenticated {
        return Ok(next.run(req).await);
    }

    if let Some(ctx) = req.extensions().get::<SessionCtx>() {
        ctx.set_return_to(attempted_url(&req));
        ctx.flash_error(LOGIN_REQUIRED_MESSAGE);
    }

    Err(Redirect::to("/login").into_response())
}

/// Refresh activity on unmodified sessions, at most once per threshold
/// window.
async fn touch_if_idle<R>(state: &SessionMiddlewareState<R>, session: &Session)
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    if !session.needs_touch(state.config.touch_threshold()) {
        return;
    }

    let expires_at_ms = Session::expiry_after(state.config.session_ttl());
    if let Err(error) = state
        .repo
        .touch_session(session.session_id, expires_at_ms)
        .await
    {
        tracing::error!(
            error = %error,
            session_id = %session.session_id,
            "Failed to touch session"
        );
    }
}

/// Full path and query of the request, preferring the pre-nesting URI
fn attempted_url(req: &Request<Body>) -> String {
    let uri = req
        .extensions()
        .get::<OriginalUri>()
        .map(|original| original.0.clone())
        .unwrap_or_else(|| req.uri().clone());

    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}
