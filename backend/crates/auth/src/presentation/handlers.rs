//! HTTP Handlers

use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Extension, Form};
use serde_json::json;
use std::sync::Arc;

use kernel::render::Renderer;

use crate::application::config::AuthConfig;
use crate::application::{SignInInput, SignInUseCase, SignUpInput, SignUpUseCase};
use crate::domain::entity::session::SessionData;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::verifier::PasswordVerifier;
use crate::error::{AuthError, AuthResult};
use crate::presentation::context::SessionCtx;
use crate::presentation::dto::{SignInRequest, SignUpRequest};

/// Where users land after signup, login and logout
const AFTER_AUTH_REDIRECT: &str = "/listings";

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub renderer: Arc<dyn Renderer>,
}

// ============================================================================
// Sign Up
// ============================================================================

/// GET /signup
pub async fn signup_page<R>(
    State(state): State<AuthAppState<R>>,
    Extension(ctx): Extension<SessionCtx>,
) -> AuthResult<Html<String>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let flash = ctx.drain_flash();
    let body = state.renderer.render(
        "users/signup",
        json!({ "success": flash.success, "error": flash.error }),
    )?;

    Ok(Html(body))
}

/// POST /signup
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    Extension(ctx): Extension<SessionCtx>,
    Form(req): Form<SignUpRequest>,
) -> AuthResult<Response>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let mut initial_data = SessionData::default();
    initial_data.flash.push_success("Welcome!");

    let input = SignUpInput {
        user_name: req.username,
        password: req.password,
        initial_data,
        previous_session: Some(ctx.session_id()),
    };

    match use_case.execute(input).await {
        Ok(output) => {
            ctx.discard();
            let cookie = platform::cookie::set_cookie_header(
                &state.config.cookie_config(),
                &output.session_token,
            );
            Ok((
                [(header::SET_COOKIE, cookie)],
                Redirect::to(AFTER_AUTH_REDIRECT),
            )
                .into_response())
        }
        Err(error) if error.status_code().is_server_error() => Err(error),
        Err(error) => {
            // Validation problems come back to the form as a flash
            tracing::debug!(error = %error, "Signup rejected");
            ctx.flash_error(error.to_string());
            Ok(Redirect::to("/signup").into_response())
        }
    }
}

// ============================================================================
// Sign In
// ============================================================================

/// GET /login
pub async fn login_page<R>(
    State(state): State<AuthAppState<R>>,
    Extension(ctx): Extension<SessionCtx>,
) -> AuthResult<Html<String>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let flash = ctx.drain_flash();
    let body = state.renderer.render(
        "users/login",
        json!({ "success": flash.success, "error": flash.error }),
    )?;

    Ok(Html(body))
}

/// POST /login
pub async fn sign_in<R>(
    State(state): State<AuthAppState<R>>,
    Extension(ctx): Extension<SessionCtx>,
    Form(req): Form<SignInRequest>,
) -> AuthResult<Response>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let verifier = Arc::new(PasswordVerifier::new(
        state.repo.clone(),
        state.config.password_pepper.clone(),
    ));
    let use_case = SignInUseCase::new(verifier, state.repo.clone(), state.config.clone());

    let mut initial_data = SessionData::default();
    initial_data.flash.push_success("Welcome back!");

    let input = SignInInput {
        user_name: req.username,
        password: req.password,
        initial_data,
        previous_session: Some(ctx.session_id()),
    };

    match use_case.execute(input).await {
        Ok(output) => {
            // The stashed URL wins over the default landing page and is
            // gone after this read
            let target = ctx
                .take_return_to()
                .unwrap_or_else(|| AFTER_AUTH_REDIRECT.to_string());
            ctx.discard();
            let cookie = platform::cookie::set_cookie_header(
                &state.config.cookie_config(),
                &output.session_token,
            );
            Ok(([(header::SET_COOKIE, cookie)], Redirect::to(&target)).into_response())
        }
        Err(error @ (AuthError::UnknownUser | AuthError::InvalidCredential)) => {
            // The flash path skips the IntoResponse logging, so record
            // the rejection here; the Debug form keeps the variants
            // apart for operators while the user-facing text does not
            tracing::warn!(error = ?error, "Login attempt rejected");
            ctx.flash_error(error.to_string());
            Ok(Redirect::to("/login").into_response())
        }
        Err(error) => Err(error),
    }
}

// ============================================================================
// Sign Out
// ============================================================================

/// GET /logout
///
/// Drops the user claim but keeps the session row, so the goodbye
/// flash can ride the same cookie.
pub async fn sign_out(Extension(ctx): Extension<SessionCtx>) -> Redirect {
    ctx.clear_identity();
    ctx.flash_success("You are logged out!");
    Redirect::to(AFTER_AUTH_REDIRECT)
}
