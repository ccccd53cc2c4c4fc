//! Terminal Error Chain
//!
//! Two stages close the request pipeline. `not_found` is the router
//! fallback for paths no route matched. `render_error_page` rewrites
//! any response carrying an [`ErrorContext`] into the `error` view, so
//! the normalized `{statusCode, message}` body reaches the user as a
//! page instead of raw JSON. Handler-level flash redirects never carry
//! the context and pass through untouched.

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderValue, Request, header};
use axum::middleware::Next;
use axum::response::Response;
use serde_json::json;
use std::sync::Arc;

use kernel::error::app_error::{AppError, ErrorContext};
use kernel::render::Renderer;

/// Fallback for requests no route matched
pub async fn not_found() -> AppError {
    AppError::not_found("Page Not Found")
}

/// Rewrite error responses into the rendered error view
pub async fn render_error_page(
    State(renderer): State<Arc<dyn Renderer>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let response = next.run(req).await;

    let Some(context) = response.extensions().get::<ErrorContext>().cloned() else {
        return response;
    };

    let data = json!({
        "statusCode": context.status_code,
        "message": context.message,
    });

    let html = match renderer.render("error", data) {
        Ok(html) => html,
        Err(error) => {
            // The JSON body is still a valid answer; failing the
            // failure path would lose it
            tracing::error!(error = %error, "Failed to render the error page");
            return response;
        }
    };

    // Swap the body only. Status and headers stay, the session cookie
    // may already be on the response.
    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    Response::from_parts(parts, Body::from(html))
}
