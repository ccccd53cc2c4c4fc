//! API Server Entry Point
//!
//! Wires the auth and listings routers, the session and error-page
//! middleware and the shared infrastructure, then serves.
//! Startup failures use `anyhow`; request-path failures stay in
//! `kernel::error::AppError`.

mod error_pages;
mod render;

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use auth::domain::repository::SessionRepository;
use auth::{AuthConfig, PgAuthRepository, SessionMiddlewareState, attach_session, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
    middleware,
};
use kernel::render::Renderer;
use listings::{DiskImageStore, ListingsConfig, PgListingsRepository, listings_router};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::render::HtmlRenderer;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,listings=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn connect_database() -> anyhow::Result<PgPool> {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;
    tracing::info!("Migrations completed");

    Ok(pool)
}

/// Sweep expired session rows once at startup. Failure is logged and
/// otherwise ignored; the server still comes up.
async fn sweep_expired_sessions(repo: &PgAuthRepository) {
    match repo.cleanup_expired().await {
        Ok(sessions) => {
            tracing::info!(sessions_deleted = sessions, "Session cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Session cleanup failed, continuing anyway");
        }
    }
}

/// Session settings. Development runs on a throwaway secret; release
/// requires SESSION_SECRET (base64, 32 bytes decoded) so tokens survive
/// restarts.
fn load_auth_config() -> anyhow::Result<AuthConfig> {
    if cfg!(debug_assertions) {
        return Ok(AuthConfig::development());
    }

    let secret_b64 = env::var("SESSION_SECRET").expect("SESSION_SECRET must be set in production");
    let secret_bytes = platform::crypto::from_base64(&secret_b64)?;
    anyhow::ensure!(
        secret_bytes.len() == 32,
        "SESSION_SECRET must decode to exactly 32 bytes"
    );

    let mut secret = [0u8; 32];
    secret.copy_from_slice(&secret_bytes);
    Ok(AuthConfig {
        session_secret: secret,
        ..AuthConfig::default()
    })
}

fn cors_from_env() -> CorsLayer {
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:5173,http://127.0.0.1:5173".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let pool = connect_database().await?;

    let auth_repo = PgAuthRepository::new(pool.clone());
    sweep_expired_sessions(&auth_repo).await;

    let auth_config = Arc::new(load_auth_config()?);

    // Upload directory, created up front so the first request never
    // races the filesystem
    let listings_config = Arc::new(ListingsConfig {
        upload_dir: env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("uploads")),
        ..ListingsConfig::default()
    });
    let image_store = DiskImageStore::new(&listings_config);
    image_store.ensure_dir().await?;

    let listings_repo = PgListingsRepository::new(pool.clone());

    // Every page, including the error page, goes through this seam
    let renderer: Arc<dyn Renderer> = Arc::new(HtmlRenderer);

    // One session layer over the whole route tree, so auth and listings
    // see the same session per request
    let session_state = SessionMiddlewareState {
        repo: Arc::new(auth_repo.clone()),
        config: auth_config.clone(),
    };

    // Uploaded images are served outside the session layer; image
    // fetches never touch the session store.
    let app = Router::new()
        .merge(auth_router(auth_repo, auth_config, renderer.clone()))
        .nest(
            "/listings",
            listings_router(
                listings_repo,
                image_store,
                listings_config.clone(),
                renderer.clone(),
            ),
        )
        .fallback(error_pages::not_found)
        .layer(middleware::from_fn_with_state(
            session_state,
            attach_session::<PgAuthRepository>,
        ))
        .nest_service("/uploads", ServeDir::new(&listings_config.upload_dir))
        .layer(middleware::from_fn_with_state(
            renderer,
            error_pages::render_error_page,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_from_env());

    let addr: SocketAddr = env::var("SERVER_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
