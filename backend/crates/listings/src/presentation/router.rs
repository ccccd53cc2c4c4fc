//! Listings Router

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post, put};
use axum::{middleware, Router};
use std::sync::Arc;

use auth::middleware::require_auth;
use kernel::render::Renderer;

use crate::application::config::ListingsConfig;
use crate::domain::repository::{ListingRepository, ReviewRepository};
use crate::domain::storage::ImageStore;
use crate::infra::image_store::DiskImageStore;
use crate::infra::postgres::PgListingsRepository;
use crate::presentation::handlers::{self, ListingsAppState};

/// Create the Listings router backed by PostgreSQL and disk storage
///
/// Callers nest this under `/listings` and layer the session middleware
/// over the whole route tree; the routes here only assume `SessionCtx`
/// and `AuthState` extensions are present.
pub fn listings_router(
    repo: PgListingsRepository,
    images: DiskImageStore,
    config: Arc<ListingsConfig>,
    renderer: Arc<dyn Renderer>,
) -> Router {
    listings_router_generic(repo, images, config, renderer)
}

/// Create a generic Listings router for any repository and image store
pub fn listings_router_generic<L, I>(
    repo: L,
    images: I,
    config: Arc<ListingsConfig>,
    renderer: Arc<dyn Renderer>,
) -> Router
where
    L: ListingRepository + ReviewRepository + Clone + Send + Sync + 'static,
    I: ImageStore + Clone + Send + Sync + 'static,
{
    let state = ListingsAppState {
        repo: Arc::new(repo),
        images: Arc::new(images),
        renderer,
    };

    // Uploads ride on the mutating routes, so the body limit only
    // applies behind the login gate.
    let protected = Router::new()
        .route("/new", get(handlers::new_form::<L, I>))
        .route("/", post(handlers::create::<L, I>))
        .route("/{id}/edit", get(handlers::edit_form::<L, I>))
        .route(
            "/{id}",
            put(handlers::update::<L, I>).delete(handlers::destroy::<L, I>),
        )
        .route("/{id}/reviews", post(handlers::create_review::<L, I>))
        .route(
            "/{id}/reviews/{review_id}",
            delete(handlers::destroy_review::<L, I>),
        )
        .route_layer(middleware::from_fn(require_auth))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes));

    Router::new()
        .route("/", get(handlers::index::<L, I>))
        .route("/{id}", get(handlers::show::<L, I>))
        .merge(protected)
        .with_state(state)
}
