//! HTTP Handlers
//!
//! Listing pages render through the shared template renderer; failures
//! a visitor can cause (missing listing, denied mutation, bad form
//! input) are recovered into a flash + redirect rather than an error
//! page. Anything unexpected propagates into the error chain.

use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Extension, Form};
use serde_json::json;
use uuid::Uuid;

use auth::models::UserId;
use auth::{AuthState, SessionCtx};
use kernel::id::{ListingId, ReviewId};
use kernel::render::Renderer;

use crate::application::{
    CreateListingInput, CreateListingUseCase, CreateReviewInput, CreateReviewUseCase,
    DeleteListingUseCase, DeleteReviewInput, DeleteReviewUseCase, EditListingUseCase,
    ListListingsUseCase, ShowListingUseCase, UpdateListingInput, UpdateListingUseCase,
};
use crate::domain::repository::{ListingRepository, ReviewRepository};
use crate::domain::storage::ImageStore;
use crate::domain::value_object::rating::Rating;
use crate::error::{ListingsError, ListingsResult};
use crate::presentation::dto::{parse_listing_form, ListingView, ReviewRequest, ReviewView};

/// Shared state for listings handlers
#[derive(Clone)]
pub struct ListingsAppState<L, I>
where
    L: ListingRepository + ReviewRepository + Clone + Send + Sync + 'static,
    I: ImageStore + Clone + Send + Sync + 'static,
{
    pub repo: Arc<L>,
    pub images: Arc<I>,
    pub renderer: Arc<dyn Renderer>,
}

// ============================================================================
// Shared helpers
// ============================================================================

/// The verified identity attached by the session middleware. The route
/// guard runs first, so a miss here means a wiring mistake, but it is
/// still answered with a denial rather than a panic.
fn current_user_id(auth: &AuthState) -> ListingsResult<UserId> {
    auth.user()
        .map(|user| user.user_id)
        .ok_or(ListingsError::AuthorizationDenied)
}

/// An id that does not even parse can never resolve, so it gets the
/// same soft treatment as a missing row.
fn parse_listing_id(raw: &str) -> ListingsResult<ListingId> {
    Uuid::parse_str(raw)
        .map(ListingId::from_uuid)
        .map_err(|_| ListingsError::ListingNotFound)
}

fn parse_review_id(raw: &str) -> ListingsResult<ReviewId> {
    Uuid::parse_str(raw)
        .map(ReviewId::from_uuid)
        .map_err(|_| ListingsError::ReviewNotFound)
}

fn listing_page(listing_id: ListingId) -> String {
    format!("/listings/{listing_id}")
}

/// Recover a visitor-caused failure into a flash + redirect. A missing
/// listing sends them to the index; anything scoped to one listing
/// sends them to that listing's page. Server errors pass through.
fn soft_fail(
    ctx: &SessionCtx,
    error: ListingsError,
    listing_target: &str,
) -> ListingsResult<Response> {
    match error {
        ListingsError::ListingNotFound => {
            ctx.flash_error(error.to_string());
            Ok(Redirect::to("/listings").into_response())
        }
        ListingsError::ReviewNotFound | ListingsError::AuthorizationDenied => {
            ctx.flash_error(error.to_string());
            Ok(Redirect::to(listing_target).into_response())
        }
        other => Err(other),
    }
}

// ============================================================================
// Listing pages
// ============================================================================

/// GET /listings
pub async fn index<L, I>(
    State(state): State<ListingsAppState<L, I>>,
    Extension(ctx): Extension<SessionCtx>,
) -> ListingsResult<Html<String>>
where
    L: ListingRepository + ReviewRepository + Clone + Send + Sync + 'static,
    I: ImageStore + Clone + Send + Sync + 'static,
{
    let listings = ListListingsUseCase::new(state.repo.clone()).execute().await?;

    let flash = ctx.drain_flash();
    let body = state.renderer.render(
        "listings/index",
        json!({
            "listings": listings.iter().map(ListingView::from_listing).collect::<Vec<_>>(),
            "success": flash.success,
            "error": flash.error,
        }),
    )?;

    Ok(Html(body))
}

/// GET /listings/new
pub async fn new_form<L, I>(
    State(state): State<ListingsAppState<L, I>>,
    Extension(ctx): Extension<SessionCtx>,
) -> ListingsResult<Html<String>>
where
    L: ListingRepository + ReviewRepository + Clone + Send + Sync + 'static,
    I: ImageStore + Clone + Send + Sync + 'static,
{
    let flash = ctx.drain_flash();
    let body = state.renderer.render(
        "listings/new",
        json!({ "success": flash.success, "error": flash.error }),
    )?;

    Ok(Html(body))
}

/// POST /listings
pub async fn create<L, I>(
    State(state): State<ListingsAppState<L, I>>,
    Extension(ctx): Extension<SessionCtx>,
    Extension(auth): Extension<AuthState>,
    multipart: Multipart,
) -> ListingsResult<Response>
where
    L: ListingRepository + ReviewRepository + Clone + Send + Sync + 'static,
    I: ImageStore + Clone + Send + Sync + 'static,
{
    let owner_id = current_user_id(&auth)?;

    let form = match parse_listing_form(multipart).await {
        Ok(form) => form,
        Err(error @ ListingsError::Validation(_)) => {
            ctx.flash_error(error.to_string());
            return Ok(Redirect::to("/listings/new").into_response());
        }
        Err(error) => return Err(error),
    };

    let use_case = CreateListingUseCase::new(state.repo.clone(), state.images.clone());
    let input = CreateListingInput {
        owner_id,
        title: form.title,
        description: form.description,
        price: form.price,
        location: form.location,
        image: form.image,
    };

    match use_case.execute(input).await {
        Ok(listing) => {
            ctx.flash_success("Successfully created a new listing!");
            Ok(Redirect::to(&listing_page(listing.listing_id)).into_response())
        }
        Err(error @ ListingsError::MissingImage) => {
            ctx.flash_error(error.to_string());
            Ok(Redirect::to("/listings/new").into_response())
        }
        Err(error) => Err(error),
    }
}

/// GET /listings/{id}
pub async fn show<L, I>(
    State(state): State<ListingsAppState<L, I>>,
    Extension(ctx): Extension<SessionCtx>,
    Path(id): Path<String>,
) -> ListingsResult<Response>
where
    L: ListingRepository + ReviewRepository + Clone + Send + Sync + 'static,
    I: ImageStore + Clone + Send + Sync + 'static,
{
    let listing_id = match parse_listing_id(&id) {
        Ok(listing_id) => listing_id,
        Err(error) => return soft_fail(&ctx, error, "/listings"),
    };

    let detail = match ShowListingUseCase::new(state.repo.clone()).execute(listing_id).await {
        Ok(detail) => detail,
        Err(error) => return soft_fail(&ctx, error, "/listings"),
    };

    let flash = ctx.drain_flash();
    let body = state.renderer.render(
        "listings/show",
        json!({
            "listing": ListingView::from_listing(&detail.listing),
            "owner_name": detail.owner_name,
            "reviews": detail.reviews.iter().map(ReviewView::from_review).collect::<Vec<_>>(),
            "success": flash.success,
            "error": flash.error,
        }),
    )?;

    Ok(Html(body).into_response())
}

/// GET /listings/{id}/edit
pub async fn edit_form<L, I>(
    State(state): State<ListingsAppState<L, I>>,
    Extension(ctx): Extension<SessionCtx>,
    Extension(auth): Extension<AuthState>,
    Path(id): Path<String>,
) -> ListingsResult<Response>
where
    L: ListingRepository + ReviewRepository + Clone + Send + Sync + 'static,
    I: ImageStore + Clone + Send + Sync + 'static,
{
    let listing_target = format!("/listings/{id}");

    let listing_id = match parse_listing_id(&id) {
        Ok(listing_id) => listing_id,
        Err(error) => return soft_fail(&ctx, error, &listing_target),
    };
    let actor = match current_user_id(&auth) {
        Ok(actor) => actor,
        Err(error) => return soft_fail(&ctx, error, &listing_target),
    };

    let listing = match EditListingUseCase::new(state.repo.clone())
        .execute(listing_id, actor)
        .await
    {
        Ok(listing) => listing,
        Err(error) => return soft_fail(&ctx, error, &listing_target),
    };

    let flash = ctx.drain_flash();
    let body = state.renderer.render(
        "listings/edit",
        json!({
            "listing": ListingView::from_listing(&listing),
            "success": flash.success,
            "error": flash.error,
        }),
    )?;

    Ok(Html(body).into_response())
}

/// PUT /listings/{id}
pub async fn update<L, I>(
    State(state): State<ListingsAppState<L, I>>,
    Extension(ctx): Extension<SessionCtx>,
    Extension(auth): Extension<AuthState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> ListingsResult<Response>
where
    L: ListingRepository + ReviewRepository + Clone + Send + Sync + 'static,
    I: ImageStore + Clone + Send + Sync + 'static,
{
    let listing_target = format!("/listings/{id}");
    let actor = current_user_id(&auth)?;

    let form = match parse_listing_form(multipart).await {
        Ok(form) => form,
        Err(error @ ListingsError::Validation(_)) => {
            ctx.flash_error(error.to_string());
            return Ok(Redirect::to(&format!("/listings/{id}/edit")).into_response());
        }
        Err(error) => return Err(error),
    };
    let (fields, image) = form.into_update();

    let listing_id = match parse_listing_id(&id) {
        Ok(listing_id) => listing_id,
        Err(error) => return soft_fail(&ctx, error, &listing_target),
    };

    let use_case = UpdateListingUseCase::new(state.repo.clone(), state.images.clone());
    let input = UpdateListingInput {
        listing_id,
        actor,
        fields,
        image,
    };

    match use_case.execute(input).await {
        Ok(listing) => {
            ctx.flash_success("Successfully updated the listing!");
            Ok(Redirect::to(&listing_page(listing.listing_id)).into_response())
        }
        Err(error) => soft_fail(&ctx, error, &listing_target),
    }
}

/// DELETE /listings/{id}
pub async fn destroy<L, I>(
    State(state): State<ListingsAppState<L, I>>,
    Extension(ctx): Extension<SessionCtx>,
    Extension(auth): Extension<AuthState>,
    Path(id): Path<String>,
) -> ListingsResult<Response>
where
    L: ListingRepository + ReviewRepository + Clone + Send + Sync + 'static,
    I: ImageStore + Clone + Send + Sync + 'static,
{
    let listing_target = format!("/listings/{id}");

    let listing_id = match parse_listing_id(&id) {
        Ok(listing_id) => listing_id,
        Err(error) => return soft_fail(&ctx, error, &listing_target),
    };
    let actor = match current_user_id(&auth) {
        Ok(actor) => actor,
        Err(error) => return soft_fail(&ctx, error, &listing_target),
    };

    match DeleteListingUseCase::new(state.repo.clone())
        .execute(listing_id, actor)
        .await
    {
        Ok(()) => {
            ctx.flash_success("Successfully deleted the listing!");
            Ok(Redirect::to("/listings").into_response())
        }
        Err(error) => soft_fail(&ctx, error, &listing_target),
    }
}

// ============================================================================
// Review pages
// ============================================================================

/// POST /listings/{id}/reviews
pub async fn create_review<L, I>(
    State(state): State<ListingsAppState<L, I>>,
    Extension(ctx): Extension<SessionCtx>,
    Extension(auth): Extension<AuthState>,
    Path(id): Path<String>,
    Form(req): Form<ReviewRequest>,
) -> ListingsResult<Response>
where
    L: ListingRepository + ReviewRepository + Clone + Send + Sync + 'static,
    I: ImageStore + Clone + Send + Sync + 'static,
{
    let listing_target = format!("/listings/{id}");

    let rating = match Rating::new(req.rating) {
        Ok(rating) => rating,
        Err(error) => {
            ctx.flash_error(error.to_string());
            return Ok(Redirect::to(&listing_target).into_response());
        }
    };

    let listing_id = match parse_listing_id(&id) {
        Ok(listing_id) => listing_id,
        Err(error) => return soft_fail(&ctx, error, &listing_target),
    };
    let author_id = match current_user_id(&auth) {
        Ok(author_id) => author_id,
        Err(error) => return soft_fail(&ctx, error, &listing_target),
    };

    let use_case = CreateReviewUseCase::new(state.repo.clone(), state.repo.clone());
    let input = CreateReviewInput {
        listing_id,
        author_id,
        rating,
        comment: req.comment,
    };

    match use_case.execute(input).await {
        Ok(review) => {
            ctx.flash_success("Successfully created a new review!");
            Ok(Redirect::to(&listing_page(review.listing_id)).into_response())
        }
        Err(error) => soft_fail(&ctx, error, &listing_target),
    }
}

/// DELETE /listings/{id}/reviews/{review_id}
pub async fn destroy_review<L, I>(
    State(state): State<ListingsAppState<L, I>>,
    Extension(ctx): Extension<SessionCtx>,
    Extension(auth): Extension<AuthState>,
    Path((id, review_id)): Path<(String, String)>,
) -> ListingsResult<Response>
where
    L: ListingRepository + ReviewRepository + Clone + Send + Sync + 'static,
    I: ImageStore + Clone + Send + Sync + 'static,
{
    let listing_target = format!("/listings/{id}");

    let listing_id = match parse_listing_id(&id) {
        Ok(listing_id) => listing_id,
        Err(error) => return soft_fail(&ctx, error, &listing_target),
    };
    let review_id = match parse_review_id(&review_id) {
        Ok(review_id) => review_id,
        Err(error) => return soft_fail(&ctx, error, &listing_target),
    };
    let actor = match current_user_id(&auth) {
        Ok(actor) => actor,
        Err(error) => return soft_fail(&ctx, error, &listing_target),
    };

    let use_case = DeleteReviewUseCase::new(state.repo.clone(), state.repo.clone());
    let input = DeleteReviewInput {
        listing_id,
        review_id,
        actor,
    };

    match use_case.execute(input).await {
        Ok(()) => {
            ctx.flash_success("Successfully deleted the review!");
            Ok(Redirect::to(&listing_target).into_response())
        }
        Err(error) => soft_fail(&ctx, error, &listing_target),
    }
}
