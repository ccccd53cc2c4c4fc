//! Create Review Use Case

use std::sync::Arc;

use auth::models::UserId;
use kernel::id::ListingId;

use crate::domain::entity::review::Review;
use crate::domain::repository::{ListingRepository, ReviewRepository};
use crate::domain::value_object::rating::Rating;
use crate::error::{ListingsError, ListingsResult};

/// Create review input
pub struct CreateReviewInput {
    pub listing_id: ListingId,
    pub author_id: UserId,
    pub rating: Rating,
    pub comment: String,
}

/// Create review use case
///
/// Any authenticated user may review any listing, their own included.
pub struct CreateReviewUseCase<L, R>
where
    L: ListingRepository,
    R: ReviewRepository,
{
    listings: Arc<L>,
    reviews: Arc<R>,
}

impl<L, R> CreateReviewUseCase<L, R>
where
    L: ListingRepository,
    R: ReviewRepository,
{
    pub fn new(listings: Arc<L>, reviews: Arc<R>) -> Self {
        Self { listings, reviews }
    }

    pub async fn execute(&self, input: CreateReviewInput) -> ListingsResult<Review> {
        // The parent must exist; reviews never dangle
        let listing = self
            .listings
            .find_by_id(input.listing_id)
            .await?
            .ok_or(ListingsError::ListingNotFound)?;

        let review = Review::new(
            listing.listing_id,
            input.author_id,
            input.rating,
            input.comment,
        );
        self.reviews.create_review(&review).await?;

        tracing::info!(
            review_id = %review.review_id,
            listing_id = %listing.listing_id,
            "Review created"
        );

        Ok(review)
    }
}
