//! Delete Review Use Case

use std::sync::Arc;

use auth::models::UserId;
use kernel::id::{ListingId, ReviewId};

use crate::domain::repository::{ListingRepository, ReviewRepository};
use crate::domain::services::authorize_review_removal;
use crate::error::{ListingsError, ListingsResult};

/// Delete review input
pub struct DeleteReviewInput {
    pub listing_id: ListingId,
    pub review_id: ReviewId,
    pub actor: UserId,
}

/// Delete review use case
pub struct DeleteReviewUseCase<L, R>
where
    L: ListingRepository,
    R: ReviewRepository,
{
    listings: Arc<L>,
    reviews: Arc<R>,
}

impl<L, R> DeleteReviewUseCase<L, R>
where
    L: ListingRepository,
    R: ReviewRepository,
{
    pub fn new(listings: Arc<L>, reviews: Arc<R>) -> Self {
        Self { listings, reviews }
    }

    pub async fn execute(&self, input: DeleteReviewInput) -> ListingsResult<()> {
        let listing = self
            .listings
            .find_by_id(input.listing_id)
            .await?
            .ok_or(ListingsError::ListingNotFound)?;
        let review = self
            .reviews
            .find_review(input.review_id)
            .await?
            .ok_or(ListingsError::ReviewNotFound)?;

        // The URL nests the review under a listing; a mismatched pair
        // must not delete a review living elsewhere
        if review.listing_id != listing.listing_id {
            return Err(ListingsError::ReviewNotFound);
        }

        authorize_review_removal(&input.actor, &review, &listing).require()?;

        self.reviews.delete_review(input.review_id).await?;

        tracing::info!(
            review_id = %input.review_id,
            listing_id = %input.listing_id,
            "Review deleted"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::InMemoryListingsRepo;

    fn use_case(repo: &InMemoryListingsRepo) -> DeleteReviewUseCase<InMemoryListingsRepo, InMemoryListingsRepo> {
        DeleteReviewUseCase::new(Arc::new(repo.clone()), Arc::new(repo.clone()))
    }

    #[tokio::test]
    async fn test_author_and_listing_owner_may_delete() {
        let repo = InMemoryListingsRepo::new();
        let owner = UserId::new();
        let author = UserId::new();
        let listing = repo.seed_listing(owner);
        let by_author = repo.seed_review(listing.listing_id, author);
        let by_owner_call = repo.seed_review(listing.listing_id, author);

        use_case(&repo)
            .execute(DeleteReviewInput {
                listing_id: listing.listing_id,
                review_id: by_author.review_id,
                actor: author,
            })
            .await
            .unwrap();
        use_case(&repo)
            .execute(DeleteReviewInput {
                listing_id: listing.listing_id,
                review_id: by_owner_call.review_id,
                actor: owner,
            })
            .await
            .unwrap();

        assert_eq!(repo.review_count(), 0);
    }

    #[tokio::test]
    async fn test_stranger_is_denied() {
        let repo = InMemoryListingsRepo::new();
        let listing = repo.seed_listing(UserId::new());
        let review = repo.seed_review(listing.listing_id, UserId::new());

        let err = use_case(&repo)
            .execute(DeleteReviewInput {
                listing_id: listing.listing_id,
                review_id: review.review_id,
                actor: UserId::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ListingsError::AuthorizationDenied));
        assert_eq!(repo.review_count(), 1);
    }

    #[tokio::test]
    async fn test_review_under_a_different_listing_is_not_found() {
        let repo = InMemoryListingsRepo::new();
        let owner = UserId::new();
        let mine = repo.seed_listing(owner);
        let other = repo.seed_listing(UserId::new());
        let foreign_review = repo.seed_review(other.listing_id, UserId::new());

        // Owner of `mine` tries to delete a review that lives under `other`
        let err = use_case(&repo)
            .execute(DeleteReviewInput {
                listing_id: mine.listing_id,
                review_id: foreign_review.review_id,
                actor: owner,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ListingsError::ReviewNotFound));
        assert_eq!(repo.review_count(), 1);
    }
}
