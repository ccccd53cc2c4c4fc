//! Repository Traits
//!
//! Persistence seams for listings and reviews, plus the read models the
//! detail page loads in one go. Postgres implementations live in `infra`.

use kernel::id::{ListingId, ReviewId};

use crate::domain::entity::{listing::Listing, review::Review};
use crate::error::ListingsResult;

/// A review joined with its author's display name
#[derive(Debug, Clone)]
pub struct ReviewWithAuthor {
    pub review: Review,
    /// Display form of the author's user name
    pub author_name: String,
}

/// Everything the detail page needs in one read
#[derive(Debug, Clone)]
pub struct ListingDetail {
    pub listing: Listing,
    /// Display form of the owner's user name
    pub owner_name: String,
    /// Reviews in creation order, oldest first
    pub reviews: Vec<ReviewWithAuthor>,
}

/// Listing repository trait
#[trait_variant::make(ListingRepository: Send)]
pub trait LocalListingRepository {
    /// Persist a new listing
    async fn create(&self, listing: &Listing) -> ListingsResult<()>;

    /// Find a listing by ID
    async fn find_by_id(&self, listing_id: ListingId) -> ListingsResult<Option<Listing>>;

    /// Load a listing together with owner name and reviews
    async fn find_detail(&self, listing_id: ListingId) -> ListingsResult<Option<ListingDetail>>;

    /// All listings in creation order, oldest first
    async fn list_all(&self) -> ListingsResult<Vec<Listing>>;

    /// Persist changes to an existing listing
    async fn update(&self, listing: &Listing) -> ListingsResult<()>;

    /// Delete a listing; its reviews go with it
    async fn delete(&self, listing_id: ListingId) -> ListingsResult<()>;
}

/// Review repository trait
#[trait_variant::make(ReviewRepository: Send)]
pub trait LocalReviewRepository {
    /// Persist a new review
    async fn create_review(&self, review: &Review) -> ListingsResult<()>;

    /// Find a review by ID
    async fn find_review(&self, review_id: ReviewId) -> ListingsResult<Option<Review>>;

    /// Delete a review
    async fn delete_review(&self, review_id: ReviewId) -> ListingsResult<()>;
}
