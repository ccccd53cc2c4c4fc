//! Review Entity

use auth::models::UserId;
use chrono::{DateTime, Utc};
use kernel::id::{ListingId, ReviewId};

use crate::domain::value_object::rating::Rating;

/// Review entity
///
/// Belongs to exactly one listing and is removed with it.
#[derive(Debug, Clone)]
pub struct Review {
    /// Internal UUID identifier
    pub review_id: ReviewId,
    /// Listing the review is attached to
    pub listing_id: ListingId,
    /// Account that wrote the review
    pub author_id: UserId,
    /// 1 to 5 stars
    pub rating: Rating,
    /// Free-form review text
    pub comment: String,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Create a new review on a listing
    pub fn new(listing_id: ListingId, author_id: UserId, rating: Rating, comment: String) -> Self {
        let now = Utc::now();

        Self {
            review_id: ReviewId::new(),
            listing_id,
            author_id,
            rating,
            comment,
            created_at: now,
            updated_at: now,
        }
    }
}
