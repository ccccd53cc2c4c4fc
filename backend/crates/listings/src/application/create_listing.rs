//! Create Listing Use Case
//!
//! The image is part of the contract: a submission without one fails
//! before anything is stored, so a half-created listing never exists.

use std::sync::Arc;

use auth::models::UserId;

use crate::domain::entity::listing::Listing;
use crate::domain::repository::ListingRepository;
use crate::domain::storage::{ImageStore, ImageUpload};
use crate::domain::value_object::price::Price;
use crate::error::{ListingsError, ListingsResult};

/// Create listing input
pub struct CreateListingInput {
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    pub price: Price,
    pub location: String,
    /// Image file from the multipart request, if one was attached
    pub image: Option<ImageUpload>,
}

/// Create listing use case
pub struct CreateListingUseCase<L, I>
where
    L: ListingRepository,
    I: ImageStore,
{
    repo: Arc<L>,
    images: Arc<I>,
}

impl<L, I> CreateListingUseCase<L, I>
where
    L: ListingRepository,
    I: ImageStore,
{
    pub fn new(repo: Arc<L>, images: Arc<I>) -> Self {
        Self { repo, images }
    }

    pub async fn execute(&self, input: CreateListingInput) -> ListingsResult<Listing> {
        // Reject before touching storage
        let upload = input.image.ok_or(ListingsError::MissingImage)?;

        let image = self.images.store(upload).await?;
        let listing = Listing::new(
            input.owner_id,
            input.title,
            input.description,
            input.price,
            input.location,
            image,
        );
        self.repo.create(&listing).await?;

        tracing::info!(
            listing_id = %listing.listing_id,
            owner_id = %listing.owner_id,
            "Listing created"
        );

        Ok(listing)
    }
}
