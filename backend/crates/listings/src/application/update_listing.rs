//! Update Listing Use Case
//!
//! Applies owner edits and, when the request carried a new file,
//! swaps the stored image. The displaced file stays in storage; see
//! the note on `replace_image`.

use std::sync::Arc;

use auth::models::UserId;
use kernel::id::ListingId;

use crate::domain::entity::listing::{Listing, UpdateListingFields};
use crate::domain::repository::ListingRepository;
use crate::domain::services::authorize_listing_change;
use crate::domain::storage::{ImageStore, ImageUpload};
use crate::error::{ListingsError, ListingsResult};

/// Update listing input
pub struct UpdateListingInput {
    pub listing_id: ListingId,
    pub actor: UserId,
    pub fields: UpdateListingFields,
    /// Replacement image, if the form included one
    pub image: Option<ImageUpload>,
}

/// Update listing use case
pub struct UpdateListingUseCase<L, I>
where
    L: ListingRepository,
    I: ImageStore,
{
    repo: Arc<L>,
    images: Arc<I>,
}

impl<L, I> UpdateListingUseCase<L, I>
where
    L: ListingRepository,
    I: ImageStore,
{
    pub fn new(repo: Arc<L>, images: Arc<I>) -> Self {
        Self { repo, images }
    }

    pub async fn execute(&self, input: UpdateListingInput) -> ListingsResult<Listing> {
        let mut listing = self
            .repo
            .find_by_id(input.listing_id)
            .await?
            .ok_or(ListingsError::ListingNotFound)?;
        authorize_listing_change(&input.actor, &listing).require()?;

        listing.apply_update(input.fields);

        if let Some(upload) = input.image {
            let image = self.images.store(upload).await?;
            if let Some(old) = listing.replace_image(image) {
                // Nothing deletes the displaced file yet. TODO: sweep
                // orphaned uploads once the store grows a remove call.
                tracing::debug!(filename = %old.filename, "Replaced image left in storage");
            }
        }

        self.repo.update(&listing).await?;

        tracing::info!(listing_id = %listing.listing_id, "Listing updated");

        Ok(listing)
    }
}
