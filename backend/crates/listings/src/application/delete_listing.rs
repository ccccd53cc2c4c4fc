//! Delete Listing Use Case

use std::sync::Arc;

use auth::models::UserId;
use kernel::id::ListingId;

use crate::domain::repository::ListingRepository;
use crate::domain::services::authorize_listing_change;
use crate::error::{ListingsError, ListingsResult};

/// Delete listing use case
pub struct DeleteListingUseCase<L>
where
    L: ListingRepository,
{
    repo: Arc<L>,
}

impl<L> DeleteListingUseCase<L>
where
    L: ListingRepository,
{
    pub fn new(repo: Arc<L>) -> Self {
        Self { repo }
    }

    /// Remove the listing. Its reviews go with it via the cascade.
    pub async fn execute(&self, listing_id: ListingId, actor: UserId) -> ListingsResult<()> {
        let listing = self
            .repo
            .find_by_id(listing_id)
            .await?
            .ok_or(ListingsError::ListingNotFound)?;
        authorize_listing_change(&actor, &listing).require()?;

        self.repo.delete(listing_id).await?;

        tracing::info!(listing_id = %listing_id, owner_id = %actor, "Listing deleted");

        Ok(())
    }
}
