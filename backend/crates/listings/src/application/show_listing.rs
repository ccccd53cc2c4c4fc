//! Show Listing Use Case

use std::sync::Arc;

use kernel::id::ListingId;

use crate::domain::repository::{ListingDetail, ListingRepository};
use crate::error::{ListingsError, ListingsResult};

/// Show listing use case
pub struct ShowListingUseCase<L>
where
    L: ListingRepository,
{
    repo: Arc<L>,
}

impl<L> ShowListingUseCase<L>
where
    L: ListingRepository,
{
    pub fn new(repo: Arc<L>) -> Self {
        Self { repo }
    }

    /// Load the detail page read model. An unknown id is an error the
    /// handler recovers into a flash + redirect, never a hard failure.
    pub async fn execute(&self, listing_id: ListingId) -> ListingsResult<ListingDetail> {
        self.repo
            .find_detail(listing_id)
            .await?
            .ok_or(ListingsError::ListingNotFound)
    }
}
