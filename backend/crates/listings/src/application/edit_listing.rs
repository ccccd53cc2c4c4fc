//! Edit Listing Use Case
//!
//! Loads a listing for the edit form, enforcing ownership up front so
//! a non-owner never even sees the prefilled form.

use std::sync::Arc;

use auth::models::UserId;
use kernel::id::ListingId;

use crate::domain::entity::listing::Listing;
use crate::domain::repository::ListingRepository;
use crate::domain::services::authorize_listing_change;
use crate::error::{ListingsError, ListingsResult};

/// Edit listing use case
pub struct EditListingUseCase<L>
where
    L: ListingRepository,
{
    repo: Arc<L>,
}

impl<L> EditListingUseCase<L>
where
    L: ListingRepository,
{
    pub fn new(repo: Arc<L>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, listing_id: ListingId, actor: UserId) -> ListingsResult<Listing> {
        let listing = self
            .repo
            .find_by_id(listing_id)
            .await?
            .ok_or(ListingsError::ListingNotFound)?;
        authorize_listing_change(&actor, &listing).require()?;
        Ok(listing)
    }
}
