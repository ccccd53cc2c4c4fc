//! List Listings Use Case

use std::sync::Arc;

use crate::domain::entity::listing::Listing;
use crate::domain::repository::ListingRepository;
use crate::error::ListingsResult;

/// List listings use case
pub struct ListListingsUseCase<L>
where
    L: ListingRepository,
{
    repo: Arc<L>,
}

impl<L> ListListingsUseCase<L>
where
    L: ListingRepository,
{
    pub fn new(repo: Arc<L>) -> Self {
        Self { repo }
    }

    /// All listings, oldest first. No pagination.
    pub async fn execute(&self) -> ListingsResult<Vec<Listing>> {
        self.repo.list_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::InMemoryListingsRepo;
    use auth::models::UserId;

    #[tokio::test]
    async fn test_returns_listings_in_creation_order() {
        let repo = InMemoryListingsRepo::new();
        let first = repo.seed_listing(UserId::new());
        let second = repo.seed_listing(UserId::new());

        let listings = ListListingsUseCase::new(Arc::new(repo))
            .execute()
            .await
            .unwrap();

        let ids: Vec<_> = listings.iter().map(|l| l.listing_id).collect();
        assert_eq!(ids, vec![first.listing_id, second.listing_id]);
    }
}
