//! Domain Services
//!
//! Ownership gates for mutating operations. Pure functions over
//! entities so the rules stay testable without a database.

use auth::models::UserId;

use crate::domain::entity::{listing::Listing, review::Review};
use crate::error::{ListingsError, ListingsResult};

/// Outcome of an authorization check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Allowed,
    Denied,
}

impl Authorization {
    /// True when the action may proceed
    #[inline]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Authorization::Allowed)
    }

    /// Turn a denial into the error the handlers surface
    pub fn require(self) -> ListingsResult<()> {
        match self {
            Authorization::Allowed => Ok(()),
            Authorization::Denied => Err(ListingsError::AuthorizationDenied),
        }
    }
}

/// Only the owner may edit or delete a listing.
pub fn authorize_listing_change(actor: &UserId, listing: &Listing) -> Authorization {
    if listing.owner_id == *actor {
        Authorization::Allowed
    } else {
        Authorization::Denied
    }
}

/// A review may be removed by its author, or by the owner of the
/// listing it sits under (moderation of their own page).
pub fn authorize_review_removal(
    actor: &UserId,
    review: &Review,
    listing: &Listing,
) -> Authorization {
    if review.author_id == *actor || listing.owner_id == *actor {
        Authorization::Allowed
    } else {
        Authorization::Denied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{image::ListingImage, price::Price, rating::Rating};

    fn listing_owned_by(owner_id: UserId) -> Listing {
        Listing::new(
            owner_id,
            "Old mill".to_string(),
            "Water wheel included".to_string(),
            Price::new(5_000).unwrap(),
            "Somewhere upstream".to_string(),
            ListingImage::new("/uploads/mill.jpg", "mill.jpg"),
        )
    }

    #[test]
    fn test_owner_may_change_listing() {
        let owner = UserId::new();
        let listing = listing_owned_by(owner);

        assert!(authorize_listing_change(&owner, &listing).is_allowed());
        assert!(!authorize_listing_change(&UserId::new(), &listing).is_allowed());
    }

    #[test]
    fn test_review_removal_gate() {
        let owner = UserId::new();
        let author = UserId::new();
        let listing = listing_owned_by(owner);
        let review = Review::new(
            listing.listing_id,
            author,
            Rating::new(2).unwrap(),
            "The wheel squeaks".to_string(),
        );

        assert!(authorize_review_removal(&author, &review, &listing).is_allowed());
        assert!(authorize_review_removal(&owner, &review, &listing).is_allowed());
        assert!(!authorize_review_removal(&UserId::new(), &review, &listing).is_allowed());
    }

    #[test]
    fn test_require_maps_denial_to_error() {
        assert!(Authorization::Allowed.require().is_ok());
        assert!(matches!(
            Authorization::Denied.require(),
            Err(ListingsError::AuthorizationDenied)
        ));
    }
}
