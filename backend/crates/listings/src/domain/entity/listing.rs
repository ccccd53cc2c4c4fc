//! Listing Entity

use auth::models::UserId;
use chrono::{DateTime, Utc};
use kernel::id::ListingId;

use crate::domain::value_object::{image::ListingImage, price::Price};

/// Fields an owner may change after creation.
///
/// The owner is deliberately absent: ownership is fixed when the
/// listing is created and no update path carries it.
#[derive(Debug, Clone)]
pub struct UpdateListingFields {
    pub title: String,
    pub description: String,
    pub price: Price,
    pub location: String,
}

/// Listing entity
#[derive(Debug, Clone)]
pub struct Listing {
    /// Internal UUID identifier
    pub listing_id: ListingId,
    /// Account that created the listing, immutable for its lifetime
    pub owner_id: UserId,
    /// Short headline shown in the index
    pub title: String,
    /// Free-form body text
    pub description: String,
    /// Non-negative amount in the smallest currency unit
    pub price: Price,
    /// Free-form place name
    pub location: String,
    /// Stored image; creation requires one, so this is only absent for
    /// rows that predate the upload requirement
    pub image: Option<ListingImage>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    /// Create a new listing with its uploaded image
    pub fn new(
        owner_id: UserId,
        title: String,
        description: String,
        price: Price,
        location: String,
        image: ListingImage,
    ) -> Self {
        let now = Utc::now();

        Self {
            listing_id: ListingId::new(),
            owner_id,
            title,
            description,
            price,
            location,
            image: Some(image),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an owner-submitted edit
    pub fn apply_update(&mut self, fields: UpdateListingFields) {
        self.title = fields.title;
        self.description = fields.description;
        self.price = fields.price;
        self.location = fields.location;
        self.updated_at = Utc::now();
    }

    /// Swap in a freshly stored image, returning the one it displaces
    /// so the caller can account for the now-orphaned file.
    pub fn replace_image(&mut self, image: ListingImage) -> Option<ListingImage> {
        let previous = self.image.replace(image);
        self.updated_at = Utc::now();
        previous
    }
}
