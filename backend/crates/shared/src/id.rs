//! Typed Identifiers
//!
//! UUID-backed ids with a phantom marker per entity, so a review id
//! cannot be handed to code expecting a listing id.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use uuid::Uuid;

/// Typed wrapper around a UUID v4
///
/// ```
/// use kernel::id::{Id, markers};
/// type ListingId = Id<markers::Listing>;
/// let id = ListingId::new();
/// ```
pub struct Id<T> {
    value: Uuid,
    _marker: PhantomData<T>,
}

// Manual impls so markers stay bare unit structs; derives would demand
// Clone/Copy/etc. on the marker itself.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> Id<T> {
    /// Mint a fresh random id
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Wrap an existing UUID, e.g. one read back from the database
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            value: uuid,
            _marker: PhantomData,
        }
    }

    /// Borrow the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.value
    }

    /// Unwrap into the underlying UUID
    pub fn into_uuid(self) -> Uuid {
        self.value
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

// Display is the bare UUID so ids can go straight into URLs
impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

impl<T> From<Uuid> for Id<T> {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

impl<T> From<Id<T>> for Uuid {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

/// Phantom markers, one per entity
pub mod markers {
    pub struct Listing;
    pub struct Review;
}

pub type ListingId = Id<markers::Listing>;
pub type ReviewId = Id<markers::Review>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_keep_types_apart() {
        // Compiles only because the two aliases stay separate types
        fn takes_listing(id: ListingId) -> Uuid {
            id.into_uuid()
        }
        let listing: ListingId = Id::new();
        let _review: ReviewId = Id::new();
        takes_listing(listing);
    }

    #[test]
    fn test_round_trip_and_equality() {
        let uuid = Uuid::new_v4();
        let id: ReviewId = Id::from_uuid(uuid);

        assert_eq!(id.as_uuid(), &uuid);
        assert_eq!(id, ReviewId::from(uuid));
        assert_ne!(id, ReviewId::new());
    }

    #[test]
    fn test_display_is_url_ready() {
        let uuid = Uuid::new_v4();
        let id: ListingId = Id::from_uuid(uuid);
        assert_eq!(id.to_string(), uuid.to_string());
        assert_eq!(format!("{id:?}"), format!("Id({uuid})"));
    }
}
