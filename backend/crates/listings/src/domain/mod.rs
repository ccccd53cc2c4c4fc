//! Domain Layer
//!
//! Entities, value objects, and the persistence/storage interfaces of
//! the listings context.

pub mod entity;
pub mod repository;
pub mod services;
pub mod storage;
pub mod value_object;

// Re-exports
pub use entity::{
    listing::{Listing, UpdateListingFields},
    review::Review,
};
pub use repository::{ListingDetail, ListingRepository, ReviewRepository, ReviewWithAuthor};
pub use storage::{ImageStore, ImageUpload};
pub use value_object::{image::ListingImage, price::Price, rating::Rating};
