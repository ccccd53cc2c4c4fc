//! Listings (Marketplace) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository and storage traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database and disk storage implementations
//! - `presentation/` - HTTP handlers, multipart forms, router
//!
//! ## Features
//! - Listing catalog with create/show/edit/delete pages
//! - Image upload stored on disk and served as a public URL
//! - Reviews with a 1-5 rating, nested under their listing
//!
//! ## Authorization Model
//! - Only the owner may edit or delete a listing
//! - A review is removed by its author or by the listing owner
//! - Visitor mistakes become a flash message and a redirect, never an
//!   error page

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod test_support;

// The surface the binary programs against
pub use application::config::ListingsConfig;
pub use error::{ListingsError, ListingsResult};
pub use infra::image_store::DiskImageStore;
pub use infra::postgres::PgListingsRepository;
pub use presentation::router::listings_router;
