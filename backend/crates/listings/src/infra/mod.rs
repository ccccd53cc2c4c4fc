//! Infrastructure Layer
//!
//! Concrete persistence and storage backends.

pub mod image_store;
pub mod postgres;

pub use image_store::DiskImageStore;
pub use postgres::PgListingsRepository;
