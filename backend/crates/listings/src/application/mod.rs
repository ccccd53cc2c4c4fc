//! Application Layer
//!
//! One use case per file for the listing and review flows, plus the
//! configuration they share.

pub mod config;
pub mod create_listing;
pub mod create_review;
pub mod delete_listing;
pub mod delete_review;
pub mod edit_listing;
pub mod list_listings;
pub mod show_listing;
pub mod update_listing;

// Re-exports
pub use config::ListingsConfig;
pub use create_listing::{CreateListingInput, CreateListingUseCase};
pub use create_review::{CreateReviewInput, CreateReviewUseCase};
pub use delete_listing::DeleteListingUseCase;
pub use delete_review::{DeleteReviewInput, DeleteReviewUseCase};
pub use edit_listing::EditListingUseCase;
pub use list_listings::ListListingsUseCase;
pub use show_listing::ShowListingUseCase;
pub use update_listing::{UpdateListingInput, UpdateListingUseCase};
