//! Value Objects for the listings domain

pub mod image;
pub mod price;
pub mod rating;
