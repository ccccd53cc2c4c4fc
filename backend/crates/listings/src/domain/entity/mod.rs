//! Entities of the listings domain

pub mod listing;
pub mod review;
