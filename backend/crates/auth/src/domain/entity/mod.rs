//! Entities of the auth domain

pub mod session;
pub mod user;
