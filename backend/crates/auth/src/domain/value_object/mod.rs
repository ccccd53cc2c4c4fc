//! Value objects of the auth domain

pub mod session_id;
pub mod user_id;
pub mod user_name;
