//! Shared Kernel
//!
//! The smallest vocabulary every other crate agrees on:
//! - `error`: the unified [`error::app_error::AppError`] chain
//! - `id`: typed UUID wrappers
//! - `render`: the template-renderer seam
//!
//! Anything here is hard to change, so nothing lands in this crate
//! unless at least two domains need it.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod render;
