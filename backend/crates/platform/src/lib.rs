//! Platform Crate
//!
//! Technical plumbing with no domain knowledge in it: password hashing
//! behind [`password::ClearTextPassword`], session-cookie building and
//! parsing, and entropy/base64 helpers for secrets.

pub mod cookie;
pub mod crypto;
pub mod password;
