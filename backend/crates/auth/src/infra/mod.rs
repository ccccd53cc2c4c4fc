//! Infrastructure Layer
//!
//! Postgres-backed storage for users and sessions.

pub mod postgres;

pub use postgres::PgAuthRepository;
