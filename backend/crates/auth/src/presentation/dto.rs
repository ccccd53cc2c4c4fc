//! Form Bodies
//!
//! What the signup and login forms post. Field names follow the HTML
//! form inputs, not the domain vocabulary.

use serde::Deserialize;

/// Sign up form body
#[derive(Debug, Clone, Deserialize)]
pub struct SignUpRequest {
    pub username: String,
    pub password: String,
}

/// Sign in form body
#[derive(Debug, Clone, Deserialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}
