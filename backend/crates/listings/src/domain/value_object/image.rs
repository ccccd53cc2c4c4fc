//! Listing Image Value Object
//!
//! The pair a successful upload leaves behind: the public URL pages
//! embed, and the stored filename so the blob can be located later.

use serde::{Deserialize, Serialize};

/// Reference to a stored listing image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingImage {
    /// Public URL the image is served from
    pub url: String,
    /// Name of the stored file inside the upload area
    pub filename: String,
}

impl ListingImage {
    pub fn new(url: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            filename: filename.into(),
        }
    }
}
