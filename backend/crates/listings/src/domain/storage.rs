//! Image Storage Trait
//!
//! Interface for putting uploaded image bytes somewhere they can be
//! served from. The disk implementation lives in the infrastructure
//! layer; tests swap in an in-memory stand-in.

use crate::domain::value_object::image::ListingImage;
use crate::error::ListingsResult;

/// An image file as it arrived in the multipart request
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Filename the client supplied, used only as a naming hint
    pub filename: String,
    /// Raw file content
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}

/// Image store trait
#[trait_variant::make(ImageStore: Send)]
pub trait LocalImageStore {
    /// Persist the upload and return where it ended up
    async fn store(&self, upload: ImageUpload) -> ListingsResult<ListingImage>;
}
