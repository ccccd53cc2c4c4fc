//! Disk-Backed Image Store
//!
//! Writes uploads into a directory the api binary serves statically.
//! Stored names are prefixed with a fresh UUID so client-chosen names
//! can never collide or overwrite each other.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::application::config::ListingsConfig;
use crate::domain::storage::{ImageStore, ImageUpload};
use crate::domain::value_object::image::ListingImage;
use crate::error::{ListingsError, ListingsResult};

/// Image store persisting to the local filesystem
#[derive(Clone)]
pub struct DiskImageStore {
    upload_dir: PathBuf,
    public_base: String,
}

impl DiskImageStore {
    pub fn new(config: &ListingsConfig) -> Self {
        Self {
            upload_dir: config.upload_dir.clone(),
            public_base: config.public_base.trim_end_matches('/').to_string(),
        }
    }

    /// Create the upload directory if it does not exist yet.
    /// Called once at startup.
    pub async fn ensure_dir(&self) -> ListingsResult<()> {
        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| ListingsError::Storage(e.to_string()))
    }

    /// Reduce a client-supplied filename to a safe suffix: the final
    /// path component only, odd characters replaced.
    fn sanitize(filename: &str) -> String {
        let name = Path::new(filename)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("");

        let cleaned: String = name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        if cleaned.trim_matches(|c| c == '.' || c == '_').is_empty() {
            "image".to_string()
        } else {
            cleaned
        }
    }
}

impl ImageStore for DiskImageStore {
    async fn store(&self, upload: ImageUpload) -> ListingsResult<ListingImage> {
        let filename = format!("{}-{}", Uuid::new_v4(), Self::sanitize(&upload.filename));
        let path = self.upload_dir.join(&filename);

        tokio::fs::write(&path, &upload.bytes)
            .await
            .map_err(|e| ListingsError::Storage(e.to_string()))?;

        tracing::debug!(filename = %filename, bytes = upload.bytes.len(), "Stored image");

        Ok(ListingImage::new(
            format!("{}/{}", self.public_base, filename),
            filename,
        ))
    }
}
