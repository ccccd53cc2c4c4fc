//! Application Configuration
//!
//! Configuration for the Listings application layer.

use std::path::PathBuf;

/// Listings application configuration
#[derive(Debug, Clone)]
pub struct ListingsConfig {
    /// Directory uploaded images are written to
    pub upload_dir: PathBuf,
    /// URL prefix the upload directory is served under
    pub public_base: String,
    /// Upper bound for a create/update request body
    pub max_upload_bytes: usize,
}

impl Default for ListingsConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            public_base: "/uploads".to_string(),
            max_upload_bytes: 10 * 1024 * 1024, // 10 MiB
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ListingsConfig::default();
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.public_base, "/uploads");
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
    }
}
