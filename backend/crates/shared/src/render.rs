//! Renderer Seam
//!
//! Abstraction over the template renderer collaborator. Handlers hand a view
//! name and a JSON data bag to it and get an HTML body back; the concrete
//! engine lives in the application binary.

use crate::error::app_error::AppResult;

/// Template renderer capability
///
/// Implementations must be cheap to call per request; data is a
/// `serde_json::Value` so the seam stays engine-agnostic.
pub trait Renderer: Send + Sync {
    /// Render the named view with the given data bag
    fn render(&self, view: &str, data: serde_json::Value) -> AppResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::app_error::AppError;

    struct UpperRenderer;

    impl Renderer for UpperRenderer {
        fn render(&self, view: &str, _data: serde_json::Value) -> AppResult<String> {
            if view.is_empty() {
                return Err(AppError::internal("No view name"));
            }
            Ok(view.to_uppercase())
        }
    }

    #[test]
    fn test_object_safety() {
        let renderer: std::sync::Arc<dyn Renderer> = std::sync::Arc::new(UpperRenderer);
        let html = renderer.render("listings/index", serde_json::json!({}));
        assert_eq!(html.unwrap(), "LISTINGS/INDEX");
    }
}
