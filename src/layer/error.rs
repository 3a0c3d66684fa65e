//! Error types for layer operations.

use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by [`CachedTileLayer`](crate::CachedTileLayer)
/// operations.
///
/// Only bulk operations (seeding, purging) reject; per-tile failures are
/// recovered inside `create_tile` with the error-fallback image and never
/// appear here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayerError {
    /// An operation needed the live viewport (current bounds or zoom) while
    /// no viewport was bound to the layer.
    #[error("layer is not bound to a live viewport")]
    ViewportDetached,

    /// The store failed a bulk operation. Passed through unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_display() {
        assert_eq!(
            LayerError::ViewportDetached.to_string(),
            "layer is not bound to a live viewport"
        );
    }

    #[test]
    fn test_store_error_passes_through_unchanged() {
        let error = LayerError::from(StoreError::QuotaExceeded);
        assert_eq!(error.to_string(), StoreError::QuotaExceeded.to_string());
    }

    #[test]
    fn test_error_trait() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<LayerError>();
    }
}
