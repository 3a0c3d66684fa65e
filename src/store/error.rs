//! Error type for tile store operations.

use thiserror::Error;

/// Errors surfaced by a tile store.
///
/// The layer never inspects these beyond logging: per-tile failures are
/// recovered with the error-fallback image, and bulk-operation failures are
/// passed through to the caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Network fetch of a missing or stale tile failed.
    #[error("network fetch failed: {0}")]
    Network(String),

    /// Reading from or writing to the persistent store failed.
    #[error("storage failure: {0}")]
    Storage(String),

    /// The store's persistence quota is exhausted.
    #[error("storage quota exceeded")]
    QuotaExceeded,

    /// The configured URL template could not be resolved for a tile.
    #[error("invalid tile URL template: {0}")]
    InvalidTemplate(String),
}
