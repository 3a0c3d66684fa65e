//! Store handle construction.

use super::options::StoreOptions;
use super::TileStore;

/// Builds tile store handles from addressing options.
///
/// Implementations must behave as a pure function of `options`: no state
/// retained or reused across calls, no side effects beyond constructing the
/// handle, and no failure for structurally valid options (which is why
/// `connect` returns the handle directly rather than a `Result`). Repeated
/// calls with equal options yield independent handles onto the same logical
/// store.
pub trait StoreFactory: Send + Sync + 'static {
    /// The store handle type this factory produces.
    type Store: TileStore;

    /// Open a fresh handle bound to `options`.
    fn connect(&self, options: StoreOptions) -> Self::Store;
}
