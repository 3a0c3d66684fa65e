//! Tile store contract.
//!
//! The persistent tile store is an external collaborator: this module
//! defines the seam the layer consumes, not an implementation. A store is
//! addressed through [`StoreOptions`] and spoken to through [`TileStore`];
//! fresh handles are minted per operation by a [`StoreFactory`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      CachedTileLayer                        │
//! │        (per operation: factory.connect(options))            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    StoreFactory trait                       │
//! │            connect(StoreOptions) -> TileStore               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     TileStore trait                         │
//! │   tile_as_data_uri · seed_area · purge · on_seed_progress   │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use std::future::Future;

use crate::coord::TileCoord;
use crate::geo::SeedArea;

mod error;
mod factory;
mod options;
mod progress;

pub use error::StoreError;
pub use factory::StoreFactory;
pub use options::StoreOptions;
pub use progress::{ProgressListener, SeedProgress};

/// A live session against the persistent tile store.
///
/// One handle serves one top-level operation (a tile fill, a seed run, or a
/// purge) and is dropped when that operation's asynchronous work settles.
/// Handles are never shared or pooled across operations; any serialization
/// between concurrent store operations, such as crawl-delay throttling
/// during seeding, lives behind this trait.
///
/// Implementations MUST be async-safe: methods are awaited on the caller's
/// runtime and must not block the calling thread.
pub trait TileStore: Send + Sync + 'static {
    /// Look up a tile and return it as a self-contained image data
    /// reference (an embeddable data URI), fetching from the network and
    /// populating the cache when the tile is absent or stale.
    fn tile_as_data_uri(
        &self,
        coord: TileCoord,
    ) -> impl Future<Output = Result<String, StoreError>> + Send;

    /// Bulk-populate the store for `area` across `[min_zoom, max_zoom]`
    /// inclusive. Resolves with the number of tiles processed.
    fn seed_area(
        &self,
        area: SeedArea,
        max_zoom: u8,
        min_zoom: u8,
    ) -> impl Future<Output = Result<u64, StoreError>> + Send;

    /// Invalidate the entire configured object store.
    fn purge(&self) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Register a listener for seed progress ticks.
    ///
    /// Listeners registered before a seed run is issued observe every event
    /// that run emits, in emission order; no ordering promise is made for
    /// events emitted strictly before registration.
    fn on_seed_progress(&self, listener: ProgressListener);
}
