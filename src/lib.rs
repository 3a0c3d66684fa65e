//! Persistent tile caching layer for slippy-map renderers.
//!
//! This library mediates between a tiled-map rendering widget and a
//! persistent key-addressed tile store. Visible tiles are served from the
//! store when cached and fresh, falling back to network retrieval and cache
//! population inside the store otherwise; a tile whose lookup fails renders
//! a configured fallback image instead of breaking the map. On top of the
//! per-tile path, a whole bounding box can be pre-populated ("seeded")
//! across a zoom range with progress reporting, and the cache can be purged.
//!
//! The widget and the store are collaborators, not parts of this crate:
//! widget adapters implement [`Viewport`] (and consume [`TileCreator`]),
//! store bindings implement [`TileStore`] behind a [`StoreFactory`]. The
//! layer itself is runtime state plus orchestration.
//!
//! # High-Level API
//!
//! ```ignore
//! use std::sync::Arc;
//! use cached_tile_layer::{CachedTileLayer, CacheLayerOptions};
//!
//! let layer = CachedTileLayer::new(
//!     "http://{s}.tile.osm.org/{z}/{x}/{y}.png",
//!     CacheLayerOptions::builder().cross_origin(true).build(),
//!     store_factory,
//! );
//! layer.bind_viewport(Arc::new(widget_adapter));
//!
//! // Pre-populate everything currently on screen, down to zoom 0.
//! let count = layer
//!     .seed_current_view(None, None, Some(Box::new(|p| {
//!         println!("{} of {} tiles to go", p.remains, p.total);
//!     })))
//!     .await?;
//! ```

pub mod config;
pub mod coord;
pub mod element;
pub mod geo;
pub mod layer;
pub mod logging;
pub mod store;
pub mod viewport;

pub use config::{CacheLayerOptions, CacheLayerOptionsBuilder};
pub use coord::{TileCoord, TilePoint};
pub use element::{SettleHook, TileElement, TileLoadEvent};
pub use geo::{GeoBounds, SeedArea};
pub use layer::{CachedTileLayer, LayerError, TileCreator};
pub use store::{
    ProgressListener, SeedProgress, StoreError, StoreFactory, StoreOptions, TileStore,
};
pub use viewport::Viewport;

/// Version of the library.
///
/// Defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
