//! Cached tile layer orchestration.
//!
//! `CachedTileLayer` mediates between three contracts: the rendering
//! widget's synchronous-return/asynchronous-fill draw callback, the
//! persistent store's async lookup protocol, and the bulk seed operation's
//! progress protocol.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Rendering widget                        │
//! │   draw callback ──► TileCreator          viewport state ──┐  │
//! └───────────────────────────┬───────────────────────────────┼──┘
//!                             ▼                               ▼
//! ┌──────────────────────────────────────────────┐   ┌────────────┐
//! │               CachedTileLayer                │◄──│  Viewport  │
//! │  create_tile · seed_bounds · seed_current_   │   └────────────┘
//! │  view · clear_cache · instantiate_store      │
//! └───────────────────────────┬──────────────────┘
//!                             ▼  fresh handle per operation
//! ┌──────────────────────────────────────────────┐
//! │        StoreFactory ──► TileStore            │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use cached_tile_layer::{CachedTileLayer, CacheLayerOptions, TilePoint};
//!
//! let layer = CachedTileLayer::new(
//!     "http://{s}.tile.osm.org/{z}/{x}/{y}.png",
//!     CacheLayerOptions::default(),
//!     store_factory,
//! );
//! layer.bind_viewport(Arc::new(widget_adapter));
//!
//! // Widget draw callback: element returns immediately, fills later.
//! let element = layer.create_tile(TilePoint::new(1, 2), Box::new(|_| {}));
//!
//! // User actions.
//! let seeded = layer.seed_current_view(None, None, None).await?;
//! layer.clear_cache().await?;
//! ```

use std::sync::{Arc, RwLock};

use tracing::{debug, info, warn};

use crate::config::CacheLayerOptions;
use crate::coord::TilePoint;
use crate::element::{SettleHook, TileElement};
use crate::geo::{GeoBounds, SeedArea};
use crate::store::{ProgressListener, StoreFactory, StoreOptions, TileStore};
use crate::viewport::Viewport;

mod error;

pub use error::LayerError;

/// The per-tile creation capability a rendering widget consumes.
///
/// A widget adapter delegates its own base behavior for everything except
/// tile creation, and satisfies tile creation through this trait — no
/// subclassing of widget internals involved.
pub trait TileCreator: Send + Sync {
    /// Synchronously produce a renderable element for the tile at `point`,
    /// to be populated asynchronously. `on_settled` fires exactly once when
    /// the element's payload finally loads or errors.
    fn create_tile(&self, point: TilePoint, on_settled: SettleHook) -> TileElement;
}

/// A tile layer backed by a persistent key-addressed tile store.
///
/// Tiles are served from the store when present and fresh; otherwise the
/// store fetches them from the network and caches them. On top of the
/// per-tile path the layer offers bulk seeding of a bounding box across a
/// zoom range, with progress reporting, and a full cache purge.
///
/// Every top-level operation opens its own store handle through the
/// injected [`StoreFactory`]; handles are never shared across operations.
pub struct CachedTileLayer<F> {
    url_template: String,
    options: CacheLayerOptions,
    store_factory: F,
    viewport: RwLock<Option<Arc<dyn Viewport>>>,
}

impl<F: StoreFactory> CachedTileLayer<F> {
    /// Create a layer over `url_template`, using `store_factory` to open
    /// store handles.
    ///
    /// The template carries `{s}`, `{z}`, `{x}`, `{y}` placeholders which
    /// the store resolves per tile.
    pub fn new(
        url_template: impl Into<String>,
        options: CacheLayerOptions,
        store_factory: F,
    ) -> Self {
        Self {
            url_template: url_template.into(),
            options,
            store_factory,
            viewport: RwLock::new(None),
        }
    }

    /// Get the tile URL template.
    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    /// Get the layer options.
    pub fn options(&self) -> &CacheLayerOptions {
        &self.options
    }

    /// Bind the live viewport of the map this layer was added to.
    ///
    /// Replaces any previously bound viewport.
    pub fn bind_viewport(&self, viewport: Arc<dyn Viewport>) {
        *self.viewport.write().unwrap() = Some(viewport);
    }

    /// Drop the viewport binding when the layer leaves the map.
    pub fn unbind_viewport(&self) {
        *self.viewport.write().unwrap() = None;
    }

    /// Get the currently bound viewport, if any.
    pub fn viewport(&self) -> Option<Arc<dyn Viewport>> {
        self.viewport.read().unwrap().clone()
    }

    /// Assemble the store addressing options for this layer.
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            tile_url: self.url_template.clone(),
            sub_domains: self.options.sub_domains().to_vec(),
            database_name: self.options.database_name().to_string(),
            database_version: self.options.database_version(),
            object_store_name: self.options.object_store_name().to_string(),
            crawl_delay: self.options.crawl_delay(),
            max_age: self.options.max_age(),
        }
    }

    /// Open a fresh store handle bound to this layer's configuration.
    ///
    /// Exposed so callers can run advanced store operations directly; the
    /// handle addresses the same logical store as every other handle the
    /// layer opens.
    pub fn instantiate_store(&self) -> F::Store {
        self.store_factory.connect(self.store_options())
    }

    /// Produce a renderable element for the tile at `point` and fill it
    /// asynchronously from the store.
    ///
    /// The element is fully constructed (empty alt text, presentation role,
    /// cross-origin attribute per configuration) and `on_settled` is wired
    /// before this returns; the image source is always assigned strictly
    /// later. A successful lookup assigns the store's data URI; any failed
    /// lookup — including the layer not being bound to a viewport, which
    /// leaves the tile URL zoom unresolvable — assigns the configured
    /// error-fallback reference instead. Exactly one of the two happens.
    ///
    /// # Panics
    ///
    /// Must be called within a Tokio runtime context, since the fill is
    /// spawned as a task.
    pub fn create_tile(&self, point: TilePoint, on_settled: SettleHook) -> TileElement {
        let element = TileElement::new(self.options.cross_origin());
        element.on_settled(on_settled);

        let fallback = self.options.error_tile_url().to_string();
        let zoom = self.viewport().map(|viewport| viewport.zoom_for_url());
        match zoom {
            Some(z) => {
                let coord = point.at_zoom(z);
                let store = self.instantiate_store();
                let handle = element.clone();
                tokio::spawn(async move {
                    match store.tile_as_data_uri(coord).await {
                        Ok(data_uri) => {
                            debug!(%coord, "tile served from store");
                            handle.set_source(data_uri);
                        }
                        Err(error) => {
                            debug!(%coord, %error, "tile lookup failed, serving fallback");
                            handle.set_source(fallback);
                        }
                    }
                });
            }
            None => {
                warn!(
                    x = point.x,
                    y = point.y,
                    "tile requested with no viewport bound, serving fallback"
                );
                let handle = element.clone();
                tokio::spawn(async move {
                    handle.set_source(fallback);
                });
            }
        }

        element
    }

    /// Bulk-populate the store for `bounds` across a zoom range.
    ///
    /// `max_zoom` defaults to the bound viewport's current zoom, captured
    /// before the seed starts so later viewport changes cannot move the
    /// range; `min_zoom` defaults to `0`. `on_progress` is registered with
    /// the store before the seed is issued and observes every progress tick
    /// of the run, in emission order; the layer adds no synthetic terminal
    /// tick of its own, so treat resolution of this call as the completion
    /// signal. Resolves with the store's processed-tile count, unchanged.
    ///
    /// # Errors
    ///
    /// [`LayerError::ViewportDetached`] when `max_zoom` is `None` and no
    /// viewport is bound; [`LayerError::Store`] passing any store failure
    /// through unchanged.
    pub async fn seed_bounds(
        &self,
        bounds: GeoBounds,
        max_zoom: Option<u8>,
        min_zoom: Option<u8>,
        on_progress: Option<ProgressListener>,
    ) -> Result<u64, LayerError> {
        let max_zoom = match max_zoom {
            Some(zoom) => zoom,
            None => self
                .viewport()
                .ok_or(LayerError::ViewportDetached)?
                .zoom(),
        };
        let min_zoom = min_zoom.unwrap_or(0);

        let store = self.instantiate_store();
        if let Some(listener) = on_progress {
            store.on_seed_progress(listener);
        }

        info!(
            north = bounds.north(),
            south = bounds.south(),
            east = bounds.east(),
            west = bounds.west(),
            max_zoom,
            min_zoom,
            "seeding tile store"
        );
        let count = store
            .seed_area(SeedArea::from(&bounds), max_zoom, min_zoom)
            .await?;
        info!(tiles = count, "seed run complete");
        Ok(count)
    }

    /// Seed the store for the viewport's currently visible bounds.
    ///
    /// Derives the bounding box from the bound viewport at call time, then
    /// behaves exactly like [`seed_bounds`](Self::seed_bounds).
    ///
    /// # Errors
    ///
    /// [`LayerError::ViewportDetached`] when no viewport is bound.
    pub async fn seed_current_view(
        &self,
        max_zoom: Option<u8>,
        min_zoom: Option<u8>,
        on_progress: Option<ProgressListener>,
    ) -> Result<u64, LayerError> {
        let viewport = self.viewport().ok_or(LayerError::ViewportDetached)?;
        self.seed_bounds(viewport.bounds(), max_zoom, min_zoom, on_progress)
            .await
    }

    /// Invalidate the whole configured object store.
    ///
    /// All-or-nothing from this layer's perspective; the store's result or
    /// failure is surfaced unchanged. Purging an already-empty store
    /// succeeds.
    pub async fn clear_cache(&self) -> Result<bool, LayerError> {
        info!("purging tile store");
        let cleared = self.instantiate_store().purge().await?;
        Ok(cleared)
    }
}

impl<F: StoreFactory> TileCreator for CachedTileLayer<F> {
    fn create_tile(&self, point: TilePoint, on_settled: SettleHook) -> TileElement {
        CachedTileLayer::create_tile(self, point, on_settled)
    }
}
