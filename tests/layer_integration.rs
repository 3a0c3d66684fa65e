//! Integration tests for the per-tile lifecycle.
//!
//! These tests drive `create_tile` end-to-end over a scripted store and
//! verify the widget-facing contract: the element returns synchronously,
//! the source is assigned exactly once afterwards (data URI on success,
//! error tile on failure), and the completion hook fires exactly once.
//!
//! Run with: `cargo test --test layer_integration`

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use cached_tile_layer::{
    CacheLayerOptions, CachedTileLayer, GeoBounds, ProgressListener, SeedArea, StoreError,
    StoreFactory, StoreOptions, TileCoord, TilePoint, TileStore, Viewport,
};

const TEST_URL_TEMPLATE: &str = "http://{s}.example.com/{z}/{x}/{y}.png";
const TRANSPARENT_PIXEL: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1\
                                 HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

// ============================================================================
// Mock Implementations
// ============================================================================

/// Scripted store whose lookups can be held open behind a gate.
#[derive(Clone)]
struct GatedStore {
    lookup: Result<String, StoreError>,
    gate: Option<Arc<Notify>>,
    lookups: Arc<Mutex<Vec<TileCoord>>>,
}

impl GatedStore {
    fn resolving(data_uri: &str) -> Self {
        Self {
            lookup: Ok(data_uri.to_string()),
            gate: None,
            lookups: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn rejecting(error: StoreError) -> Self {
        Self {
            lookup: Err(error),
            gate: None,
            lookups: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn gated(data_uri: &str, gate: Arc<Notify>) -> Self {
        Self {
            lookup: Ok(data_uri.to_string()),
            gate: Some(gate),
            lookups: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl TileStore for GatedStore {
    fn tile_as_data_uri(
        &self,
        coord: TileCoord,
    ) -> impl Future<Output = Result<String, StoreError>> + Send {
        self.lookups.lock().unwrap().push(coord);
        let gate = self.gate.clone();
        let lookup = self.lookup.clone();
        async move {
            if let Some(gate) = gate {
                gate.notified().await;
            }
            lookup
        }
    }

    fn seed_area(
        &self,
        _area: SeedArea,
        _max_zoom: u8,
        _min_zoom: u8,
    ) -> impl Future<Output = Result<u64, StoreError>> + Send {
        async move { Ok(0) }
    }

    fn purge(&self) -> impl Future<Output = Result<bool, StoreError>> + Send {
        async move { Ok(true) }
    }

    fn on_seed_progress(&self, _listener: ProgressListener) {}
}

/// Factory handing out clones of one scripted store, counting connects.
#[derive(Clone)]
struct GatedFactory {
    store: GatedStore,
    connects: Arc<Mutex<Vec<StoreOptions>>>,
}

impl GatedFactory {
    fn new(store: GatedStore) -> Self {
        Self {
            store,
            connects: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl StoreFactory for GatedFactory {
    type Store = GatedStore;

    fn connect(&self, options: StoreOptions) -> GatedStore {
        self.connects.lock().unwrap().push(options);
        self.store.clone()
    }
}

struct FixedViewport {
    zoom: u8,
}

impl Viewport for FixedViewport {
    fn bounds(&self) -> GeoBounds {
        GeoBounds::from_corners((-1.0, -1.0), (1.0, 1.0))
    }

    fn zoom(&self) -> u8 {
        self.zoom
    }
}

fn layer_over(
    factory: GatedFactory,
    options: CacheLayerOptions,
    zoom: u8,
) -> CachedTileLayer<GatedFactory> {
    let layer = CachedTileLayer::new(TEST_URL_TEMPLATE, options, factory);
    layer.bind_viewport(Arc::new(FixedViewport { zoom }));
    layer
}

fn counting_hook(counter: &Arc<AtomicUsize>) -> cached_tile_layer::SettleHook {
    let counter = counter.clone();
    Box::new(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    })
}

// ============================================================================
// Tile Lifecycle
// ============================================================================

#[tokio::test]
async fn test_element_returns_before_lookup_settles() {
    let gate = Arc::new(Notify::new());
    let factory = GatedFactory::new(GatedStore::gated(TRANSPARENT_PIXEL, gate.clone()));
    let layer = layer_over(factory, CacheLayerOptions::default(), 3);

    let settles = Arc::new(AtomicUsize::new(0));
    let element = layer.create_tile(TilePoint::new(1, 2), counting_hook(&settles));

    // The lookup is still held open: the element exists but has no source.
    assert_eq!(element.source(), None);
    assert!(!element.is_settled());
    assert_eq!(settles.load(Ordering::SeqCst), 0);

    gate.notify_one();
    element.settled().await;

    assert_eq!(element.source().as_deref(), Some(TRANSPARENT_PIXEL));
    assert_eq!(settles.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_successful_lookup_assigns_data_uri() {
    let factory = GatedFactory::new(GatedStore::resolving(TRANSPARENT_PIXEL));
    let layer = layer_over(factory.clone(), CacheLayerOptions::default(), 3);

    let settles = Arc::new(AtomicUsize::new(0));
    let element = layer.create_tile(TilePoint::new(1, 2), counting_hook(&settles));
    element.settled().await;

    assert_eq!(element.source().as_deref(), Some(TRANSPARENT_PIXEL));
    assert_eq!(settles.load(Ordering::SeqCst), 1);
    assert_eq!(
        factory.store.lookups.lock().unwrap().as_slice(),
        [TileCoord::new(1, 2, 3)]
    );
}

#[tokio::test]
async fn test_failed_lookup_assigns_error_tile() {
    let factory = GatedFactory::new(GatedStore::rejecting(StoreError::Network(
        "no further reason, just for testing".to_string(),
    )));
    let options = CacheLayerOptions::builder()
        .error_tile_url(TRANSPARENT_PIXEL)
        .build();
    let layer = layer_over(factory, options, 3);

    let settles = Arc::new(AtomicUsize::new(0));
    let element = layer.create_tile(TilePoint::new(1, 2), counting_hook(&settles));
    element.settled().await;

    assert_eq!(element.source().as_deref(), Some(TRANSPARENT_PIXEL));
    assert_eq!(settles.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_storage_failure_also_falls_back() {
    let factory = GatedFactory::new(GatedStore::rejecting(StoreError::Storage(
        "transaction aborted".to_string(),
    )));
    let options = CacheLayerOptions::builder()
        .error_tile_url("error.tile")
        .build();
    let layer = layer_over(factory, options, 3);

    let element = layer.create_tile(TilePoint::new(1, 2), Box::new(|_| {}));
    element.settled().await;

    assert_eq!(element.source().as_deref(), Some("error.tile"));
}

#[tokio::test]
async fn test_cross_origin_attribute_follows_configuration() {
    let factory = GatedFactory::new(GatedStore::resolving(TRANSPARENT_PIXEL));
    let options = CacheLayerOptions::builder().cross_origin(true).build();
    let layer = layer_over(factory, options, 3);

    let element = layer.create_tile(TilePoint::new(1, 2), Box::new(|_| {}));
    assert_eq!(element.cross_origin(), Some("anonymous"));
    assert_eq!(element.alt(), "");
    assert_eq!(element.role(), "presentation");
    element.settled().await;
}

#[tokio::test]
async fn test_cross_origin_attribute_absent_by_default() {
    let factory = GatedFactory::new(GatedStore::resolving(TRANSPARENT_PIXEL));
    let layer = layer_over(factory, CacheLayerOptions::default(), 3);

    let element = layer.create_tile(TilePoint::new(1, 2), Box::new(|_| {}));
    assert_eq!(element.cross_origin(), None);
    element.settled().await;
}

#[tokio::test]
async fn test_concurrent_requests_issue_independent_lookups() {
    let factory = GatedFactory::new(GatedStore::resolving(TRANSPARENT_PIXEL));
    let layer = layer_over(factory.clone(), CacheLayerOptions::default(), 3);

    let first = layer.create_tile(TilePoint::new(1, 2), Box::new(|_| {}));
    let second = layer.create_tile(TilePoint::new(1, 2), Box::new(|_| {}));
    first.settled().await;
    second.settled().await;

    // No deduplication at this layer: same coordinate, two lookups, each
    // over its own store handle.
    assert_eq!(factory.store.lookups.lock().unwrap().len(), 2);
    assert_eq!(factory.connects.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_store_receives_layer_addressing() {
    let factory = GatedFactory::new(GatedStore::resolving(TRANSPARENT_PIXEL));
    let layer = layer_over(factory.clone(), CacheLayerOptions::default(), 3);

    let element = layer.create_tile(TilePoint::new(1, 2), Box::new(|_| {}));
    element.settled().await;

    let connects = factory.connects.lock().unwrap();
    assert_eq!(connects[0].tile_url, TEST_URL_TEMPLATE);
    assert_eq!(connects[0].sub_domains, ["a", "b", "c"]);
    assert_eq!(connects[0].database_name, "tile-cache-data");
    assert_eq!(connects[0].object_store_name, "OSM");
}

#[tokio::test]
async fn test_unbound_layer_serves_fallback_without_store_contact() {
    let factory = GatedFactory::new(GatedStore::resolving(TRANSPARENT_PIXEL));
    let options = CacheLayerOptions::builder()
        .error_tile_url("error.tile")
        .build();
    let layer = CachedTileLayer::new(TEST_URL_TEMPLATE, options, factory.clone());

    let settles = Arc::new(AtomicUsize::new(0));
    let element = layer.create_tile(TilePoint::new(1, 2), counting_hook(&settles));
    assert_eq!(element.source(), None);
    element.settled().await;

    assert_eq!(element.source().as_deref(), Some("error.tile"));
    assert_eq!(settles.load(Ordering::SeqCst), 1);
    assert!(factory.connects.lock().unwrap().is_empty());
}
