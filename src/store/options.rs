//! Store addressing options.

use std::time::Duration;

/// Everything a [`StoreFactory`](crate::StoreFactory) needs to open a handle
/// to one logical tile store.
///
/// Assembled by the layer from its URL template and
/// [`CacheLayerOptions`](crate::CacheLayerOptions). Two handles opened from
/// equal options address the same logical store: a tile written through one
/// is visible to lookups through the other.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreOptions {
    /// URL template with `{s}`, `{z}`, `{x}`, `{y}` placeholders.
    pub tile_url: String,
    /// Sub-domain tokens rotated into the `{s}` placeholder.
    pub sub_domains: Vec<String>,
    /// Name of the cache database.
    pub database_name: String,
    /// Schema version of the cache database.
    pub database_version: u32,
    /// Name of the object store within the database.
    pub object_store_name: String,
    /// Minimum spacing between requests while seeding.
    pub crawl_delay: Duration,
    /// Maximum age of a stored tile before it counts as stale.
    pub max_age: Duration,
}
